use std::collections::HashSet;
use std::sync::Arc;

use casemall_sdk::{CartItem, NewOrderDetail, Order, OrderItemView, OrderStatus, OrderView, User};
use sea_orm::{DatabaseConnection, TransactionTrait};
use time::OffsetDateTime;
use tracing::{debug, info};

use super::stock;
use crate::domain::error::DomainError;
use crate::domain::repos::{
    CartsRepository, DbConnTrait, OrdersRepository, ProductsRepository, UsersRepository,
};
use crate::infra::storage::db::db_err;

/// One step needed to bring a pending order in line with the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Reconcile {
    /// A detail exists for the cart line but with a different count.
    Adjust {
        detail_id: i64,
        product_model_id: i64,
        from: i32,
        to: i32,
    },
    /// The cart line has no detail in the order yet.
    Append(CartItem),
}

/// Compare every cart line with the order detail of the same product and model.
pub(crate) fn plan_reconciliation(order: &Order, cart_items: &[CartItem]) -> Vec<Reconcile> {
    cart_items
        .iter()
        .filter_map(|item| match order.find_item_for(item) {
            Some(detail) if detail.count == item.count => None,
            Some(detail) => Some(Reconcile::Adjust {
                detail_id: detail.id,
                product_model_id: detail.product_model_id,
                from: detail.count,
                to: item.count,
            }),
            None => Some(Reconcile::Append(item.clone())),
        })
        .collect()
}

pub(crate) struct OrdersService<UR, PR, CR, OR>
where
    UR: UsersRepository,
    PR: ProductsRepository,
    CR: CartsRepository,
    OR: OrdersRepository,
{
    users: Arc<UR>,
    products: Arc<PR>,
    carts: Arc<CR>,
    repo: Arc<OR>,
    db: DatabaseConnection,
}

impl<UR, PR, CR, OR> OrdersService<UR, PR, CR, OR>
where
    UR: UsersRepository,
    PR: ProductsRepository,
    CR: CartsRepository,
    OR: OrdersRepository,
{
    pub(crate) fn new(
        users: Arc<UR>,
        products: Arc<PR>,
        carts: Arc<CR>,
        repo: Arc<OR>,
        db: DatabaseConnection,
    ) -> Self {
        Self {
            users,
            products,
            carts,
            repo,
            db,
        }
    }

    /// The user's pending order as it would look reconciled with the cart, or
    /// an empty view. Reconciliation runs in a transaction that is rolled
    /// back, so reading never changes the order or the stock.
    pub async fn get_order(&self, user_id: &str) -> Result<OrderView, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let user = self.load_user(&txn, user_id).await?;
        let view = self.get_existing_order(&txn, &user).await?;
        txn.rollback().await.map_err(db_err)?;

        Ok(view.unwrap_or_default())
    }

    /// First pending order of the user, reconciled with the cart.
    pub(crate) async fn get_existing_order<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        user: &User,
    ) -> Result<Option<OrderView>, DomainError> {
        let Some(order) = self
            .repo
            .find_first_by_status(conn, &user.user_id, OrderStatus::Stay)
            .await?
        else {
            return Ok(None);
        };

        let order = self.update_order_from_cart(conn, order, user).await?;
        self.order_view(conn, &order, user).await.map(Some)
    }

    /// Create a pending order from the selected cart lines. A user with a
    /// pending order gets that order back, reconciled, instead.
    pub async fn create_order(
        &self,
        user_id: &str,
        cart_item_ids: Vec<i64>,
    ) -> Result<OrderView, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let user = self.load_user(&txn, user_id).await?;

        if let Some(existing) = self.get_existing_order(&txn, &user).await? {
            txn.commit().await.map_err(db_err)?;
            debug!(user_id, order_no = ?existing.order_no, "Returning existing pending order");
            return Ok(existing);
        }

        if cart_item_ids.is_empty() {
            return Err(DomainError::validation(
                "cart_item_ids",
                "at least one cart item is required",
            ));
        }

        let cart = self.carts.find_by_user(&txn, user_id).await?;
        let mut seen = HashSet::new();
        let mut details = Vec::with_capacity(cart_item_ids.len());
        for cart_item_id in cart_item_ids {
            if !seen.insert(cart_item_id) {
                continue;
            }
            let item = self
                .carts
                .get_item(&txn, cart_item_id)
                .await?
                .ok_or_else(|| DomainError::cart_item_not_found(cart_item_id))?;
            if cart.as_ref().is_none_or(|c| c.id != item.cart_id) {
                return Err(DomainError::forbidden(format!(
                    "cart item {cart_item_id} does not belong to user '{user_id}'"
                )));
            }
            details.push(self.order_detail_for(&txn, &item).await?);
        }

        let order = self
            .repo
            .create(&txn, user_id, OffsetDateTime::now_utc(), details)
            .await?;
        let view = self.order_view(&txn, &order, &user).await?;
        txn.commit().await.map_err(db_err)?;

        info!(
            user_id,
            order_id = order.id,
            total_price = view.total_price,
            "Order created"
        );
        Ok(view)
    }

    /// Apply the cart's counts to a pending order, moving the differences into
    /// or out of stock. Returns the order as persisted afterwards.
    pub(crate) async fn update_order_from_cart<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        order: Order,
        user: &User,
    ) -> Result<Order, DomainError> {
        let Some(cart) = self.carts.find_by_user(conn, &user.user_id).await? else {
            debug!(user_id = %user.user_id, "No cart, nothing to reconcile");
            return Ok(order);
        };
        let cart_items = self.carts.list_items(conn, cart.id).await?;
        let plan = plan_reconciliation(&order, &cart_items);
        if plan.is_empty() {
            return Ok(order);
        }

        for step in plan {
            match step {
                Reconcile::Adjust {
                    detail_id,
                    product_model_id,
                    from,
                    to,
                } => {
                    let change = from - to;
                    debug!(order_id = order.id, detail_id, change, "Adjusting order detail");
                    if change > 0 {
                        stock::add_stock(&*self.products, conn, product_model_id, change).await?;
                    } else {
                        stock::remove_stock(&*self.products, conn, product_model_id, change.abs())
                            .await?;
                    }
                    self.repo.set_detail_count(conn, detail_id, to).await?;
                }
                Reconcile::Append(item) => {
                    debug!(order_id = order.id, cart_item_id = item.id, "Appending order detail");
                    let detail = self.order_detail_for(conn, &item).await?;
                    self.repo.add_detail(conn, order.id, detail).await?;
                }
            }
        }

        self.repo
            .get(conn, order.id)
            .await?
            .ok_or_else(|| DomainError::order_not_found(order.id.to_string()))
    }

    /// Drop the order detail matching a cart line and put its count back in
    /// stock. An order left without details is deleted.
    ///
    /// Returns the stored order afterwards without reconciling it, so the
    /// cart line that is still in the cart does not bring the detail back.
    pub async fn remove_order(
        &self,
        cart_item_id: i64,
        user_id: &str,
    ) -> Result<OrderView, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let user = self.load_user(&txn, user_id).await?;

        let item = self
            .carts
            .get_item(&txn, cart_item_id)
            .await?
            .ok_or_else(|| DomainError::cart_item_not_found(cart_item_id))?;
        let cart = self.carts.find_by_user(&txn, user_id).await?;
        if cart.is_none_or(|c| c.id != item.cart_id) {
            return Err(DomainError::forbidden(format!(
                "cart item {cart_item_id} does not belong to user '{user_id}'"
            )));
        }

        let order = self
            .repo
            .find_first_by_status(&txn, user_id, OrderStatus::Stay)
            .await?
            .ok_or_else(|| DomainError::order_not_found(format!("pending order of '{user_id}'")))?;
        let detail = order
            .find_item_for(&item)
            .ok_or_else(|| DomainError::order_item_not_found(cart_item_id))?;

        stock::add_stock(&*self.products, &txn, detail.product_model_id, detail.count).await?;
        self.repo.delete_detail(&txn, detail.id).await?;

        let view = if order.items.len() == 1 {
            self.repo.delete(&txn, order.id).await?;
            info!(user_id, order_id = order.id, "Order emptied and deleted");
            OrderView::default()
        } else {
            info!(user_id, order_id = order.id, detail_id = detail.id, "Order item removed");
            let remaining = self
                .repo
                .get(&txn, order.id)
                .await?
                .ok_or_else(|| DomainError::order_not_found(order.id.to_string()))?;
            self.order_view(&txn, &remaining, &user).await?
        };

        txn.commit().await.map_err(db_err)?;
        Ok(view)
    }

    /// Cancel a pending order and return all of its units to stock.
    pub async fn cancel_order(&self, user_id: &str, order_id: i64) -> Result<(), DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        self.load_user(&txn, user_id).await?;

        let order = self
            .repo
            .get(&txn, order_id)
            .await?
            .ok_or_else(|| DomainError::order_not_found(order_id.to_string()))?;
        if order.user_id != user_id {
            return Err(DomainError::forbidden(format!(
                "order {order_id} does not belong to user '{user_id}'"
            )));
        }
        if order.status != OrderStatus::Stay {
            return Err(DomainError::validation(
                "status",
                format!("order {order_id} is {}", order.status),
            ));
        }

        for detail in &order.items {
            stock::add_stock(&*self.products, &txn, detail.product_model_id, detail.count).await?;
        }
        self.repo
            .set_status(&txn, order_id, OrderStatus::Cancel)
            .await?;
        txn.commit().await.map_err(db_err)?;

        info!(user_id, order_id, "Order cancelled");
        Ok(())
    }

    async fn load_user<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: &str,
    ) -> Result<User, DomainError> {
        self.users
            .get(conn, user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(user_id))
    }

    /// Build a detail for a cart line: captures the current unit price and
    /// takes the count out of stock.
    async fn order_detail_for<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        item: &CartItem,
    ) -> Result<NewOrderDetail, DomainError> {
        let product = self
            .products
            .get(conn, item.product_id)
            .await?
            .ok_or_else(|| DomainError::product_not_found(item.product_id))?;
        stock::remove_stock(&*self.products, conn, item.product_model_id, item.count).await?;

        Ok(NewOrderDetail {
            product_id: product.id,
            product_model_id: item.product_model_id,
            count: item.count,
            price: product.price,
        })
    }

    async fn order_view<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        order: &Order,
        user: &User,
    ) -> Result<OrderView, DomainError> {
        let product_ids: Vec<i64> = order.items.iter().map(|d| d.product_id).collect();
        let urls = self.products.main_image_urls(conn, &product_ids).await?;

        let mut items = Vec::with_capacity(order.items.len());
        for detail in &order.items {
            let product = self
                .products
                .get(conn, detail.product_id)
                .await?
                .ok_or_else(|| DomainError::product_not_found(detail.product_id))?;
            let model = stock::load_model(&*self.products, conn, detail.product_model_id).await?;
            items.push(OrderItemView {
                order_detail_id: detail.id,
                product_id: product.id,
                product_name: product.name,
                product_model_id: model.id,
                model_select: model.model_select,
                count: detail.count,
                price: detail.price,
                total_price: detail.total_price(),
                img_url: urls.get(&product.id).cloned(),
            });
        }

        Ok(OrderView {
            order_no: Some(order.id),
            total_price: order.total_price(),
            items,
            user_name: Some(user.name.clone()),
            email: Some(user.email.clone()),
            phone: Some(user.phone.clone()),
        })
    }
}
