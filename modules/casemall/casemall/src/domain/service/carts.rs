use std::sync::Arc;

use casemall_sdk::{Cart, CartItem, CartLine, CartView, NewCartItem};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info};

use crate::domain::error::DomainError;
use crate::domain::repos::{CartsRepository, DbConnTrait, ProductsRepository, UsersRepository};
use crate::infra::storage::db::db_err;

pub(crate) struct CartsService<UR, PR, CR>
where
    UR: UsersRepository,
    PR: ProductsRepository,
    CR: CartsRepository,
{
    users: Arc<UR>,
    products: Arc<PR>,
    repo: Arc<CR>,
    db: DatabaseConnection,
}

impl<UR, PR, CR> CartsService<UR, PR, CR>
where
    UR: UsersRepository,
    PR: ProductsRepository,
    CR: CartsRepository,
{
    pub(crate) fn new(
        users: Arc<UR>,
        products: Arc<PR>,
        repo: Arc<CR>,
        db: DatabaseConnection,
    ) -> Self {
        Self {
            users,
            products,
            repo,
            db,
        }
    }

    pub async fn get_cart(&self, user_id: &str) -> Result<CartView, DomainError> {
        self.ensure_user(&self.db, user_id).await?;

        let Some(cart) = self.repo.find_by_user(&self.db, user_id).await? else {
            debug!(user_id, "User has no cart yet");
            return Ok(CartView {
                user_id: user_id.to_owned(),
                ..CartView::default()
            });
        };

        let items = self.repo.list_items(&self.db, cart.id).await?;
        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            lines.push(self.cart_line(item).await?);
        }
        let total_price = lines
            .iter()
            .fold(0_i32, |acc, l| acc.saturating_add(l.total_price));

        Ok(CartView {
            cart_id: Some(cart.id),
            user_id: cart.user_id,
            items: lines,
            total_price,
        })
    }

    /// Add a product model to the user's cart, creating the cart on first use.
    /// Adding a model that is already in the cart increases its count.
    pub async fn add_item(
        &self,
        user_id: &str,
        item: NewCartItem,
    ) -> Result<CartItem, DomainError> {
        validate_count(item.count)?;

        let txn = self.db.begin().await.map_err(db_err)?;
        self.ensure_user(&txn, user_id).await?;

        let model = self
            .products
            .get_model(&txn, item.product_model_id)
            .await?
            .filter(|m| m.product_id == item.product_id)
            .ok_or_else(|| DomainError::product_model_not_found(item.product_model_id))?;

        let cart = self.get_or_create_cart(&txn, user_id).await?;
        let saved = match self
            .repo
            .find_item(&txn, cart.id, item.product_id, model.id)
            .await?
        {
            Some(mut existing) => {
                existing.count = existing
                    .count
                    .checked_add(item.count)
                    .ok_or_else(|| DomainError::validation("count", "count is too large"))?;
                self.repo
                    .set_item_count(&txn, existing.id, existing.count)
                    .await?;
                existing
            }
            None => self.repo.add_item(&txn, cart.id, item).await?,
        };
        txn.commit().await.map_err(db_err)?;

        info!(user_id, cart_item_id = saved.id, count = saved.count, "Cart item saved");
        Ok(saved)
    }

    pub async fn update_item_count(
        &self,
        user_id: &str,
        cart_item_id: i64,
        count: i32,
    ) -> Result<CartItem, DomainError> {
        validate_count(count)?;

        let txn = self.db.begin().await.map_err(db_err)?;
        let mut item = self.owned_item(&txn, user_id, cart_item_id).await?;
        self.repo.set_item_count(&txn, item.id, count).await?;
        txn.commit().await.map_err(db_err)?;

        item.count = count;
        debug!(user_id, cart_item_id, count, "Cart item count updated");
        Ok(item)
    }

    pub async fn remove_item(&self, user_id: &str, cart_item_id: i64) -> Result<(), DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        self.owned_item(&txn, user_id, cart_item_id).await?;
        self.repo.delete_item(&txn, cart_item_id).await?;
        txn.commit().await.map_err(db_err)?;

        info!(user_id, cart_item_id, "Cart item removed");
        Ok(())
    }

    async fn ensure_user<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: &str,
    ) -> Result<(), DomainError> {
        self.users
            .get(conn, user_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::user_not_found(user_id))
    }

    async fn get_or_create_cart<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: &str,
    ) -> Result<Cart, DomainError> {
        if let Some(cart) = self.repo.find_by_user(conn, user_id).await? {
            return Ok(cart);
        }
        info!(user_id, "Creating cart");
        self.repo.create(conn, user_id).await
    }

    async fn owned_item<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: &str,
        cart_item_id: i64,
    ) -> Result<CartItem, DomainError> {
        let item = self
            .repo
            .get_item(conn, cart_item_id)
            .await?
            .ok_or_else(|| DomainError::cart_item_not_found(cart_item_id))?;
        let cart = self.repo.find_by_user(conn, user_id).await?;
        if cart.is_none_or(|c| c.id != item.cart_id) {
            return Err(DomainError::forbidden(format!(
                "cart item {cart_item_id} does not belong to user '{user_id}'"
            )));
        }
        Ok(item)
    }

    async fn cart_line(&self, item: CartItem) -> Result<CartLine, DomainError> {
        let product = self
            .products
            .get(&self.db, item.product_id)
            .await?
            .ok_or_else(|| DomainError::product_not_found(item.product_id))?;
        let model = self
            .products
            .get_model(&self.db, item.product_model_id)
            .await?
            .ok_or_else(|| DomainError::product_model_not_found(item.product_model_id))?;
        let img_url = self
            .products
            .main_image_urls(&self.db, &[product.id])
            .await?
            .remove(&product.id);

        Ok(CartLine {
            cart_item_id: item.id,
            product_id: product.id,
            product_name: product.name,
            product_model_id: model.id,
            model_select: model.model_select,
            price: product.price,
            count: item.count,
            total_price: product.price.saturating_mul(item.count),
            img_url,
        })
    }
}

fn validate_count(count: i32) -> Result<(), DomainError> {
    if count < 1 {
        return Err(DomainError::validation("count", "must be at least 1"));
    }
    Ok(())
}
