//! Domain service layer - business logic and rules.
//!
//! Per-resource submodules:
//! - `users` - shopper registration and lookup
//! - `products` - catalog administration and storefront listings
//! - `carts` - cart lines per user
//! - `orders` - pending order creation and reconciliation with the cart
//!
//! Every mutating operation opens one transaction on `db`, passes it to the
//! repositories and commits at the end. Dropping an uncommitted transaction
//! rolls it back, so any `?` on the way out undoes the whole operation.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::domain::ports::ImageStore;
use crate::domain::repos::{CartsRepository, OrdersRepository, ProductsRepository, UsersRepository};

mod carts;
mod orders;
mod products;
mod stock;
mod users;

#[cfg(test)]
mod tests_carts;
#[cfg(test)]
mod tests_orders;
#[cfg(test)]
mod tests_products;

pub(crate) use carts::CartsService;
pub(crate) use orders::OrdersService;
pub(crate) use products::ProductsService;
pub(crate) use users::UsersService;

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_size: 12,
            max_page_size: 100,
        }
    }
}

// DI Container - aggregates all domain services
pub(crate) struct AppServices<UR, PR, CR, OR>
where
    UR: UsersRepository + 'static,
    PR: ProductsRepository + 'static,
    CR: CartsRepository + 'static,
    OR: OrdersRepository + 'static,
{
    pub(crate) users: UsersService<UR>,
    pub(crate) products: ProductsService<PR, CR, OR>,
    pub(crate) carts: CartsService<UR, PR, CR>,
    pub(crate) orders: OrdersService<UR, PR, CR, OR>,
}

impl<UR, PR, CR, OR> AppServices<UR, PR, CR, OR>
where
    UR: UsersRepository + 'static,
    PR: ProductsRepository + 'static,
    CR: CartsRepository + 'static,
    OR: OrdersRepository + 'static,
{
    pub fn new(
        users_repo: UR,
        products_repo: PR,
        carts_repo: CR,
        orders_repo: OR,
        images: Arc<dyn ImageStore>,
        db: DatabaseConnection,
        config: ServiceConfig,
    ) -> Self {
        let users_repo = Arc::new(users_repo);
        let products_repo = Arc::new(products_repo);
        let carts_repo = Arc::new(carts_repo);
        let orders_repo = Arc::new(orders_repo);

        Self {
            users: UsersService::new(Arc::clone(&users_repo), db.clone()),
            products: ProductsService::new(
                Arc::clone(&products_repo),
                Arc::clone(&carts_repo),
                Arc::clone(&orders_repo),
                images,
                db.clone(),
                config,
            ),
            carts: CartsService::new(
                Arc::clone(&users_repo),
                Arc::clone(&products_repo),
                Arc::clone(&carts_repo),
                db.clone(),
            ),
            orders: OrdersService::new(users_repo, products_repo, carts_repo, orders_repo, db),
        }
    }
}
