#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;
use std::sync::Arc;

use casemall_sdk::{
    CartItem, ImageUpload, NewCartItem, NewProductModel, NewUser, ProductCategory, ProductDetail,
    ProductForm, ProductType, SellStatus, User,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::domain::service::{AppServices, ServiceConfig};
use crate::infra::images::FsImageStore;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{
    SeaCartsRepository, SeaOrdersRepository, SeaProductsRepository, SeaUsersRepository,
};
use crate::module::ConcreteAppServices;

/// Every pooled connection to `sqlite::memory:` is its own database, so the
/// pool is pinned to a single connection.
pub async fn inmem_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub fn build_services(db: DatabaseConnection, image_dir: &Path) -> Arc<ConcreteAppServices> {
    Arc::new(AppServices::new(
        SeaUsersRepository,
        SeaProductsRepository,
        SeaCartsRepository,
        SeaOrdersRepository,
        Arc::new(FsImageStore::new(image_dir, "/images", 1024 * 1024)),
        db,
        ServiceConfig::default(),
    ))
}

/// Services over a fresh database; keep the returned dir alive for the test.
pub async fn services() -> (Arc<ConcreteAppServices>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let services = build_services(inmem_db().await, dir.path());
    (services, dir)
}

pub fn png(name: &str) -> ImageUpload {
    ImageUpload {
        original_name: name.to_owned(),
        content_type: Some("image/png".to_owned()),
        bytes: b"\x89PNG\r\n".to_vec(),
    }
}

pub fn form(name: &str, price: i32, models: &[(&str, i32)]) -> ProductForm {
    ProductForm {
        name: name.to_owned(),
        price,
        detail: format!("{name} detail"),
        category: ProductCategory::PhoneCase,
        product_type: ProductType::Jelly,
        sell_status: SellStatus::Sell,
        models: models
            .iter()
            .map(|(label, stock)| NewProductModel {
                model_select: Some((*label).to_owned()),
                stock: Some(*stock),
            })
            .collect(),
    }
}

pub async fn seed_user(svc: &ConcreteAppServices, user_id: &str) -> User {
    svc.users
        .register_user(NewUser {
            user_id: user_id.to_owned(),
            name: format!("{user_id} name"),
            email: format!("{user_id}@example.com"),
            phone: "010-1234-5678".to_owned(),
        })
        .await
        .expect("Failed to seed user")
}

pub async fn seed_product(
    svc: &ConcreteAppServices,
    name: &str,
    price: i32,
    models: &[(&str, i32)],
) -> ProductDetail {
    let id = svc
        .products
        .save_product(form(name, price, models), vec![png("front.png")])
        .await
        .expect("Failed to seed product");
    svc.products.get_product_detail(id).await.unwrap()
}

pub async fn add_to_cart(
    svc: &ConcreteAppServices,
    user_id: &str,
    product: &ProductDetail,
    model_index: usize,
    count: i32,
) -> CartItem {
    svc.carts
        .add_item(
            user_id,
            NewCartItem {
                product_id: product.product.id,
                product_model_id: product.models[model_index].id,
                count,
            },
        )
        .await
        .expect("Failed to add cart item")
}

pub async fn stock_of(svc: &ConcreteAppServices, product: &ProductDetail, model_index: usize) -> i32 {
    let model_id = product.models[model_index].id;
    svc.products
        .get_product_models(product.product.id)
        .await
        .unwrap()
        .into_iter()
        .find(|m| m.id == model_id)
        .map(|m| m.stock)
        .unwrap()
}
