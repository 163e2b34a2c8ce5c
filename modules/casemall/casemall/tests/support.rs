#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Shared fixtures for `casemall` integration tests.
//!
//! Opens an in-memory SQLite database, runs migrations, wires the module and
//! seeds catalog rows straight through the SeaORM entities.

#![allow(dead_code)] // not every test binary uses every helper

use std::sync::Arc;

use casemall::infra::storage::entity::{product, product_image, product_model};
use casemall::{CasemallClientV1, CasemallConfig, CasemallModule};
use casemall_sdk::NewUser;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use time::OffsetDateTime;

pub struct TestContext {
    pub db: DatabaseConnection,
    pub module: CasemallModule,
    pub client: Arc<dyn CasemallClientV1>,
    pub images: tempfile::TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opts)
            .await
            .expect("Failed to connect to in-memory database");
        CasemallModule::migrate(&db)
            .await
            .expect("Failed to run migrations");

        let images = tempfile::tempdir().unwrap();
        let config = CasemallConfig {
            image_dir: images.path().to_path_buf(),
            ..CasemallConfig::default()
        };
        let module = CasemallModule::init(db.clone(), config).expect("Failed to init module");
        let client = module.client();

        Self {
            db,
            module,
            client,
            images,
        }
    }

    pub async fn user(&self, user_id: &str) {
        self.client
            .register_user(NewUser {
                user_id: user_id.to_owned(),
                name: format!("{user_id} name"),
                email: format!("{user_id}@example.com"),
                phone: "010-0000-0000".to_owned(),
            })
            .await
            .expect("Failed to register user");
    }

    /// Insert a product on sale with one model per `(label, stock)` and a
    /// main image. Returns the product id and the model ids in order.
    pub async fn product(&self, name: &str, price: i32, models: &[(&str, i32)]) -> (i64, Vec<i64>) {
        let now = OffsetDateTime::now_utc();
        let p = product::ActiveModel {
            name: Set(name.to_owned()),
            price: Set(price),
            detail: Set(String::new()),
            category: Set("PHONE_CASE".to_owned()),
            product_type: Set("HARD".to_owned()),
            sell_status: Set("SELL".to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to seed product");

        let mut model_ids = Vec::new();
        for (label, stock) in models {
            let m = product_model::ActiveModel {
                product_id: Set(p.id),
                model_select: Set((*label).to_owned()),
                stock: Set(*stock),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .expect("Failed to seed model");
            model_ids.push(m.id);
        }

        product_image::ActiveModel {
            product_id: Set(p.id),
            img_name: Set(format!("{}.png", p.id)),
            ori_img_name: Set("front.png".to_owned()),
            img_url: Set(format!("/images/{}.png", p.id)),
            main: Set(true),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to seed image");

        (p.id, model_ids)
    }

    pub async fn stock(&self, product_id: i64, model_id: i64) -> i32 {
        self.client
            .get_product_detail(product_id)
            .await
            .unwrap()
            .models
            .into_iter()
            .find(|m| m.id == model_id)
            .map(|m| m.stock)
            .unwrap()
    }
}
