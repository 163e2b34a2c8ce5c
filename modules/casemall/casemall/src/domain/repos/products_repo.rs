use std::collections::HashMap;

use async_trait::async_trait;
use casemall_sdk::{Page, Product, ProductForm, ProductImage, ProductModel, ProductSearch};
use time::OffsetDateTime;

use super::DbConnTrait;
use crate::domain::error::DomainError;

/// Image row to insert after the file has been stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProductImage {
    pub img_name: String,
    pub ori_img_name: String,
    pub img_url: String,
    pub main: bool,
}

/// Products with their models (stock) and images.
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    async fn get<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
    ) -> Result<Option<Product>, DomainError>;

    async fn create<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        form: &ProductForm,
        now: OffsetDateTime,
    ) -> Result<Product, DomainError>;

    async fn update<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product: Product,
    ) -> Result<Product, DomainError>;

    async fn delete<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
    ) -> Result<bool, DomainError>;

    /// Filtered products ordered by id descending.
    async fn list<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        search: &ProductSearch,
    ) -> Result<Vec<Product>, DomainError>;

    /// One page of filtered products ordered by id descending.
    async fn list_page<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        search: &ProductSearch,
        page: u64,
        size: u64,
    ) -> Result<Page<Product>, DomainError>;

    // ---- models ----

    async fn list_models<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
    ) -> Result<Vec<ProductModel>, DomainError>;

    async fn get_model<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        model_id: i64,
    ) -> Result<Option<ProductModel>, DomainError>;

    async fn create_models<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
        models: Vec<(String, i32)>,
    ) -> Result<Vec<ProductModel>, DomainError>;

    async fn set_model_stock<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        model_id: i64,
        stock: i32,
    ) -> Result<(), DomainError>;

    async fn delete_model<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        model_id: i64,
    ) -> Result<bool, DomainError>;

    async fn delete_models<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
    ) -> Result<u64, DomainError>;

    async fn increase_stock<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        model_id: i64,
        quantity: i32,
    ) -> Result<(), DomainError>;

    /// Guarded decrement. Returns `false` when the row had fewer than `quantity` units.
    async fn decrease_stock<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        model_id: i64,
        quantity: i32,
    ) -> Result<bool, DomainError>;

    // ---- images ----

    /// Images of a product, main image first.
    async fn list_images<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
    ) -> Result<Vec<ProductImage>, DomainError>;

    /// Main image url per product id.
    async fn main_image_urls<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_ids: &[i64],
    ) -> Result<HashMap<i64, String>, DomainError>;

    async fn create_images<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
        images: Vec<NewProductImage>,
    ) -> Result<Vec<ProductImage>, DomainError>;

    async fn delete_images<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
    ) -> Result<u64, DomainError>;
}
