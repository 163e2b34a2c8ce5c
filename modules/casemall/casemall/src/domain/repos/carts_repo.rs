use async_trait::async_trait;
use casemall_sdk::{Cart, CartItem, NewCartItem};

use super::DbConnTrait;
use crate::domain::error::DomainError;

/// Carts and their items. A user owns at most one cart.
#[async_trait]
pub trait CartsRepository: Send + Sync {
    async fn find_by_user<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: &str,
    ) -> Result<Option<Cart>, DomainError>;

    async fn create<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: &str,
    ) -> Result<Cart, DomainError>;

    /// Items ordered by id.
    async fn list_items<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        cart_id: i64,
    ) -> Result<Vec<CartItem>, DomainError>;

    async fn get_item<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        cart_item_id: i64,
    ) -> Result<Option<CartItem>, DomainError>;

    /// Item for the same product and model, if already in the cart.
    async fn find_item<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        cart_id: i64,
        product_id: i64,
        product_model_id: i64,
    ) -> Result<Option<CartItem>, DomainError>;

    async fn add_item<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        cart_id: i64,
        item: NewCartItem,
    ) -> Result<CartItem, DomainError>;

    async fn set_item_count<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        cart_item_id: i64,
        count: i32,
    ) -> Result<(), DomainError>;

    async fn delete_item<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        cart_item_id: i64,
    ) -> Result<bool, DomainError>;

    /// Remove every cart line pointing at a product.
    async fn delete_items_for_product<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
    ) -> Result<u64, DomainError>;

    async fn delete_items_for_model<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_model_id: i64,
    ) -> Result<u64, DomainError>;
}
