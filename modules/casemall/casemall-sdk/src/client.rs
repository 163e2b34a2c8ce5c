use async_trait::async_trait;

use crate::catalog::{ProductCategory, ProductType};
use crate::errors::CasemallError;
use crate::models::{
    CartItem, CartView, MainProductItem, NewCartItem, NewUser, OrderView, Page, PageRequest,
    Product, ProductDetail, ProductSearch, User,
};

/// Object-safe in-process API of the `casemall` module.
///
/// Every call that acts on behalf of a shopper takes the shopper's `user_id`;
/// authentication happens upstream.
#[async_trait]
pub trait CasemallClientV1: Send + Sync {
    // ==================== Users ====================

    async fn register_user(&self, new_user: NewUser) -> Result<User, CasemallError>;

    async fn get_user(&self, user_id: &str) -> Result<User, CasemallError>;

    // ==================== Catalog ====================

    async fn get_product_detail(&self, product_id: i64) -> Result<ProductDetail, CasemallError>;

    /// Storefront listing: only products currently on sale.
    async fn main_product_page(
        &self,
        search: ProductSearch,
        page: PageRequest,
    ) -> Result<Page<MainProductItem>, CasemallError>;

    async fn products_by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Vec<Product>, CasemallError>;

    async fn products_by_type(
        &self,
        product_type: ProductType,
    ) -> Result<Vec<Product>, CasemallError>;

    /// Every product regardless of sell status, newest first.
    async fn all_products(&self) -> Result<Vec<Product>, CasemallError>;

    async fn all_products_page(&self, page: PageRequest) -> Result<Page<Product>, CasemallError>;

    // ==================== Cart ====================

    async fn get_cart(&self, user_id: &str) -> Result<CartView, CasemallError>;

    async fn add_cart_item(
        &self,
        user_id: &str,
        item: NewCartItem,
    ) -> Result<CartItem, CasemallError>;

    // ==================== Orders ====================

    /// Pending order for the user, reconciled with the cart. Empty when none.
    async fn get_order(&self, user_id: &str) -> Result<OrderView, CasemallError>;

    async fn create_order(
        &self,
        user_id: &str,
        cart_item_ids: Vec<i64>,
    ) -> Result<OrderView, CasemallError>;

    async fn remove_order_item(&self, user_id: &str, cart_item_id: i64)
    -> Result<(), CasemallError>;

    async fn cancel_order(&self, user_id: &str, order_id: i64) -> Result<(), CasemallError>;
}
