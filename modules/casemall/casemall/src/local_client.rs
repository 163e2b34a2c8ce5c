//! Local implementation of `CasemallClientV1`.
//!
//! Delegates to the domain services in the same process and converts
//! domain errors to SDK errors.

use std::sync::Arc;

use async_trait::async_trait;
use casemall_sdk::{
    CartItem, CartView, CasemallClientV1, CasemallError, MainProductItem, NewCartItem, NewUser,
    OrderView, Page, PageRequest, Product, ProductCategory, ProductDetail, ProductSearch,
    ProductType, User,
};

use crate::module::ConcreteAppServices;

pub struct CasemallLocalClient {
    services: Arc<ConcreteAppServices>,
}

impl CasemallLocalClient {
    #[must_use]
    pub(crate) fn new(services: Arc<ConcreteAppServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl CasemallClientV1 for CasemallLocalClient {
    async fn register_user(&self, new_user: NewUser) -> Result<User, CasemallError> {
        self.services
            .users
            .register_user(new_user)
            .await
            .map_err(Into::into)
    }

    async fn get_user(&self, user_id: &str) -> Result<User, CasemallError> {
        self.services
            .users
            .get_user(user_id)
            .await
            .map_err(Into::into)
    }

    async fn get_product_detail(&self, product_id: i64) -> Result<ProductDetail, CasemallError> {
        self.services
            .products
            .get_product_detail(product_id)
            .await
            .map_err(Into::into)
    }

    async fn main_product_page(
        &self,
        search: ProductSearch,
        page: PageRequest,
    ) -> Result<Page<MainProductItem>, CasemallError> {
        self.services
            .products
            .get_main_product_page(&search, page)
            .await
            .map_err(Into::into)
    }

    async fn products_by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Vec<Product>, CasemallError> {
        self.services
            .products
            .get_products_by_category(category)
            .await
            .map_err(Into::into)
    }

    async fn products_by_type(
        &self,
        product_type: ProductType,
    ) -> Result<Vec<Product>, CasemallError> {
        self.services
            .products
            .get_products_by_type(product_type)
            .await
            .map_err(Into::into)
    }

    async fn all_products(&self) -> Result<Vec<Product>, CasemallError> {
        self.services
            .products
            .get_all_products()
            .await
            .map_err(Into::into)
    }

    async fn all_products_page(&self, page: PageRequest) -> Result<Page<Product>, CasemallError> {
        self.services
            .products
            .get_all_products_page(page)
            .await
            .map_err(Into::into)
    }

    async fn get_cart(&self, user_id: &str) -> Result<CartView, CasemallError> {
        self.services
            .carts
            .get_cart(user_id)
            .await
            .map_err(Into::into)
    }

    async fn add_cart_item(
        &self,
        user_id: &str,
        item: NewCartItem,
    ) -> Result<CartItem, CasemallError> {
        self.services
            .carts
            .add_item(user_id, item)
            .await
            .map_err(Into::into)
    }

    async fn get_order(&self, user_id: &str) -> Result<OrderView, CasemallError> {
        self.services
            .orders
            .get_order(user_id)
            .await
            .map_err(Into::into)
    }

    async fn create_order(
        &self,
        user_id: &str,
        cart_item_ids: Vec<i64>,
    ) -> Result<OrderView, CasemallError> {
        self.services
            .orders
            .create_order(user_id, cart_item_ids)
            .await
            .map_err(Into::into)
    }

    async fn remove_order_item(
        &self,
        user_id: &str,
        cart_item_id: i64,
    ) -> Result<(), CasemallError> {
        self.services
            .orders
            .remove_order(cart_item_id, user_id)
            .await
            .map(|_| ())
            .map_err(Into::into)
    }

    async fn cancel_order(&self, user_id: &str, order_id: i64) -> Result<(), CasemallError> {
        self.services
            .orders
            .cancel_order(user_id, order_id)
            .await
            .map_err(Into::into)
    }
}
