use async_trait::async_trait;
use casemall_sdk::{NewOrderDetail, Order, OrderDetail, OrderStatus};
use time::OffsetDateTime;

use super::DbConnTrait;
use crate::domain::error::DomainError;

/// Orders are loaded together with their details.
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    async fn get<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        order_id: i64,
    ) -> Result<Option<Order>, DomainError>;

    /// Lowest-id order of the user in the given status.
    async fn find_first_by_status<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: &str,
        status: OrderStatus,
    ) -> Result<Option<Order>, DomainError>;

    async fn create<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: &str,
        order_date: OffsetDateTime,
        details: Vec<NewOrderDetail>,
    ) -> Result<Order, DomainError>;

    async fn add_detail<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        order_id: i64,
        detail: NewOrderDetail,
    ) -> Result<OrderDetail, DomainError>;

    async fn set_detail_count<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        detail_id: i64,
        count: i32,
    ) -> Result<(), DomainError>;

    async fn delete_detail<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        detail_id: i64,
    ) -> Result<bool, DomainError>;

    async fn set_status<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        order_id: i64,
        status: OrderStatus,
    ) -> Result<(), DomainError>;

    /// Deletes the order and any remaining details.
    async fn delete<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        order_id: i64,
    ) -> Result<bool, DomainError>;

    /// Whether any order detail references the product.
    async fn product_is_ordered<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
    ) -> Result<bool, DomainError>;

    /// Whether any order detail references the product model.
    async fn model_is_ordered<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_model_id: i64,
    ) -> Result<bool, DomainError>;
}
