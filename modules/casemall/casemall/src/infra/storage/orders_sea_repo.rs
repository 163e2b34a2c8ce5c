use async_trait::async_trait;
use casemall_sdk::{NewOrderDetail, Order, OrderDetail, OrderStatus};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::domain::error::DomainError;
use crate::domain::repos::{DbConnTrait, OrdersRepository};
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::order::{
    ActiveModel as OrderAM, Column as OrderColumn, Entity as OrderEntity, Model as OrderRow,
};
use crate::infra::storage::entity::order_detail::{
    ActiveModel as DetailAM, Column as DetailColumn, Entity as DetailEntity,
};
use crate::infra::storage::mapper::order_status;

/// ORM-based implementation of the `OrdersRepository` trait.
#[derive(Clone, Default)]
pub struct SeaOrdersRepository;

impl SeaOrdersRepository {
    async fn with_details<C: DbConnTrait + Send + Sync>(
        conn: &C,
        row: OrderRow,
    ) -> Result<Order, DomainError> {
        let details = DetailEntity::find()
            .filter(DetailColumn::OrderId.eq(row.id))
            .order_by_asc(DetailColumn::Id)
            .all(conn)
            .await
            .map_err(db_err)?;

        Ok(Order {
            status: order_status(&row.status)?,
            id: row.id,
            user_id: row.user_id,
            order_date: row.order_date,
            items: details.into_iter().map(Into::into).collect(),
        })
    }

    async fn insert_detail<C: DbConnTrait + Send + Sync>(
        conn: &C,
        order_id: i64,
        detail: NewOrderDetail,
    ) -> Result<OrderDetail, DomainError> {
        let m = DetailAM {
            order_id: Set(order_id),
            product_id: Set(detail.product_id),
            product_model_id: Set(detail.product_model_id),
            count: Set(detail.count),
            price: Set(detail.price),
            ..Default::default()
        };
        let saved = m.insert(conn).await.map_err(db_err)?;
        Ok(saved.into())
    }
}

#[async_trait]
impl OrdersRepository for SeaOrdersRepository {
    async fn get<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        order_id: i64,
    ) -> Result<Option<Order>, DomainError> {
        let found = OrderEntity::find_by_id(order_id)
            .one(conn)
            .await
            .map_err(db_err)?;
        match found {
            Some(row) => Self::with_details(conn, row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn find_first_by_status<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: &str,
        status: OrderStatus,
    ) -> Result<Option<Order>, DomainError> {
        let found = OrderEntity::find()
            .filter(OrderColumn::UserId.eq(user_id))
            .filter(OrderColumn::Status.eq(status.as_str()))
            .order_by_asc(OrderColumn::Id)
            .one(conn)
            .await
            .map_err(db_err)?;
        match found {
            Some(row) => Self::with_details(conn, row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn create<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: &str,
        order_date: OffsetDateTime,
        details: Vec<NewOrderDetail>,
    ) -> Result<Order, DomainError> {
        let m = OrderAM {
            user_id: Set(user_id.to_owned()),
            status: Set(OrderStatus::Stay.as_str().to_owned()),
            order_date: Set(order_date),
            ..Default::default()
        };
        let row = m.insert(conn).await.map_err(db_err)?;

        let mut items = Vec::with_capacity(details.len());
        for detail in details {
            items.push(Self::insert_detail(conn, row.id, detail).await?);
        }

        Ok(Order {
            id: row.id,
            user_id: row.user_id,
            status: OrderStatus::Stay,
            order_date: row.order_date,
            items,
        })
    }

    async fn add_detail<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        order_id: i64,
        detail: NewOrderDetail,
    ) -> Result<OrderDetail, DomainError> {
        Self::insert_detail(conn, order_id, detail).await
    }

    async fn set_detail_count<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        detail_id: i64,
        count: i32,
    ) -> Result<(), DomainError> {
        DetailEntity::update_many()
            .col_expr(DetailColumn::Count, Expr::value(count))
            .filter(DetailColumn::Id.eq(detail_id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete_detail<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        detail_id: i64,
    ) -> Result<bool, DomainError> {
        let result = DetailEntity::delete_by_id(detail_id)
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn set_status<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        order_id: i64,
        status: OrderStatus,
    ) -> Result<(), DomainError> {
        let result = OrderEntity::update_many()
            .col_expr(OrderColumn::Status, Expr::value(status.as_str()))
            .filter(OrderColumn::Id.eq(order_id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::order_not_found(order_id.to_string()));
        }
        Ok(())
    }

    async fn delete<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        order_id: i64,
    ) -> Result<bool, DomainError> {
        DetailEntity::delete_many()
            .filter(DetailColumn::OrderId.eq(order_id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        let result = OrderEntity::delete_by_id(order_id)
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn product_is_ordered<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
    ) -> Result<bool, DomainError> {
        let n = DetailEntity::find()
            .filter(DetailColumn::ProductId.eq(product_id))
            .count(conn)
            .await
            .map_err(db_err)?;
        Ok(n > 0)
    }

    async fn model_is_ordered<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_model_id: i64,
    ) -> Result<bool, DomainError> {
        let n = DetailEntity::find()
            .filter(DetailColumn::ProductModelId.eq(product_model_id))
            .count(conn)
            .await
            .map_err(db_err)?;
        Ok(n > 0)
    }
}
