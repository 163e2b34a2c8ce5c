use async_trait::async_trait;
use casemall_sdk::{Cart, CartItem, NewCartItem};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::domain::error::DomainError;
use crate::domain::repos::{CartsRepository, DbConnTrait};
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::cart::{
    ActiveModel as CartAM, Column as CartColumn, Entity as CartEntity,
};
use crate::infra::storage::entity::cart_item::{
    ActiveModel as CartItemAM, Column as CartItemColumn, Entity as CartItemEntity,
};

/// ORM-based implementation of the `CartsRepository` trait.
#[derive(Clone, Default)]
pub struct SeaCartsRepository;

#[async_trait]
impl CartsRepository for SeaCartsRepository {
    async fn find_by_user<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: &str,
    ) -> Result<Option<Cart>, DomainError> {
        let found = CartEntity::find()
            .filter(CartColumn::UserId.eq(user_id))
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn create<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: &str,
    ) -> Result<Cart, DomainError> {
        let m = CartAM {
            user_id: Set(user_id.to_owned()),
            ..Default::default()
        };
        let saved = m.insert(conn).await.map_err(db_err)?;
        Ok(saved.into())
    }

    async fn list_items<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        cart_id: i64,
    ) -> Result<Vec<CartItem>, DomainError> {
        let rows = CartItemEntity::find()
            .filter(CartItemColumn::CartId.eq(cart_id))
            .order_by_asc(CartItemColumn::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_item<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        cart_item_id: i64,
    ) -> Result<Option<CartItem>, DomainError> {
        let found = CartItemEntity::find_by_id(cart_item_id)
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn find_item<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        cart_id: i64,
        product_id: i64,
        product_model_id: i64,
    ) -> Result<Option<CartItem>, DomainError> {
        let found = CartItemEntity::find()
            .filter(CartItemColumn::CartId.eq(cart_id))
            .filter(CartItemColumn::ProductId.eq(product_id))
            .filter(CartItemColumn::ProductModelId.eq(product_model_id))
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn add_item<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        cart_id: i64,
        item: NewCartItem,
    ) -> Result<CartItem, DomainError> {
        let m = CartItemAM {
            cart_id: Set(cart_id),
            product_id: Set(item.product_id),
            product_model_id: Set(item.product_model_id),
            count: Set(item.count),
            ..Default::default()
        };
        let saved = m.insert(conn).await.map_err(db_err)?;
        Ok(saved.into())
    }

    async fn set_item_count<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        cart_item_id: i64,
        count: i32,
    ) -> Result<(), DomainError> {
        let result = CartItemEntity::update_many()
            .col_expr(CartItemColumn::Count, Expr::value(count))
            .filter(CartItemColumn::Id.eq(cart_item_id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::cart_item_not_found(cart_item_id));
        }
        Ok(())
    }

    async fn delete_item<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        cart_item_id: i64,
    ) -> Result<bool, DomainError> {
        let result = CartItemEntity::delete_by_id(cart_item_id)
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_items_for_product<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
    ) -> Result<u64, DomainError> {
        let result = CartItemEntity::delete_many()
            .filter(CartItemColumn::ProductId.eq(product_id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }

    async fn delete_items_for_model<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_model_id: i64,
    ) -> Result<u64, DomainError> {
        let result = CartItemEntity::delete_many()
            .filter(CartItemColumn::ProductModelId.eq(product_model_id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }
}
