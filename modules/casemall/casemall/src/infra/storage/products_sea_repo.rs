use std::collections::HashMap;

use async_trait::async_trait;
use casemall_sdk::{Page, Product, ProductForm, ProductImage, ProductModel, ProductSearch};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
    Set,
};
use time::OffsetDateTime;

use crate::domain::error::DomainError;
use crate::domain::repos::{DbConnTrait, NewProductImage, ProductsRepository};
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::product::{
    ActiveModel as ProductAM, Column as ProductColumn, Entity as ProductEntity,
};
use crate::infra::storage::entity::product_image::{
    ActiveModel as ImageAM, Column as ImageColumn, Entity as ImageEntity,
};
use crate::infra::storage::entity::product_model::{
    ActiveModel as ModelAM, Column as ModelColumn, Entity as ModelEntity,
};

/// ORM-based implementation of the `ProductsRepository` trait.
#[derive(Clone, Default)]
pub struct SeaProductsRepository;

/// Filtered product query, newest first.
fn search_query(search: &ProductSearch) -> Select<ProductEntity> {
    let mut query = ProductEntity::find();
    if let Some(text) = search
        .search_query
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        query = query.filter(ProductColumn::Name.contains(text));
    }
    if let Some(category) = search.category {
        query = query.filter(ProductColumn::Category.eq(category.as_str()));
    }
    if let Some(product_type) = search.product_type {
        query = query.filter(ProductColumn::ProductType.eq(product_type.as_str()));
    }
    if let Some(status) = search.sell_status {
        query = query.filter(ProductColumn::SellStatus.eq(status.as_str()));
    }
    query.order_by_desc(ProductColumn::Id)
}

#[async_trait]
impl ProductsRepository for SeaProductsRepository {
    async fn get<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
    ) -> Result<Option<Product>, DomainError> {
        let found = ProductEntity::find_by_id(product_id)
            .one(conn)
            .await
            .map_err(db_err)?;
        found.map(Product::try_from).transpose()
    }

    async fn create<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        form: &ProductForm,
        now: OffsetDateTime,
    ) -> Result<Product, DomainError> {
        let m = ProductAM {
            name: Set(form.name.clone()),
            price: Set(form.price),
            detail: Set(form.detail.clone()),
            category: Set(form.category.as_str().to_owned()),
            product_type: Set(form.product_type.as_str().to_owned()),
            sell_status: Set(form.sell_status.as_str().to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let saved = m.insert(conn).await.map_err(db_err)?;
        Product::try_from(saved)
    }

    async fn update<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product: Product,
    ) -> Result<Product, DomainError> {
        let m = ProductAM {
            id: Set(product.id),
            name: Set(product.name.clone()),
            price: Set(product.price),
            detail: Set(product.detail.clone()),
            category: Set(product.category.as_str().to_owned()),
            product_type: Set(product.product_type.as_str().to_owned()),
            sell_status: Set(product.sell_status.as_str().to_owned()),
            created_at: Set(product.created_at),
            updated_at: Set(product.updated_at),
        };
        let _ = m.update(conn).await.map_err(db_err)?;
        Ok(product)
    }

    async fn delete<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
    ) -> Result<bool, DomainError> {
        let result = ProductEntity::delete_by_id(product_id)
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn list<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        search: &ProductSearch,
    ) -> Result<Vec<Product>, DomainError> {
        let rows = search_query(search).all(conn).await.map_err(db_err)?;
        rows.into_iter().map(Product::try_from).collect()
    }

    async fn list_page<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        search: &ProductSearch,
        page: u64,
        size: u64,
    ) -> Result<Page<Product>, DomainError> {
        let paginator = search_query(search).paginate(conn, size);
        let total_items = paginator.num_items().await.map_err(db_err)?;
        let rows = paginator.fetch_page(page).await.map_err(db_err)?;
        let items = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, page, size, total_items))
    }

    async fn list_models<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
    ) -> Result<Vec<ProductModel>, DomainError> {
        let rows = ModelEntity::find()
            .filter(ModelColumn::ProductId.eq(product_id))
            .order_by_asc(ModelColumn::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_model<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        model_id: i64,
    ) -> Result<Option<ProductModel>, DomainError> {
        let found = ModelEntity::find_by_id(model_id)
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn create_models<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
        models: Vec<(String, i32)>,
    ) -> Result<Vec<ProductModel>, DomainError> {
        let mut saved = Vec::with_capacity(models.len());
        for (model_select, stock) in models {
            let m = ModelAM {
                product_id: Set(product_id),
                model_select: Set(model_select),
                stock: Set(stock),
                ..Default::default()
            };
            saved.push(m.insert(conn).await.map_err(db_err)?.into());
        }
        Ok(saved)
    }

    async fn set_model_stock<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        model_id: i64,
        stock: i32,
    ) -> Result<(), DomainError> {
        ModelEntity::update_many()
            .col_expr(ModelColumn::Stock, Expr::value(stock))
            .filter(ModelColumn::Id.eq(model_id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete_model<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        model_id: i64,
    ) -> Result<bool, DomainError> {
        let result = ModelEntity::delete_by_id(model_id)
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_models<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
    ) -> Result<u64, DomainError> {
        let result = ModelEntity::delete_many()
            .filter(ModelColumn::ProductId.eq(product_id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }

    async fn increase_stock<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        model_id: i64,
        quantity: i32,
    ) -> Result<(), DomainError> {
        let result = ModelEntity::update_many()
            .col_expr(ModelColumn::Stock, Expr::col(ModelColumn::Stock).add(quantity))
            .filter(ModelColumn::Id.eq(model_id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::product_model_not_found(model_id));
        }
        Ok(())
    }

    async fn decrease_stock<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        model_id: i64,
        quantity: i32,
    ) -> Result<bool, DomainError> {
        let result = ModelEntity::update_many()
            .col_expr(ModelColumn::Stock, Expr::col(ModelColumn::Stock).sub(quantity))
            .filter(ModelColumn::Id.eq(model_id))
            .filter(ModelColumn::Stock.gte(quantity))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected == 1)
    }

    async fn list_images<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
    ) -> Result<Vec<ProductImage>, DomainError> {
        let rows = ImageEntity::find()
            .filter(ImageColumn::ProductId.eq(product_id))
            .order_by_desc(ImageColumn::Main)
            .order_by_asc(ImageColumn::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn main_image_urls<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_ids: &[i64],
    ) -> Result<HashMap<i64, String>, DomainError> {
        if product_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = ImageEntity::find()
            .filter(ImageColumn::ProductId.is_in(product_ids.iter().copied()))
            .filter(ImageColumn::Main.eq(true))
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows
            .into_iter()
            .map(|row| (row.product_id, row.img_url))
            .collect())
    }

    async fn create_images<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
        images: Vec<NewProductImage>,
    ) -> Result<Vec<ProductImage>, DomainError> {
        let mut saved = Vec::with_capacity(images.len());
        for image in images {
            let m = ImageAM {
                product_id: Set(product_id),
                img_name: Set(image.img_name),
                ori_img_name: Set(image.ori_img_name),
                img_url: Set(image.img_url),
                main: Set(image.main),
                ..Default::default()
            };
            saved.push(m.insert(conn).await.map_err(db_err)?.into());
        }
        Ok(saved)
    }

    async fn delete_images<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        product_id: i64,
    ) -> Result<u64, DomainError> {
        let result = ImageEntity::delete_many()
            .filter(ImageColumn::ProductId.eq(product_id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }
}
