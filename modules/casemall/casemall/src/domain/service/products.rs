use std::collections::HashSet;
use std::sync::Arc;

use casemall_sdk::{
    ImageUpload, MainProductItem, NewProductModel, Page, PageRequest, Product, ProductCategory,
    ProductDetail, ProductForm, ProductModel, ProductSearch, ProductType, SellStatus,
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use super::ServiceConfig;
use crate::domain::error::DomainError;
use crate::domain::ports::{ImageStore, StoredImage};
use crate::domain::repos::{CartsRepository, NewProductImage, OrdersRepository, ProductsRepository};
use crate::infra::storage::db::db_err;

pub(crate) struct ProductsService<PR, CR, OR>
where
    PR: ProductsRepository,
    CR: CartsRepository,
    OR: OrdersRepository,
{
    repo: Arc<PR>,
    carts: Arc<CR>,
    orders: Arc<OR>,
    images: Arc<dyn ImageStore>,
    db: DatabaseConnection,
    config: ServiceConfig,
}

impl<PR, CR, OR> ProductsService<PR, CR, OR>
where
    PR: ProductsRepository,
    CR: CartsRepository,
    OR: OrdersRepository,
{
    pub(crate) fn new(
        repo: Arc<PR>,
        carts: Arc<CR>,
        orders: Arc<OR>,
        images: Arc<dyn ImageStore>,
        db: DatabaseConnection,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            carts,
            orders,
            images,
            db,
            config,
        }
    }

    /// Register a product with its valid models and images; the first image
    /// becomes the main image. Returns the new product id.
    pub async fn save_product(
        &self,
        form: ProductForm,
        uploads: Vec<ImageUpload>,
    ) -> Result<i64, DomainError> {
        info!(name = %form.name, "Saving product");

        validate_form(&form)?;
        let models = valid_models(&form.models)?;
        if uploads.is_empty() {
            return Err(DomainError::EmptyImageList);
        }

        let stored = self.store_images(&uploads).await?;
        match self.insert_product(&form, models, &stored).await {
            Ok(product_id) => {
                info!(product_id, images = stored.len(), "Product saved");
                Ok(product_id)
            }
            Err(e) => {
                self.discard_files(stored.iter().map(|s| s.img_name.as_str()))
                    .await;
                Err(e)
            }
        }
    }

    async fn insert_product(
        &self,
        form: &ProductForm,
        models: Vec<(String, i32)>,
        stored: &[StoredImage],
    ) -> Result<i64, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let product = self
            .repo
            .create(&txn, form, OffsetDateTime::now_utc())
            .await?;
        let models = self.repo.create_models(&txn, product.id, models).await?;
        debug!(product_id = product.id, models = models.len(), "Models saved");
        self.repo
            .create_images(&txn, product.id, image_rows(stored))
            .await?;

        txn.commit().await.map_err(db_err)?;
        Ok(product.id)
    }

    pub async fn get_product_detail(&self, product_id: i64) -> Result<ProductDetail, DomainError> {
        let product = self.get_product(product_id).await?;
        let models = self.repo.list_models(&self.db, product_id).await?;
        let images = self.repo.list_images(&self.db, product_id).await?;
        if images.is_empty() {
            warn!(product_id, "No product images found");
        }

        Ok(ProductDetail {
            product,
            models,
            images,
        })
    }

    /// Overwrite the product fields, sync its models by label and replace all
    /// of its images.
    pub async fn update_product(
        &self,
        product_id: i64,
        form: ProductForm,
        uploads: Vec<ImageUpload>,
    ) -> Result<ProductDetail, DomainError> {
        info!(product_id, "Updating product");

        let mut product = self.get_product(product_id).await?;
        if uploads.is_empty() {
            return Err(DomainError::EmptyImageList);
        }
        validate_form(&form)?;
        let models = valid_models(&form.models)?;

        product.name = form.name;
        product.price = form.price;
        product.detail = form.detail;
        product.category = form.category;
        product.product_type = form.product_type;
        product.sell_status = form.sell_status;
        product.updated_at = OffsetDateTime::now_utc();

        let stored = self.store_images(&uploads).await?;
        let old_images = match self.apply_update(product, models, &stored).await {
            Ok(old) => old,
            Err(e) => {
                self.discard_files(stored.iter().map(|s| s.img_name.as_str()))
                    .await;
                return Err(e);
            }
        };
        self.discard_files(old_images.iter().map(String::as_str))
            .await;

        info!(product_id, "Product updated");
        self.get_product_detail(product_id).await
    }

    /// Returns the stored names of the images that were replaced.
    async fn apply_update(
        &self,
        product: Product,
        models: Vec<(String, i32)>,
        stored: &[StoredImage],
    ) -> Result<Vec<String>, DomainError> {
        let product_id = product.id;
        let txn = self.db.begin().await.map_err(db_err)?;

        self.repo.update(&txn, product).await?;

        let existing = self.repo.list_models(&txn, product_id).await?;
        let stale: Vec<i64> = {
            let labels: HashSet<&str> = models.iter().map(|(l, _)| l.as_str()).collect();
            existing
                .iter()
                .filter(|m| !labels.contains(m.model_select.as_str()))
                .map(|m| m.id)
                .collect()
        };
        for model_id in stale {
            if self.orders.model_is_ordered(&txn, model_id).await? {
                return Err(DomainError::validation(
                    "models",
                    format!("product model {model_id} is referenced by orders"),
                ));
            }
            self.carts.delete_items_for_model(&txn, model_id).await?;
            self.repo.delete_model(&txn, model_id).await?;
        }

        let mut new_models = Vec::new();
        for (label, stock) in models {
            match existing.iter().find(|m| m.model_select == label) {
                Some(m) => self.repo.set_model_stock(&txn, m.id, stock).await?,
                None => new_models.push((label, stock)),
            }
        }
        self.repo
            .create_models(&txn, product_id, new_models)
            .await?;

        let old_images = self.repo.list_images(&txn, product_id).await?;
        self.repo.delete_images(&txn, product_id).await?;
        self.repo
            .create_images(&txn, product_id, image_rows(stored))
            .await?;

        txn.commit().await.map_err(db_err)?;
        Ok(old_images.into_iter().map(|i| i.img_name).collect())
    }

    pub async fn delete_product(&self, product_id: i64) -> Result<(), DomainError> {
        info!(product_id, "Deleting product");

        let txn = self.db.begin().await.map_err(db_err)?;
        self.repo
            .get(&txn, product_id)
            .await?
            .ok_or_else(|| DomainError::product_not_found(product_id))?;
        if self.orders.product_is_ordered(&txn, product_id).await? {
            return Err(DomainError::validation(
                "product_id",
                format!("product {product_id} is referenced by orders"),
            ));
        }

        let images = self.repo.list_images(&txn, product_id).await?;
        self.repo.delete_images(&txn, product_id).await?;
        self.carts.delete_items_for_product(&txn, product_id).await?;
        self.repo.delete_models(&txn, product_id).await?;
        self.repo.delete(&txn, product_id).await?;
        txn.commit().await.map_err(db_err)?;

        self.discard_files(images.iter().map(|i| i.img_name.as_str()))
            .await;
        info!(product_id, "Product deleted");
        Ok(())
    }

    /// Admin listing: every product matching the filters, newest first.
    pub async fn get_admin_product_page(
        &self,
        search: &ProductSearch,
        page: PageRequest,
    ) -> Result<Page<Product>, DomainError> {
        let size = self.page_size(page)?;
        debug!(page = page.page, size, "Fetching admin product page");
        self.repo.list_page(&self.db, search, page.page, size).await
    }

    /// Storefront listing: products on sale only, with their main image.
    pub async fn get_main_product_page(
        &self,
        search: &ProductSearch,
        page: PageRequest,
    ) -> Result<Page<MainProductItem>, DomainError> {
        let search = ProductSearch {
            sell_status: Some(SellStatus::Sell),
            ..search.clone()
        };
        let size = self.page_size(page)?;
        let products = self
            .repo
            .list_page(&self.db, &search, page.page, size)
            .await?;

        let ids: Vec<i64> = products.items.iter().map(|p| p.id).collect();
        let mut urls = self.repo.main_image_urls(&self.db, &ids).await?;

        Ok(products.map_items(|p| MainProductItem {
            img_url: urls.remove(&p.id),
            id: p.id,
            name: p.name,
            detail: p.detail,
            price: p.price,
            category: p.category,
            product_type: p.product_type,
        }))
    }

    pub async fn get_products_by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Vec<Product>, DomainError> {
        let search = ProductSearch {
            category: Some(category),
            ..ProductSearch::default()
        };
        self.repo.list(&self.db, &search).await
    }

    pub async fn get_products_by_type(
        &self,
        product_type: ProductType,
    ) -> Result<Vec<Product>, DomainError> {
        let search = ProductSearch {
            product_type: Some(product_type),
            ..ProductSearch::default()
        };
        self.repo.list(&self.db, &search).await
    }

    pub async fn get_all_products(&self) -> Result<Vec<Product>, DomainError> {
        self.repo.list(&self.db, &ProductSearch::default()).await
    }

    pub async fn get_all_products_page(
        &self,
        page: PageRequest,
    ) -> Result<Page<Product>, DomainError> {
        self.get_admin_product_page(&ProductSearch::default(), page)
            .await
    }

    pub async fn get_product_models(
        &self,
        product_id: i64,
    ) -> Result<Vec<ProductModel>, DomainError> {
        self.get_product(product_id).await?;
        self.repo.list_models(&self.db, product_id).await
    }

    async fn get_product(&self, product_id: i64) -> Result<Product, DomainError> {
        self.repo
            .get(&self.db, product_id)
            .await?
            .ok_or_else(|| DomainError::product_not_found(product_id))
    }

    fn page_size(&self, page: PageRequest) -> Result<u64, DomainError> {
        let size = page.effective_size(self.config.default_page_size, self.config.max_page_size);
        if page.offset(size).is_none() {
            return Err(DomainError::validation(
                "page",
                format!("page {} is out of range", page.page),
            ));
        }
        Ok(size)
    }

    async fn store_images(&self, uploads: &[ImageUpload]) -> Result<Vec<StoredImage>, DomainError> {
        let mut stored = Vec::with_capacity(uploads.len());
        for upload in uploads {
            match self.images.save(upload).await {
                Ok(s) => stored.push(s),
                Err(e) => {
                    self.discard_files(stored.iter().map(|s: &StoredImage| s.img_name.as_str()))
                        .await;
                    return Err(e);
                }
            }
        }
        Ok(stored)
    }

    async fn discard_files<'a>(&self, names: impl Iterator<Item = &'a str>) {
        for name in names {
            if let Err(e) = self.images.delete(name).await {
                warn!(img_name = name, error = %e, "Failed to remove image file");
            }
        }
    }
}

fn validate_form(form: &ProductForm) -> Result<(), DomainError> {
    if form.name.trim().is_empty() {
        return Err(DomainError::validation("name", "must not be empty"));
    }
    if form.price < 0 {
        return Err(DomainError::validation("price", "must not be negative"));
    }
    if form.product_type.category() != form.category {
        return Err(DomainError::validation(
            "product_type",
            format!(
                "{} does not belong to category {}",
                form.product_type, form.category
            ),
        ));
    }
    Ok(())
}

/// Models worth saving: labelled and in stock. Duplicate labels keep the first row.
fn valid_models(models: &[NewProductModel]) -> Result<Vec<(String, i32)>, DomainError> {
    let mut seen = HashSet::new();
    let valid: Vec<(String, i32)> = models
        .iter()
        .filter(|m| m.is_valid())
        .filter_map(|m| {
            let label = m.model_select.as_deref()?.trim().to_owned();
            let stock = m.stock?;
            seen.insert(label.clone()).then_some((label, stock))
        })
        .collect();

    if valid.is_empty() {
        warn!("No valid product models, refusing to save");
        return Err(DomainError::NoValidModels);
    }
    Ok(valid)
}

fn image_rows(stored: &[StoredImage]) -> Vec<NewProductImage> {
    stored
        .iter()
        .enumerate()
        .map(|(i, s)| NewProductImage {
            img_name: s.img_name.clone(),
            ori_img_name: s.ori_img_name.clone(),
            img_url: s.img_url.clone(),
            main: i == 0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(label: Option<&str>, stock: Option<i32>) -> NewProductModel {
        NewProductModel {
            model_select: label.map(str::to_owned),
            stock,
        }
    }

    fn form() -> ProductForm {
        ProductForm {
            name: "Clear jelly case".to_owned(),
            price: 12_000,
            detail: "soft TPU".to_owned(),
            category: ProductCategory::PhoneCase,
            product_type: ProductType::Jelly,
            sell_status: SellStatus::Sell,
            models: vec![model(Some("iPhone 15"), Some(3))],
        }
    }

    #[test]
    fn valid_models_drops_empty_rows_and_duplicates() {
        let rows = vec![
            model(Some("iPhone 15"), Some(3)),
            model(Some("iPhone 15"), Some(9)),
            model(Some("Galaxy S24"), Some(0)),
            model(None, Some(4)),
            model(Some(" Galaxy S23 "), Some(2)),
        ];
        let valid = valid_models(&rows).unwrap();
        assert_eq!(
            valid,
            vec![("iPhone 15".to_owned(), 3), ("Galaxy S23".to_owned(), 2)]
        );
    }

    #[test]
    fn valid_models_requires_at_least_one() {
        let rows = vec![model(Some("iPhone 15"), Some(0)), model(None, None)];
        assert!(matches!(
            valid_models(&rows),
            Err(DomainError::NoValidModels)
        ));
    }

    #[test]
    fn form_type_must_match_category() {
        assert!(validate_form(&form()).is_ok());
        let mismatched = ProductForm {
            product_type: ProductType::Buds,
            ..form()
        };
        assert!(matches!(
            validate_form(&mismatched),
            Err(DomainError::Validation { field, .. }) if field == "product_type"
        ));
    }

    #[test]
    fn only_first_image_is_main() {
        let stored: Vec<StoredImage> = (0..3)
            .map(|i| StoredImage {
                img_name: format!("{i}.png"),
                ori_img_name: format!("orig-{i}.png"),
                img_url: format!("/images/{i}.png"),
            })
            .collect();
        let rows = image_rows(&stored);
        assert_eq!(
            rows.iter().map(|r| r.main).collect::<Vec<_>>(),
            vec![true, false, false]
        );
    }
}
