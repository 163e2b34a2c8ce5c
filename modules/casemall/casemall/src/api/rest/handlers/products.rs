use axum::Extension;
use axum::extract::{Multipart, OriginalUri, Path, Query};
use axum::response::{IntoResponse, Response};
use casemall_sdk::{ImageUpload, ProductCategory, ProductForm};
use tracing::{debug, field::Empty, info};

use super::{AdminPrincipal, ApiResult, Json, JsonBody, Svc, created_json, no_content};
use crate::api::rest::dto::{
    CategoryDto, MainProductDto, PageDto, ProductDetailDto, ProductDto, ProductFormReq,
    ProductListQuery, ProductModelDto,
};
use crate::api::rest::problem::{self, Problem};

const PRODUCT_PART: &str = "product";
const IMAGES_PART: &str = "images";

/// Storefront listing; only products on sale are returned.
#[tracing::instrument(skip(svc, query), fields(page = query.page, request_id = Empty))]
pub async fn list_main_products(
    Extension(svc): Extension<Svc>,
    Query(query): Query<ProductListQuery>,
) -> ApiResult<JsonBody<PageDto<MainProductDto>>> {
    let (search, page) = query.into_search()?;
    let page = svc.products.get_main_product_page(&search, page).await?;
    Ok(Json(PageDto::from_page(page)))
}

#[tracing::instrument(skip(svc), fields(product.id = id, request_id = Empty))]
pub async fn get_product(
    Extension(svc): Extension<Svc>,
    Path(id): Path<i64>,
) -> ApiResult<JsonBody<ProductDetailDto>> {
    let detail = svc.products.get_product_detail(id).await?;
    Ok(Json(detail.into()))
}

#[tracing::instrument(skip(svc), fields(product.id = id, request_id = Empty))]
pub async fn list_product_models(
    Extension(svc): Extension<Svc>,
    Path(id): Path<i64>,
) -> ApiResult<JsonBody<Vec<ProductModelDto>>> {
    let models = svc.products.get_product_models(id).await?;
    Ok(Json(models.into_iter().map(Into::into).collect()))
}

pub async fn list_categories() -> JsonBody<Vec<CategoryDto>> {
    Json(ProductCategory::ALL.into_iter().map(Into::into).collect())
}

#[tracing::instrument(skip(svc, query), fields(admin.id = %admin_id, request_id = Empty))]
pub async fn list_admin_products(
    AdminPrincipal(admin_id): AdminPrincipal,
    Extension(svc): Extension<Svc>,
    Query(query): Query<ProductListQuery>,
) -> ApiResult<JsonBody<PageDto<ProductDto>>> {
    let (search, page) = query.into_search()?;
    let page = svc.products.get_admin_product_page(&search, page).await?;
    Ok(Json(PageDto::from_page(page)))
}

#[tracing::instrument(skip(svc, uri, multipart), fields(admin.id = %admin_id, request_id = Empty))]
pub async fn create_product(
    OriginalUri(uri): OriginalUri,
    AdminPrincipal(admin_id): AdminPrincipal,
    Extension(svc): Extension<Svc>,
    multipart: Multipart,
) -> ApiResult<Response> {
    let (form, images) = read_product_form(multipart).await?;
    info!(name = %form.name, images = images.len(), "Creating product");

    let id = svc.products.save_product(form, images).await?;
    let detail = svc.products.get_product_detail(id).await?;
    Ok(created_json(ProductDetailDto::from(detail), &uri, &id.to_string()).into_response())
}

#[tracing::instrument(skip(svc, multipart), fields(admin.id = %admin_id, product.id = id, request_id = Empty))]
pub async fn update_product(
    AdminPrincipal(admin_id): AdminPrincipal,
    Extension(svc): Extension<Svc>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> ApiResult<JsonBody<ProductDetailDto>> {
    let (form, images) = read_product_form(multipart).await?;
    let detail = svc.products.update_product(id, form, images).await?;
    Ok(Json(detail.into()))
}

#[tracing::instrument(skip(svc), fields(admin.id = %admin_id, product.id = id, request_id = Empty))]
pub async fn delete_product(
    AdminPrincipal(admin_id): AdminPrincipal,
    Extension(svc): Extension<Svc>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    svc.products.delete_product(id).await?;
    Ok(no_content().into_response())
}

/// Split the admin form into the JSON `product` part and the `images` files.
async fn read_product_form(
    mut multipart: Multipart,
) -> Result<(ProductForm, Vec<ImageUpload>), Problem> {
    let mut product: Option<ProductFormReq> = None;
    let mut images = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| problem::bad_request(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            PRODUCT_PART => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| problem::bad_request(format!("unreadable product part: {e}")))?;
                let req = serde_json::from_slice(&bytes)
                    .map_err(|e| problem::bad_request(format!("invalid product JSON: {e}")))?;
                product = Some(req);
            }
            IMAGES_PART => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let content_type = field.content_type().map(ToOwned::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| problem::bad_request(format!("unreadable image part: {e}")))?;
                // browsers send an empty part when no file was chosen
                if bytes.is_empty() && file_name.is_empty() {
                    continue;
                }
                images.push(ImageUpload {
                    original_name: if file_name.is_empty() {
                        "image".to_owned()
                    } else {
                        file_name
                    },
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            other => debug!(part = other, "Ignoring unknown multipart part"),
        }
    }

    let product = product
        .ok_or_else(|| problem::bad_request(format!("missing '{PRODUCT_PART}' part")))?;
    Ok((product.into_form()?, images))
}
