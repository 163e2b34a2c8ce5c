use axum::Extension;
use axum::extract::{OriginalUri, Path};
use axum::response::{IntoResponse, Response};
use tracing::field::Empty;

use super::{ApiResult, Json, JsonBody, Principal, Svc, created_json, no_content};
use crate::api::rest::dto::{AddCartItemReq, CartDto, CartItemDto, UpdateCartItemReq};

#[tracing::instrument(skip(svc), fields(user.id = %user_id, request_id = Empty))]
pub async fn get_cart(
    Principal(user_id): Principal,
    Extension(svc): Extension<Svc>,
) -> ApiResult<JsonBody<CartDto>> {
    let cart = svc.carts.get_cart(&user_id).await?;
    Ok(Json(cart.into()))
}

#[tracing::instrument(
    skip(svc, uri, req),
    fields(user.id = %user_id, product.id = req.product_id, request_id = Empty)
)]
pub async fn add_cart_item(
    OriginalUri(uri): OriginalUri,
    Principal(user_id): Principal,
    Extension(svc): Extension<Svc>,
    Json(req): Json<AddCartItemReq>,
) -> ApiResult<Response> {
    let item = svc.carts.add_item(&user_id, req.into()).await?;
    let id = item.id.to_string();
    Ok(created_json(CartItemDto::from(item), &uri, &id).into_response())
}

#[tracing::instrument(skip(svc, req), fields(user.id = %user_id, cart_item.id = id, request_id = Empty))]
pub async fn update_cart_item(
    Principal(user_id): Principal,
    Extension(svc): Extension<Svc>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCartItemReq>,
) -> ApiResult<JsonBody<CartItemDto>> {
    let item = svc.carts.update_item_count(&user_id, id, req.count).await?;
    Ok(Json(item.into()))
}

#[tracing::instrument(skip(svc), fields(user.id = %user_id, cart_item.id = id, request_id = Empty))]
pub async fn remove_cart_item(
    Principal(user_id): Principal,
    Extension(svc): Extension<Svc>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    svc.carts.remove_item(&user_id, id).await?;
    Ok(no_content().into_response())
}
