use axum::Extension;
use axum::extract::{OriginalUri, Path};
use axum::response::{IntoResponse, Response};
use tracing::{field::Empty, info};

use super::{ApiResult, Json, JsonBody, Principal, Svc, created_json, no_content};
use crate::api::rest::dto::{OrderDto, OrderReq, RemoveOrderItemReq};

/// Current pending order, reconciled against the cart.
#[tracing::instrument(skip(svc), fields(user.id = %user_id, request_id = Empty))]
pub async fn get_order(
    Principal(user_id): Principal,
    Extension(svc): Extension<Svc>,
) -> ApiResult<JsonBody<OrderDto>> {
    let view = svc.orders.get_order(&user_id).await?;
    Ok(Json(view.into()))
}

#[tracing::instrument(skip(svc, uri, req), fields(user.id = %user_id, request_id = Empty))]
pub async fn create_order(
    OriginalUri(uri): OriginalUri,
    Principal(user_id): Principal,
    Extension(svc): Extension<Svc>,
    Json(req): Json<OrderReq>,
) -> ApiResult<Response> {
    let ids = req.cart_item_ids()?;
    info!(items = ids.len(), "Creating order from cart");
    let view = svc.orders.create_order(&user_id, ids).await?;
    let order_no = view.order_no.map(|n| n.to_string()).unwrap_or_default();
    Ok(created_json(OrderDto::from(view), &uri, &order_no).into_response())
}

#[tracing::instrument(
    skip(svc, req),
    fields(user.id = %user_id, cart_item.id = req.cart_item_id, request_id = Empty)
)]
pub async fn remove_order_item(
    Principal(user_id): Principal,
    Extension(svc): Extension<Svc>,
    Json(req): Json<RemoveOrderItemReq>,
) -> ApiResult<JsonBody<OrderDto>> {
    let view = svc.orders.remove_order(req.cart_item_id, &user_id).await?;
    Ok(Json(view.into()))
}

#[tracing::instrument(skip(svc), fields(user.id = %user_id, order.id = id, request_id = Empty))]
pub async fn cancel_order(
    Principal(user_id): Principal,
    Extension(svc): Extension<Svc>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    svc.orders.cancel_order(&user_id, id).await?;
    Ok(no_content().into_response())
}
