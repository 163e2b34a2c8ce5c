use axum::Extension;
use axum::extract::OriginalUri;
use axum::response::{IntoResponse, Response};
use tracing::{field::Empty, info};

use super::{ApiResult, Json, JsonBody, Principal, Svc, created_json};
use crate::api::rest::dto::{RegisterUserReq, UserDto};

#[tracing::instrument(skip(svc, uri, req), fields(user.id = %req.user_id, request_id = Empty))]
pub async fn register_user(
    OriginalUri(uri): OriginalUri,
    Extension(svc): Extension<Svc>,
    Json(req): Json<RegisterUserReq>,
) -> ApiResult<Response> {
    info!(user_id = %req.user_id, "Registering user");
    let user = svc.users.register_user(req.into()).await?;
    let id = user.user_id.clone();
    Ok(created_json(UserDto::from(user), &uri, &id).into_response())
}

#[tracing::instrument(skip(svc), fields(user.id = %user_id, request_id = Empty))]
pub async fn get_me(
    Principal(user_id): Principal,
    Extension(svc): Extension<Svc>,
) -> ApiResult<JsonBody<UserDto>> {
    let user = svc.users.get_user(&user_id).await?;
    Ok(Json(user.into()))
}
