//! Axum handlers, one submodule per resource.

use std::sync::Arc;

use axum::Json;
use axum::response::IntoResponse;

use crate::module::ConcreteAppServices;

use super::auth::{AdminPrincipal, Principal};
use super::response::{ApiResult, JsonBody, created_json, no_content};

pub(super) mod carts;
pub(super) mod orders;
pub(super) mod products;
pub(super) mod users;

type Svc = Arc<ConcreteAppServices>;

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct HealthDto {
    pub status: &'static str,
}

pub async fn health() -> impl IntoResponse {
    Json(HealthDto { status: "ok" })
}
