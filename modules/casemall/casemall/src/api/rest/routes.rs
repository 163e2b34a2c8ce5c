use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post, put};
use axum::{Extension, Json, Router, middleware};
use tower_http::services::ServeDir;
use utoipa::OpenApi;

use super::handlers::{self, carts, orders, products, users};
use super::openapi::ApiDoc;
use super::problem::{self, problem_context_middleware};
use crate::config::CasemallConfig;
use crate::module::ConcreteAppServices;

pub const API_PREFIX: &str = "/casemall/v1";

/// Images accepted in a single admin upload before the body limit trips.
const IMAGES_PER_UPLOAD: usize = 10;

/// Build the module router: the versioned REST API, stored images and `/health`.
pub(crate) fn router(services: Arc<ConcreteAppServices>, config: &CasemallConfig) -> Router {
    let upload_limit = config.max_image_bytes.saturating_mul(IMAGES_PER_UPLOAD);

    let admin = Router::new()
        .route(
            "/admin/products",
            get(products::list_admin_products).post(products::create_product),
        )
        .route(
            "/admin/products/{id}",
            put(products::update_product).delete(products::delete_product),
        )
        .layer(DefaultBodyLimit::max(upload_limit));

    let api = Router::new()
        .route("/users", post(users::register_user))
        .route("/users/me", get(users::get_me))
        .route("/products", get(products::list_main_products))
        .route("/products/{id}", get(products::get_product))
        .route("/products/{id}/models", get(products::list_product_models))
        .route("/categories", get(products::list_categories))
        .route("/cart", get(carts::get_cart))
        .route("/cart/items", post(carts::add_cart_item))
        .route(
            "/cart/items/{id}",
            patch(carts::update_cart_item).delete(carts::remove_cart_item),
        )
        .route("/order", get(orders::get_order).post(orders::create_order))
        .route("/order/remove", post(orders::remove_order_item))
        .route("/orders/{id}/cancel", post(orders::cancel_order))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .merge(admin)
        .fallback(|| async { problem::not_found("no such route") })
        .layer(middleware::from_fn(problem_context_middleware))
        .layer(Extension(services));

    Router::new()
        .route("/health", get(handlers::health))
        .nest(API_PREFIX, api)
        .nest_service(
            config.image_url_prefix.trim_end_matches('/'),
            ServeDir::new(&config.image_dir),
        )
}
