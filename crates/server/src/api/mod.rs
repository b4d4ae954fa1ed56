pub mod cache;
pub mod health;
pub mod openapi;
pub mod products;
pub mod schemas;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use stockroom_orchestrator::ProductOrchestrator;

use self::openapi::ApiDoc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ProductOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<ProductOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

/// Build the router with every route, request tracing, and the upload size
/// limit.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/products/{id}", delete(products::delete_product))
        .route("/cache/{cache_id}", get(cache::read_image))
        .route("/api-doc/openapi.json", get(openapi_json))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
