#![allow(clippy::needless_for_each)]

use stockroom_core::Product;
use stockroom_orchestrator::MetricsSnapshot;

use super::schemas::{
    CreateProductForm, CreateProductResponse, DeleteProductResponse, ErrorResponse,
    HealthResponse, ListProductsResponse, MessageResponse,
};

#[derive(utoipa::OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        version = "0.1.0",
        description = "Upload product images, list products, and read images back through short-lived cache tokens.",
        license(name = "Apache-2.0")
    ),
    tags(
        (name = "Health", description = "Service health and counters"),
        (name = "Products", description = "Product creation, listing, and deletion"),
        (name = "Images", description = "Cache-token image reads")
    ),
    paths(
        super::health::root,
        super::health::health,
        super::products::list_products,
        super::products::create_product,
        super::products::delete_product,
        super::cache::read_image,
    ),
    components(schemas(
        Product,
        MetricsSnapshot,
        ErrorResponse,
        MessageResponse,
        HealthResponse,
        ListProductsResponse,
        CreateProductForm,
        CreateProductResponse,
        DeleteProductResponse,
    ))
)]
pub struct ApiDoc;
