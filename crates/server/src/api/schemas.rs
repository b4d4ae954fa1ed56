use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use stockroom_core::Product;
use stockroom_orchestrator::MetricsSnapshot;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable discriminator for the failure.
    #[serde(rename = "type")]
    #[schema(example = "product-not-found")]
    pub kind: String,
    /// Human readable summary.
    #[schema(example = "Product not found in database")]
    pub message: String,
    /// Underlying cause.
    #[schema(example = "product not found: 42")]
    pub error: String,
}

/// A bare message, returned by `GET /`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Hello World")]
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    /// Request counters since startup.
    pub metrics: MetricsSnapshot,
}

/// Query parameters for `GET /products`.
///
/// Both are read as strings: anything that is not a positive integer falls
/// back to the default instead of failing the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsParams {
    /// 1-based page number (default 1).
    #[param(example = "2")]
    pub page: Option<String>,
    /// Page size (default 10).
    #[param(example = "5")]
    pub limit: Option<String>,
}

/// One page of products.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListProductsResponse {
    #[serde(rename = "type")]
    #[schema(example = "get-products")]
    pub kind: String,
    #[schema(example = "Products fetched successfully")]
    pub message: String,
    pub products: Vec<Product>,
}

/// Multipart form accepted by `POST /products`.
#[derive(Debug, ToSchema)]
pub struct CreateProductForm {
    /// Display name, 1 to 255 characters.
    pub name: String,
    /// Image file. Its filename becomes the object key.
    #[schema(value_type = String, format = Binary)]
    pub product_photo: Vec<u8>,
}

/// A created product and the URLs its image can be read from.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateProductResponse {
    #[serde(rename = "type")]
    #[schema(example = "create-product")]
    pub kind: String,
    #[schema(example = "File uploaded successfully chair.png")]
    pub message: String,
    pub product: Product,
    /// Token for `GET /cache/{cache_id}`, valid until the cache entry expires.
    #[schema(example = "42")]
    pub cache_id: String,
    #[schema(example = "/cache/42")]
    pub image_temp_url: String,
    /// Durable object URL.
    #[schema(example = "http://localhost:9000/products/chair.png")]
    pub image_real_url: String,
}

/// Confirmation of a delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteProductResponse {
    #[serde(rename = "type")]
    #[schema(example = "delete-product")]
    pub kind: String,
    #[schema(example = "Product deleted successfully")]
    pub message: String,
}
