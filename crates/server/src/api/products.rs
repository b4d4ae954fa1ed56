use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Path, Query, State};

use stockroom_core::{CreateProductRequest, Pagination, ProductId, UploadedFile};

use super::AppState;
use super::schemas::{
    CreateProductForm, CreateProductResponse, DeleteProductResponse, ErrorResponse,
    ListProductsParams, ListProductsResponse,
};
use crate::error::ApiError;

const NAME_FIELD: &str = "name";
const FILE_FIELD: &str = "product_photo";

/// `GET /products` -- one page of products in insertion order.
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    summary = "List products",
    description = "Returns one page of products. Invalid or non-positive `page` and `limit` values fall back to 1 and 10. Always succeeds; an out-of-range page is empty.",
    params(ListProductsParams),
    responses(
        (status = 200, description = "Page of products", body = ListProductsResponse)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ListProductsParams>, QueryRejection>,
) -> Json<ListProductsResponse> {
    let params = query.map(|Query(params)| params).unwrap_or_default();
    let pagination = Pagination::from_query(params.page.as_deref(), params.limit.as_deref());
    let products = state.orchestrator.list_products(pagination).await;

    Json(ListProductsResponse {
        kind: "get-products".into(),
        message: "Products fetched successfully".into(),
        products,
    })
}

/// `POST /products` -- upload an image and create its product.
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    summary = "Create product",
    description = "Stores the uploaded image under its filename, records the product, and returns a cache token that resolves the image for a limited time.",
    request_body(content = CreateProductForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product created", body = CreateProductResponse),
        (status = 400, description = "Malformed form or invalid fields", body = ErrorResponse),
        (status = 500, description = "Blob or metadata store failure", body = ErrorResponse)
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<CreateProductResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::Binding(e.body_text()))?;
    let mut request = CreateProductRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Binding(e.body_text()))?
    {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some(NAME_FIELD) => {
                request.name = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Binding(e.body_text()))?;
            }
            Some(FILE_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_owned();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::FileOpen(e.body_text()))?;
                request.file = Some(UploadedFile::new(filename, data));
            }
            _ => {}
        }
    }

    let created = state.orchestrator.create_product(request).await?;

    Ok(Json(CreateProductResponse {
        kind: "create-product".into(),
        message: format!("File uploaded successfully {}", created.blob_key),
        product: created.product,
        cache_id: created.cache_token,
        image_temp_url: created.image_temp_url,
        image_real_url: created.image_real_url,
    }))
}

/// `DELETE /products/{id}` -- delete a product and its image.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    summary = "Delete product",
    description = "Deletes the stored image, then the product row. If the image cannot be deleted the product is kept and the call can be retried. Cache tokens are not invalidated.",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = DeleteProductResponse),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 404, description = "No such product", body = ErrorResponse),
        (status = 500, description = "Blob or metadata store failure", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteProductResponse>, ApiError> {
    let id: ProductId = id
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| ApiError::InvalidId(e.to_string()))?;

    state.orchestrator.delete_product(id).await?;

    Ok(Json(DeleteProductResponse {
        kind: "delete-product".into(),
        message: "Product deleted successfully".into(),
    }))
}
