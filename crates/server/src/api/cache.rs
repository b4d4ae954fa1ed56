use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use super::AppState;
use super::schemas::ErrorResponse;
use crate::error::ApiError;

/// `GET /cache/{cache_id}` -- stream the image behind a cache token.
///
/// Only the cache is consulted. Once the token's entry expires this is a
/// 404 even if the product still exists.
#[utoipa::path(
    get,
    path = "/cache/{cache_id}",
    tag = "Images",
    summary = "Read cached image",
    description = "Resolves a cache token to its image and streams it as an attachment. Tokens expire after the configured TTL.",
    params(("cache_id" = String, Path, description = "Cache token returned when the product was created")),
    responses(
        (status = 200, description = "Image bytes, streamed as an attachment"),
        (status = 404, description = "Token expired or image missing", body = ErrorResponse)
    )
)]
pub async fn read_image(
    State(state): State<AppState>,
    Path(cache_id): Path<String>,
) -> Result<Response, ApiError> {
    let image = state.orchestrator.read_product_image(&cache_id).await?;

    let disposition = image.content_disposition();
    let headers = [
        (header::CONTENT_TYPE, image.content_type),
        (header::CONTENT_LENGTH, image.content_length.to_string()),
        (header::CONTENT_DISPOSITION, disposition),
    ];
    Ok((headers, Body::from_stream(image.body)).into_response())
}
