use axum::Json;
use axum::extract::State;

use super::AppState;
use super::schemas::{HealthResponse, MessageResponse};

/// `GET /` -- greeting.
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    summary = "Hello",
    responses(
        (status = 200, description = "Service is up", body = MessageResponse)
    )
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello World".into(),
    })
}

/// `GET /health` -- service status together with request counters.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    summary = "Health check",
    description = "Returns service status and a snapshot of product operation counters.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        metrics: state.orchestrator.metrics().snapshot(),
    })
}
