use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use stockroom_orchestrator::{BuildError, OrchestratorError};

use crate::api::schemas::ErrorResponse;

/// Errors that can occur while starting or running the Stockroom server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error, including a backend that failed to start.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. reading the config file or binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("orchestrator error: {0}")]
    Build(#[from] BuildError),
}

/// A failed API request, rendered as `{type, message, error}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The multipart body could not be parsed.
    #[error("{0}")]
    Binding(String),

    /// A file part was present but could not be read.
    #[error("{0}")]
    FileOpen(String),

    /// A path parameter was not a valid product id.
    #[error("{0}")]
    InvalidId(String),

    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Binding(_) => "request-binding",
            Self::FileOpen(_) => "file-open",
            Self::InvalidId(_) => "request-validation",
            Self::Orchestrator(e) => e.kind(),
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Binding(_) => "Invalid request body",
            Self::FileOpen(_) => "Ensure validate file.",
            Self::InvalidId(_) => "Invalid product id",
            Self::Orchestrator(e) => e.message(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Binding(_) | Self::FileOpen(_) | Self::InvalidId(_) => StatusCode::BAD_REQUEST,
            Self::Orchestrator(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Orchestrator(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Self::Orchestrator(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), error = %self, "request failed");
        }
        let body = ErrorResponse {
            kind: self.kind().to_owned(),
            message: self.message().to_owned(),
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
