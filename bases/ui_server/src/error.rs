// bases/ui_server/src/error.rs
//! Handler-boundary error type. Every failure becomes `{"error": "..."}`
//! with a status code that matches its cause.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folder_browser::BrowseError;
use serde_json::json;
use session_registry::RegistryError;
use thiserror::Error;
use ytdlp_bridge::BridgeError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Browse(#[from] BrowseError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Bridge(err) => match err {
                BridgeError::InvalidUrl(_) | BridgeError::ToolFailed { .. } => {
                    StatusCode::BAD_REQUEST
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Browse(err) => match err {
                BrowseError::PermissionDenied(_) => StatusCode::FORBIDDEN,
                BrowseError::NotADirectory(_)
                | BrowseError::InvalidName(_)
                | BrowseError::AlreadyExists(_)
                | BrowseError::EmptyArchive => StatusCode::BAD_REQUEST,
                BrowseError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Registry(err) => match err {
                RegistryError::UnknownSession(_) => StatusCode::NOT_FOUND,
                RegistryError::WrongState { .. } => StatusCode::BAD_REQUEST,
            },
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        } else {
            tracing::debug!("request rejected: {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
