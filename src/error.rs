use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtensionError>;

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("Dependency not found: {type_name}")]
    DependencyNotFound { type_name: String },

    #[error("Failed to downcast type: {type_name}")]
    DowncastFailed { type_name: String },

    #[error("Module registration failed: {message}")]
    ModuleRegistrationFailed { message: String },

    #[error("Invalid configuration for {key}: {message}")]
    Config { key: String, message: String },

    #[error("Privileged execution failed: {0}")]
    PrivilegedExecution(String),

    #[error("UI page already registered: {page_id}")]
    DuplicatePage { page_id: String },
}

impl ExtensionError {
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// JSON error body shared by handler errors and guard rejections.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: String,
    pub timestamp: String,
}

impl ErrorBody {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            message: message.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl IntoResponse for ExtensionError {
    fn into_response(self) -> Response {
        // Only the privileged bridge fails on a request path, and that is
        // always a server-side failure.
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        tracing::error!(%status, error = %self, "request failed");
        (status, Json(ErrorBody::new(status, self.to_string()))).into_response()
    }
}
