//! Common error types for the image generation gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::admin::patch::SettingsError;
use crate::backend::catalog::ProviderKey;

/// Message returned to callers for any generation failure
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate image. Please try again later.";

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Provider disabled: {0}")]
    ProviderDisabled(ProviderKey),

    #[error(transparent)]
    Validation(#[from] SettingsError),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Provider error: {0}")]
    ProviderFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response format
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub r#type: String,
    pub code: Option<String>,
}

impl AppError {
    /// Text safe to show to the caller. Upstream and internal detail never
    /// leaves the process.
    pub fn client_message(&self) -> String {
        match self {
            AppError::InvalidRequest(_) | AppError::Validation(_) | AppError::Json(_) => {
                self.to_string()
            }
            AppError::Unauthorized(_) => "unauthorized".to_string(),
            AppError::ProviderDisabled(_) => "provider disabled".to_string(),
            AppError::Timeout(_) | AppError::ProviderFailure(_) | AppError::HttpClient(_) => {
                GENERATION_FAILED_MESSAGE.to_string()
            }
            AppError::Config(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, code) = match &self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "server_error", None),
            AppError::Json(_) => (StatusCode::BAD_REQUEST, "invalid_request_error", Some("invalid_json")),
            AppError::HttpClient(_) => (StatusCode::INTERNAL_SERVER_ERROR, "generation_error", None),
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request_error", None),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "authentication_error", Some("invalid_admin_token")),
            AppError::ProviderDisabled(_) => (StatusCode::FORBIDDEN, "permission_error", Some("provider_disabled")),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "invalid_request_error", Some("invalid_settings")),
            AppError::Timeout(_) => (StatusCode::INTERNAL_SERVER_ERROR, "generation_error", Some("timeout")),
            AppError::ProviderFailure(_) => (StatusCode::INTERNAL_SERVER_ERROR, "generation_error", None),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "server_error", None),
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                message: self.client_message(),
                r#type: error_type.to_string(),
                code: code.map(|c| c.to_string()),
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
