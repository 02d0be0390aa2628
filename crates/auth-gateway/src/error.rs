//! Unified error handling for the gateway.
//!
//! Every per-request failure ends up as an [`ApiError`], which renders a
//! consistent JSON body so handlers can use `?` throughout.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::auth::{ExchangeError, SessionError};

pub use shared_types::ErrorResponse;

/// Unified error type for API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authorization code could not be turned into an identity
    #[error("Authorization exchange failed: {0}")]
    Exchange(#[from] ExchangeError),

    /// Identity is valid but not on the email allowlist
    #[error("{0}")]
    AllowlistRejection(String),

    /// Session token is malformed, mis-signed or expired
    #[error("Session verification failed: {0}")]
    Verification(#[from] SessionError),

    /// Server is misconfigured
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Exchange(ExchangeError::MissingCode) => StatusCode::BAD_REQUEST,
            ApiError::Exchange(_) => StatusCode::BAD_GATEWAY,
            ApiError::AllowlistRejection(_) => StatusCode::FORBIDDEN,
            ApiError::Verification(_) => StatusCode::UNAUTHORIZED,
            ApiError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Exchange(ExchangeError::MissingCode) => {
                ErrorResponse::new("Missing authorization code")
            }
            ApiError::Exchange(e) => {
                // Upstream bodies stay in the log; the client only learns the stage.
                tracing::warn!("Authorization exchange failed while {}: {}", e.stage(), e);
                ErrorResponse::new("Authorization exchange failed")
                    .with_details(format!("failed while {}", e.stage()))
            }
            ApiError::AllowlistRejection(msg) => ErrorResponse::new(msg.clone()),
            ApiError::Verification(e) => {
                tracing::warn!("Session token rejected: {}", e);
                ErrorResponse::new("Invalid or expired token")
            }
            ApiError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                ErrorResponse::new("Server configuration error")
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
