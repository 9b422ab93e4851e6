//! Error types for the monitoring API
//!
//! Provides unified error handling using thiserror. Every variant renders as
//! the envelope `{error, message, code?}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::store::StoreError;

// == API Error Enum ==
/// Unified error type for the monitoring API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required request field was absent or empty
    #[error("Missing parameters: {0}")]
    MissingParameters(String),

    /// A request field was present but malformed
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The document store rejected or failed the call
    #[error("Store call failed in {context}: {source}")]
    Upstream {
        /// Route that issued the store call, e.g. `/ver`
        context: &'static str,
        source: StoreError,
    },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Wraps a store failure raised while serving `context`.
    pub fn upstream(context: &'static str, source: StoreError) -> Self {
        ApiError::Upstream { context, source }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameters(_) | ApiError::InvalidParameter(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Upstream { .. } | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::MissingParameters(msg) => ErrorResponse::new("Faltan parámetros", msg),
            ApiError::InvalidParameter(msg) => ErrorResponse::new("Parámetro inválido", msg),
            ApiError::Upstream { context, source } => {
                ErrorResponse::new(format!("Error en {}", context), source.message)
                    .with_code(source.code)
            }
            ApiError::Internal(msg) => ErrorResponse::new("Error interno", msg),
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the monitoring API.
pub type Result<T> = std::result::Result<T, ApiError>;
