//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Misconfiguration detected while constructing a cache.
///
/// Lookups never fail on the cache's behalf; only loaders do.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A finite TTL must be longer than zero
    #[error("Invalid TTL: {0}")]
    InvalidTtl(String),
}

// == Database Error Enum ==
/// Failures reported by the backing data source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    /// The source could not be reached or refused the request
    #[error("Database unavailable: {0}")]
    Unavailable(String),
}

// == API Error Enum ==
/// Unified error type for the request layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The loader failed while filling a cache miss
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for request handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
