//! Error types for the proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

// == Backend Error Enum ==
/// Failures reported by a backing store.
///
/// The display text is what clients see, so it must stay stable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The store holds no value for the key
    #[error("redis: nil")]
    NotFound,

    /// The store could not be reached
    #[error("{0}")]
    Connection(String),

    /// The store was reached but refused the command
    #[error("{0}")]
    Command(String),

    /// The store did not answer within the configured timeout
    #[error("redis: timeout after {0}ms")]
    Timeout(u64),
}

// == Cache Error Enum ==
/// Unified error type for the proxy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Empty or missing key
    #[error("Bad Request")]
    BadRequest,

    /// A component could not be constructed at startup
    #[error("{component} not initialized: {reason}")]
    NotInitialized { component: String, reason: String },

    /// Failure passed through from the backing store
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A key or fetched payload could not be read as a string
    #[error("decode: '{key}' is not a valid string: {reason}")]
    Decode { key: String, reason: String },
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        // Only a bad key changes the status; everything else is reported as 200 with the error text.
        let status = match &self {
            CacheError::BadRequest => StatusCode::BAD_REQUEST,
            CacheError::NotInitialized { .. }
            | CacheError::Backend(_)
            | CacheError::Decode { .. } => StatusCode::OK,
        };

        (status, self.to_string()).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy.
pub type Result<T> = std::result::Result<T, CacheError>;
