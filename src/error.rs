//! Error types for the shard cache
//!
//! Provides unified error handling using thiserror. Rejections that are part
//! of normal cache operation (oversize, duplicate id, miss) are not errors;
//! see [`crate::cache::Outcome`].

use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for contract violations and driver failures.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Configuration that cannot produce a working cache
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed command received by the driver
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Failure reading commands or writing responses
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == Error Response Conversion ==
impl From<&CacheError> for ErrorResponse {
    fn from(err: &CacheError) -> Self {
        ErrorResponse::new(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the shard cache.
pub type Result<T> = std::result::Result<T, CacheError>;
