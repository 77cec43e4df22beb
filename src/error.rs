//! Error types for the rate limiter

use crate::storage::StoreError;
use thiserror::Error;

/// Result type alias for the rate limiter
pub type Result<T> = std::result::Result<T, RateLimitError>;

/// Main error type for the rate limiter
#[derive(Error, Debug)]
pub enum RateLimitError {
    /// Configuration errors, raised when a limiter is constructed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Store errors raised while checking a limit, with the driver error
    /// preserved as the cause
    #[error("Failed to check rate limit")]
    Store(#[source] StoreError),
}

impl RateLimitError {
    /// Whether this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Whether this is a store operation error
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}
