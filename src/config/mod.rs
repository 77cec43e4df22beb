//! Rate limiter configuration
//!
//! This module defines the immutable configuration a limiter is constructed
//! with: the algorithm, the limit, the window length, and the key prefix.

mod types;
mod validation;


// Re-export public types
pub use types::{Algorithm, RateLimitConfig, DEFAULT_PREFIX};
pub use validation::Validate;
