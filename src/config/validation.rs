//! Configuration validation

use super::types::RateLimitConfig;
use crate::error::{RateLimitError, Result};
use tracing::debug;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for RateLimitConfig {
    fn validate(&self) -> Result<()> {
        debug!("Validating rate limit configuration");

        if self.limit <= 0 {
            return Err(RateLimitError::Config(
                "Rate limit must be greater than 0".to_string(),
            ));
        }

        if self.window <= 0 {
            return Err(RateLimitError::Config(
                "Window must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
