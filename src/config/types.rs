//! Configuration types and constructors

use serde::{Deserialize, Serialize};

/// Key prefix used when the configuration does not provide one
pub const DEFAULT_PREFIX: &str = "ratelimit";

/// Rate limiting algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    /// Epoch-aligned windows; admissions count against the window containing
    /// their timestamp
    #[serde(rename = "fixed")]
    FixedWindow,
    /// Blends the current and previous windows with a linear weight
    #[serde(rename = "sliding")]
    SlidingWindow,
}

/// Immutable limiter configuration
///
/// Built through [`RateLimitConfig::fixed_window`] or
/// [`RateLimitConfig::sliding_window`] and validated once at limiter
/// construction. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Which algorithm makes the admission decision
    pub algorithm: Algorithm,
    /// Maximum admissions per window
    pub limit: i64,
    /// Window length in seconds
    pub window: i64,
    /// Key namespace prefix; `None` or empty means [`DEFAULT_PREFIX`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl RateLimitConfig {
    /// Configuration for the fixed window algorithm
    pub fn fixed_window(limit: i64, window: i64) -> Self {
        Self {
            algorithm: Algorithm::FixedWindow,
            limit,
            window,
            prefix: None,
        }
    }

    /// Configuration for the sliding window algorithm
    pub fn sliding_window(limit: i64, window: i64) -> Self {
        Self {
            algorithm: Algorithm::SlidingWindow,
            limit,
            window,
            prefix: None,
        }
    }

    /// Set the key namespace prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// The effective key prefix
    pub fn prefix(&self) -> &str {
        match self.prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => prefix,
            _ => DEFAULT_PREFIX,
        }
    }

    /// Window length in milliseconds
    pub(crate) fn window_ms(&self) -> i64 {
        self.window * 1000
    }
}
