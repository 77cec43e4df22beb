//! Core RateLimiter facade
//!
//! Owns the store handle and the validated configuration, dispatches each
//! call to the configured engine, and wraps any driver failure in the store
//! error kind. Each `limit` call is independent; there is no background
//! activity and no state beyond the cached script handle.

use super::clock::{Clock, SystemClock};
use super::fixed;
use super::sliding::SlidingWindowEngine;
use super::types::RateLimitResponse;
use crate::config::{Algorithm, RateLimitConfig, Validate};
use crate::error::{RateLimitError, Result};
use crate::storage::CounterStore;
use std::sync::Arc;
use tracing::debug;

/// Distributed rate limiter over a shared counter store
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn CounterStore>,
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
    sliding: Arc<SlidingWindowEngine>,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RateLimiter {
    /// Create a limiter using the system clock.
    ///
    /// Validates the configuration eagerly and returns
    /// [`RateLimitError::Config`] when the limit or window is not positive.
    pub fn new(store: Arc<dyn CounterStore>, config: RateLimitConfig) -> Result<Self> {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    /// Create a limiter with an injected time provider.
    pub fn with_clock(
        store: Arc<dyn CounterStore>,
        config: RateLimitConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        debug!(
            "Creating rate limiter: {:?}, limit {} per {}s",
            config.algorithm, config.limit, config.window
        );

        Ok(Self {
            store,
            config,
            clock,
            sliding: Arc::new(SlidingWindowEngine::new()),
        })
    }

    /// Check whether one event for `identifier` is admitted.
    ///
    /// The identifier participates verbatim in the counter key. Any store
    /// failure is returned as [`RateLimitError::Store`] with the driver
    /// error preserved as the cause; counters touched before the failure
    /// self-expire, so no cleanup is needed.
    pub async fn limit(&self, identifier: &str) -> Result<RateLimitResponse> {
        let now_ms = self.clock.now_ms();

        let result = match self.config.algorithm {
            Algorithm::FixedWindow => {
                fixed::check(self.store.as_ref(), &self.config, now_ms, identifier).await
            }
            Algorithm::SlidingWindow => {
                self.sliding
                    .check(self.store.as_ref(), &self.config, now_ms, identifier)
                    .await
            }
        };

        result.map_err(RateLimitError::Store)
    }

    /// The configuration this limiter was built with
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }
}
