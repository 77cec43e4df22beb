//! Fixed window engine
//!
//! Partitions wall time into epoch-aligned windows of `window` seconds and
//! counts admissions with `INCR`. Atomic admission is guaranteed by the
//! store: concurrent callers never observe the same count.

use super::types::RateLimitResponse;
use super::utils::{counter_key, window_index};
use crate::config::RateLimitConfig;
use crate::storage::{CounterStore, StoreError};
use tracing::debug;

pub(crate) async fn check(
    store: &dyn CounterStore,
    config: &RateLimitConfig,
    now_ms: i64,
    identifier: &str,
) -> Result<RateLimitResponse, StoreError> {
    let window_ms = config.window_ms();
    let index = window_index(now_ms, window_ms);
    let window_end = (index + 1) * window_ms;
    let key = counter_key(config.prefix(), identifier, index);

    let count = store.incr(&key).await?;
    if count == 1 {
        // First admission in this window owns the key lifetime. A dropped
        // EXPIRE here leaves a persistent counter; the rejection path below
        // then reports retry_after 0 instead of a bogus wait.
        store.expire(&key, config.window).await?;
    }

    if count > config.limit {
        let ttl = store.ttl(&key).await?;
        debug!("Rate limit exceeded for {} (count {})", key, count);
        return Ok(RateLimitResponse {
            success: false,
            limit: config.limit,
            remaining: 0,
            retry_after: (ttl * 1000).max(0),
            reset: window_end,
        });
    }

    Ok(RateLimitResponse {
        success: true,
        limit: config.limit,
        remaining: config.limit - count,
        retry_after: 0,
        reset: window_end,
    })
}
