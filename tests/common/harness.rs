//! Deterministic limiter harness
//!
//! Builds a limiter over the in-memory store with a manual clock shared by
//! both, so tests advance time instead of sleeping and TTL expiry stays in
//! step with the limiter's view of now.

use rategate::{ManualClock, MemoryStore, RateLimitConfig, RateLimiter};
use std::sync::Arc;

pub struct Harness {
    pub clock: Arc<ManualClock>,
    pub store: Arc<MemoryStore>,
    pub limiter: RateLimiter,
}

pub fn limiter_at(config: RateLimitConfig, now_ms: i64) -> Harness {
    let clock = Arc::new(ManualClock::new(now_ms));
    let store = Arc::new(MemoryStore::with_clock(clock.clone()));
    let limiter =
        RateLimiter::with_clock(store.clone(), config, clock.clone()).expect("valid test config");

    Harness {
        clock,
        store,
        limiter,
    }
}
