//! # rategate
//!
//! Distributed request rate limiting backed by a Redis-protocol-compatible
//! key/value store (Redis or Valkey).
//!
//! Each inbound event is associated with a caller-chosen string identifier
//! (user id, IP address, API key) and checked against a configured ceiling of
//! N events per rolling window of W seconds. The counters live in the backing
//! store, so the limit is shared across every process connected to it.
//!
//! ## Features
//!
//! - **Fixed window**: epoch-aligned windows counted with plain `INCR`
//! - **Sliding window**: weighted two-bucket algorithm executed as a single
//!   server-side script, race-free under concurrent callers
//! - **Pluggable store**: any [`CounterStore`] implementation; a Redis-backed
//!   store and a deterministic in-memory store ship with the crate
//! - **Injectable clock**: swap the system clock for a [`ManualClock`] in
//!   tests to make window boundaries deterministic
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use rategate::{MemoryStore, RateLimitConfig, RateLimiter};
//!
//! #[tokio::main]
//! async fn main() -> rategate::Result<()> {
//!     let store = Arc::new(MemoryStore::new());
//!     let limiter = RateLimiter::new(store, RateLimitConfig::fixed_window(100, 60))?;
//!
//!     let response = limiter.limit("user-42").await?;
//!     assert!(response.success);
//!     Ok(())
//! }
//! ```
//!
//! ## Against Redis
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rategate::{RateLimitConfig, RateLimiter, RedisStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let store = Arc::new(RedisStore::connect("redis://127.0.0.1:6379").await?);
//!     let limiter = RateLimiter::new(store, RateLimitConfig::sliding_window(10, 1))?;
//!
//!     let response = limiter.limit("203.0.113.7").await?;
//!     if !response.success {
//!         println!("throttled, retry in {} ms", response.retry_after);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

// Public module exports
pub mod config;
mod error;
pub mod limiter;
pub mod storage;

// Re-export main types
pub use config::{Algorithm, RateLimitConfig, Validate, DEFAULT_PREFIX};
pub use error::{RateLimitError, Result};
pub use limiter::{
    Clock, ManualClock, RateLimitResponse, RateLimiter, SystemClock, SLIDING_WINDOW_SCRIPT,
};
pub use storage::{CounterStore, MemoryStore, RedisStore, StoreError};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
