//! Counter storage backends
//!
//! This module defines the capability interface the limiter requires of the
//! external store and provides two implementations:
//!
//! - `redis` - Redis/Valkey over a multiplexed async connection
//! - `memory` - deterministic in-memory store for tests and single-process use

mod memory;
mod redis;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types
pub use memory::MemoryStore;
pub use redis::RedisStore;
pub use store::{CounterStore, StoreError};

pub(crate) use store::is_noscript;
