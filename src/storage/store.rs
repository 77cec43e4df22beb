//! Store capability interface
//!
//! The minimum command set the limiter requires of an external store:
//! integer increment with auto-create, expiration in seconds and in
//! milliseconds, value get/set, remaining TTL, and script load plus
//! script-by-handle evaluation. Anything richer is out of scope.

use async_trait::async_trait;

/// Error type produced by store implementations; the original driver error
/// is carried through unchanged
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Counter operations the rate limiter needs from a shared store
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Increment the integer at `key` by one, creating it at zero first.
    /// Returns the value after the increment.
    async fn incr(&self, key: &str) -> Result<i64, StoreError>;

    /// Set the key's time to live in seconds.
    async fn expire(&self, key: &str, seconds: i64) -> Result<(), StoreError>;

    /// Set the key's time to live in milliseconds.
    async fn pexpire(&self, key: &str, millis: i64) -> Result<(), StoreError>;

    /// Read the integer at `key`, `None` when the key is missing.
    async fn get(&self, key: &str) -> Result<Option<i64>, StoreError>;

    /// Write an integer at `key`, dropping any existing time to live.
    async fn set(&self, key: &str, value: i64) -> Result<(), StoreError>;

    /// Remaining time to live in seconds; -1 for a persistent key, -2 for a
    /// missing one.
    async fn ttl(&self, key: &str) -> Result<i64, StoreError>;

    /// Load a server-side script and return its handle.
    async fn script_load(&self, script: &str) -> Result<String, StoreError>;

    /// Evaluate a previously loaded script by handle, with keys and integer
    /// arguments kept separate. The reply is an array of integers.
    async fn eval_sha(
        &self,
        sha: &str,
        keys: &[&str],
        args: &[i64],
    ) -> Result<Vec<i64>, StoreError>;
}

/// Whether a store error reports an unknown-script condition
pub(crate) fn is_noscript(err: &StoreError) -> bool {
    err.to_string().contains("NOSCRIPT")
}
