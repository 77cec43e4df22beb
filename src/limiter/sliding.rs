//! Sliding window engine
//!
//! Blends the current window counter with the immediately preceding one,
//! weighting the previous count by how much of it still overlaps the rolling
//! window. The whole decision runs server-side as one script invocation, so
//! a call costs a single round trip once the script handle is cached.

use super::script::SLIDING_WINDOW_SCRIPT;
use super::types::RateLimitResponse;
use super::utils::{counter_key, window_index};
use crate::config::RateLimitConfig;
use crate::storage::{is_noscript, CounterStore, StoreError};
use tokio::sync::RwLock;
use tracing::warn;

/// Engine state: the lazily loaded script handle
pub(crate) struct SlidingWindowEngine {
    script_sha: RwLock<Option<String>>,
}

impl SlidingWindowEngine {
    pub(crate) fn new() -> Self {
        Self {
            script_sha: RwLock::new(None),
        }
    }

    /// The cached script handle, loading the script on first use.
    ///
    /// A duplicate load under concurrent first calls is harmless: the store
    /// returns the same handle for the same bytes.
    async fn script_sha(&self, store: &dyn CounterStore) -> Result<String, StoreError> {
        if let Some(sha) = self.script_sha.read().await.as_deref() {
            return Ok(sha.to_string());
        }

        let sha = store.script_load(SLIDING_WINDOW_SCRIPT).await?;
        *self.script_sha.write().await = Some(sha.clone());
        Ok(sha)
    }

    pub(crate) async fn check(
        &self,
        store: &dyn CounterStore,
        config: &RateLimitConfig,
        now_ms: i64,
        identifier: &str,
    ) -> Result<RateLimitResponse, StoreError> {
        let window_ms = config.window_ms();
        let current_index = window_index(now_ms, window_ms);
        let current_key = counter_key(config.prefix(), identifier, current_index);
        let previous_key = counter_key(config.prefix(), identifier, current_index - 1);

        let keys = [current_key.as_str(), previous_key.as_str()];
        let args = [config.limit, now_ms, window_ms, 1];

        let sha = self.script_sha(store).await?;
        let reply = match store.eval_sha(&sha, &keys, &args).await {
            Ok(reply) => reply,
            Err(err) if is_noscript(&err) => {
                // The server lost its script cache (restart or SCRIPT FLUSH).
                warn!("Sliding window script missing from store, reloading");
                let sha = store.script_load(SLIDING_WINDOW_SCRIPT).await?;
                *self.script_sha.write().await = Some(sha.clone());
                store.eval_sha(&sha, &keys, &args).await?
            }
            Err(err) => return Err(err),
        };

        let (remaining, retry_after) = match reply.as_slice() {
            &[remaining, retry_after] => (remaining, retry_after),
            _ => {
                return Err(format!("unexpected sliding window script reply: {:?}", reply).into())
            }
        };

        let reset = now_ms + 2 * window_ms;
        if remaining < 0 {
            return Ok(RateLimitResponse {
                success: false,
                limit: config.limit,
                remaining: 0,
                retry_after,
                reset,
            });
        }

        Ok(RateLimitResponse {
            success: true,
            limit: config.limit,
            remaining,
            retry_after: 0,
            reset,
        })
    }
}
