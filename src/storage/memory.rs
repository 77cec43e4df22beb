//! In-memory counter store
//!
//! A deterministic [`CounterStore`] for tests and single-process use. TTLs
//! are driven by an injected [`Clock`], so a test can advance time instead of
//! sleeping, and TTL replies follow Redis conventions (-1 persistent,
//! -2 missing). Script evaluation runs the crate's sliding window script
//! natively under one lock, which makes it as indivisible as the server-side
//! original.
//!
//! This is not a fallback path: the limiter never switches backends on its
//! own.

use super::store::{CounterStore, StoreError};
use crate::limiter::{Clock, SystemClock, SLIDING_WINDOW_SCRIPT};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Clock-driven in-memory counter store
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
    clock: Arc<dyn Clock>,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<String, Entry>,
    scripts: HashMap<String, String>,
    next_script_id: u64,
}

struct Entry {
    value: i64,
    /// Absolute expiry in milliseconds; `None` means persistent
    expires_at: Option<i64>,
}

impl MemoryStore {
    /// Create a store driven by the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a store driven by an injected clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            clock,
        }
    }

    /// Drop every loaded script, like SCRIPT FLUSH on a real server
    pub fn flush_scripts(&self) {
        self.inner.lock().unwrap().scripts.clear();
    }

    /// Number of live plus not-yet-purged entries
    pub fn entry_count(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    /// Entry at `key` after lazily purging it when expired
    fn live(&mut self, key: &str, now: i64) -> Option<&mut Entry> {
        let expired = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.expires_at.is_some_and(|at| at <= now));
        if expired {
            self.entries.remove(key);
        }
        self.entries.get_mut(key)
    }

    fn live_value(&mut self, key: &str, now: i64) -> i64 {
        self.live(key, now).map(|entry| entry.value).unwrap_or(0)
    }

    /// Native execution of the sliding window script, mirroring its
    /// arithmetic exactly
    fn eval_sliding(&mut self, now: i64, keys: &[&str], args: &[i64]) -> Result<Vec<i64>, StoreError> {
        if keys.len() != 2 {
            return Err("wrong number of keys for sliding window script".into());
        }
        let (limit, script_now, window, increment) = match args {
            &[limit, script_now, window, increment] => (limit, script_now, window, increment),
            _ => return Err("wrong number of arguments for sliding window script".into()),
        };

        let current_count = self.live_value(keys[0], now);
        let previous_count = self.live_value(keys[1], now);

        let time_in_current = script_now.rem_euclid(window);
        let time_remaining_previous = window - time_in_current;
        let weighted_previous = (previous_count as f64 * time_remaining_previous as f64
            / window as f64)
            .floor() as i64;
        let cumulative = weighted_previous + current_count + increment;

        if cumulative > limit {
            let needed = cumulative - limit + increment;
            let retry_after = if previous_count > 0 {
                let wait =
                    (needed as f64 * window as f64 / previous_count as f64).ceil() as i64;
                wait.min(time_remaining_previous)
            } else {
                window - time_in_current
            };
            return Ok(vec![-1, retry_after]);
        }

        self.entries.insert(
            keys[0].to_string(),
            Entry {
                value: current_count + increment,
                expires_at: Some(now + window * 2 + 1000),
            },
        );
        Ok(vec![
            limit - (weighted_previous + current_count + increment),
            0,
        ])
    }
}

#[async_trait]
impl CounterStore for MemoryStore {
    async fn incr(&self, key: &str) -> Result<i64, StoreError> {
        let now = self.clock.now_ms();
        let mut inner = self.inner.lock().unwrap();

        if let Some(entry) = inner.live(key, now) {
            entry.value += 1;
            return Ok(entry.value);
        }

        inner.entries.insert(
            key.to_string(),
            Entry {
                value: 1,
                expires_at: None,
            },
        );
        Ok(1)
    }

    async fn expire(&self, key: &str, seconds: i64) -> Result<(), StoreError> {
        let now = self.clock.now_ms();
        let mut inner = self.inner.lock().unwrap();
        if let Some(entry) = inner.live(key, now) {
            entry.expires_at = Some(now + seconds * 1000);
        }
        Ok(())
    }

    async fn pexpire(&self, key: &str, millis: i64) -> Result<(), StoreError> {
        let now = self.clock.now_ms();
        let mut inner = self.inner.lock().unwrap();
        if let Some(entry) = inner.live(key, now) {
            entry.expires_at = Some(now + millis);
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<i64>, StoreError> {
        let now = self.clock.now_ms();
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.live(key, now).map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn ttl(&self, key: &str) -> Result<i64, StoreError> {
        let now = self.clock.now_ms();
        let mut inner = self.inner.lock().unwrap();
        match inner.live(key, now) {
            None => Ok(-2),
            Some(entry) => match entry.expires_at {
                None => Ok(-1),
                // Redis reports whole seconds; round up so a live key never
                // reads as already expired.
                Some(at) => Ok((at - now + 999) / 1000),
            },
        }
    }

    async fn script_load(&self, script: &str) -> Result<String, StoreError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some((sha, _)) = inner
            .scripts
            .iter()
            .find(|(_, source)| source.as_str() == script)
        {
            return Ok(sha.clone());
        }

        let sha = format!("local-{}", inner.next_script_id);
        inner.next_script_id += 1;
        inner.scripts.insert(sha.clone(), script.to_string());
        Ok(sha)
    }

    async fn eval_sha(
        &self,
        sha: &str,
        keys: &[&str],
        args: &[i64],
    ) -> Result<Vec<i64>, StoreError> {
        let now = self.clock.now_ms();
        let mut inner = self.inner.lock().unwrap();

        let source = inner
            .scripts
            .get(sha)
            .cloned()
            .ok_or_else(|| StoreError::from("NOSCRIPT No matching script. Please use EVAL."))?;

        if source != SLIDING_WINDOW_SCRIPT {
            return Err("unsupported script".into());
        }

        inner.eval_sliding(now, keys, args)
    }
}
