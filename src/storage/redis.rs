//! Redis-backed counter store
//!
//! Connects to Redis or Valkey over a multiplexed async connection and maps
//! the capability interface onto the standard text-protocol commands.

use super::store::{CounterStore, StoreError};
use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use tracing::{debug, info};

/// Counter store over a Redis-protocol server
#[derive(Debug, Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
}

impl RedisStore {
    /// Connect to the server at `url` (e.g. `redis://127.0.0.1:6379`)
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        info!("Connecting to counter store");
        debug!("Store URL: {}", Self::sanitize_url(url));

        let client = Client::open(url)?;
        let connection = client.get_multiplexed_async_connection().await?;

        info!("Counter store connection established");
        Ok(Self { connection })
    }

    /// Health check via PING
    pub async fn health_check(&self) -> Result<(), StoreError> {
        debug!("Performing store health check");
        let mut conn = self.connection();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    /// Cheap handle clone; the underlying connection is multiplexed
    fn connection(&self) -> MultiplexedConnection {
        self.connection.clone()
    }

    /// Sanitize a store URL for logging (hide password)
    pub(crate) fn sanitize_url(url: &str) -> String {
        if let Ok(parsed) = url::Url::parse(url) {
            let mut sanitized = parsed.clone();
            if sanitized.password().is_some() {
                let _ = sanitized.set_password(Some("***"));
            }
            sanitized.to_string()
        } else {
            "invalid_url".to_string()
        }
    }
}

#[async_trait]
impl CounterStore for RedisStore {
    async fn incr(&self, key: &str) -> Result<i64, StoreError> {
        let mut conn = self.connection();
        let count: i64 = conn.incr(key, 1).await?;
        Ok(count)
    }

    async fn expire(&self, key: &str, seconds: i64) -> Result<(), StoreError> {
        let mut conn = self.connection();
        let _: () = conn.expire(key, seconds).await?;
        Ok(())
    }

    async fn pexpire(&self, key: &str, millis: i64) -> Result<(), StoreError> {
        let mut conn = self.connection();
        let _: () = conn.pexpire(key, millis).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<i64>, StoreError> {
        let mut conn = self.connection();
        let value: Option<i64> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: i64) -> Result<(), StoreError> {
        let mut conn = self.connection();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn ttl(&self, key: &str) -> Result<i64, StoreError> {
        let mut conn = self.connection();
        let ttl: i64 = conn.ttl(key).await?;
        Ok(ttl)
    }

    async fn script_load(&self, script: &str) -> Result<String, StoreError> {
        let mut conn = self.connection();
        let sha: String = redis::cmd("SCRIPT")
            .arg("LOAD")
            .arg(script)
            .query_async(&mut conn)
            .await?;
        Ok(sha)
    }

    async fn eval_sha(
        &self,
        sha: &str,
        keys: &[&str],
        args: &[i64],
    ) -> Result<Vec<i64>, StoreError> {
        let mut conn = self.connection();
        let mut cmd = redis::cmd("EVALSHA");
        cmd.arg(sha).arg(keys.len());
        for key in keys {
            cmd.arg(*key);
        }
        for arg in args {
            cmd.arg(*arg);
        }
        let reply: Vec<i64> = cmd.query_async(&mut conn).await?;
        Ok(reply)
    }
}
