//! Redis-backed counter store.

use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, Script, aio::ConnectionManager};
use tracing::{debug, info};

use crate::domain::repositories::CounterStore;
use crate::error::AppError;

/// Decrements KEYS[1] only while it is positive. Missing keys stay missing.
const DECREMENT_CLAMPED_SCRIPT: &str = r#"
local current = tonumber(redis.call('GET', KEYS[1]))
if current and current > 0 then
    return redis.call('DECR', KEYS[1])
end
return current or 0
"#;

/// Counter store on a shared Redis instance.
///
/// Increments run in a `MULTI`/`EXEC` pipeline together with their `EXPIRE`
/// so a batch is never observed half-applied. Decrements run as a Lua
/// script, which makes the zero clamp atomic.
pub struct RedisCounterStore {
    client: ConnectionManager,
    decrement_script: Script,
}

impl RedisCounterStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        info!("Connecting to Redis counter store");

        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut test_conn = manager.clone();
        test_conn.ping::<()>().await?;

        info!("Connected to Redis counter store");

        Ok(Self {
            client: manager,
            decrement_script: Script::new(DECREMENT_CLAMPED_SCRIPT),
        })
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn increment_all(&self, keys: &[String], ttl: Duration) -> Result<Vec<i64>, AppError> {
        let mut conn = self.client.clone();
        let ttl_seconds = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);

        let mut pipe = redis::pipe();
        pipe.atomic();
        for key in keys {
            pipe.incr(key, 1i64);
        }
        for key in keys {
            pipe.expire(key, ttl_seconds).ignore();
        }

        let counts: Vec<i64> = pipe.query_async(&mut conn).await?;
        debug!(?keys, ?counts, "Counters incremented");

        Ok(counts)
    }

    async fn decrement_clamped(&self, key: &str) -> Result<i64, AppError> {
        let mut conn = self.client.clone();

        let value: i64 = self
            .decrement_script
            .key(key)
            .invoke_async(&mut conn)
            .await?;

        Ok(value)
    }

    async fn get(&self, key: &str) -> Result<Option<i64>, AppError> {
        let mut conn = self.client.clone();
        Ok(conn.get::<_, Option<i64>>(key).await?)
    }

    async fn reset(&self, key: &str) -> Result<(), AppError> {
        let mut conn = self.client.clone();
        conn.del::<_, ()>(key).await?;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
