use std::sync::Arc;

use async_trait::async_trait;
use basalt::keyspace::KeySpace;
use basalt::ports::{Backend, TtlMetrics};
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use shared::config::Config;
use shared::{Error, Result, TtlSeconds};
use tracing::{error, info};

/// Redis-backed storage engine.
///
/// Holds one connection manager for the life of the process; pooling and
/// reconnection are the client library's concern, opaque to this layer.
pub struct RedisBackend {
    keys: KeySpace,
    conn: ConnectionManager,
    default_ttl: TtlSeconds,
    metrics: Arc<dyn TtlMetrics>,
}

impl RedisBackend {
    /// Connect eagerly. An unreachable engine fails construction, which the
    /// caller treats as fatal.
    pub async fn connect(
        cfg: &Config,
        keys: KeySpace,
        metrics: Arc<dyn TtlMetrics>,
    ) -> Result<Self> {
        let url = format!("redis://{}:{}", cfg.redis_host, cfg.redis_port);
        let client = redis::Client::open(url.as_str())
            .map_err(|e| Error::Construction(format!("invalid redis endpoint {url}: {e}")))?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(|e| Error::Construction(format!("cannot reach redis at {url}: {e}")))?;
        info!("Connected to Redis at {}:{}", cfg.redis_host, cfg.redis_port);

        Ok(Self {
            keys,
            conn,
            default_ttl: cfg.default_ttl,
            metrics,
        })
    }
}

#[async_trait]
impl Backend for RedisBackend {
    async fn get(&self, key: &str) -> Result<String> {
        let native = self.keys.native_key(key)?;
        let mut conn = self.conn.clone();
        // Atomic so EXISTS and GET cannot disagree about the same key.
        let reply: (i64, Option<String>, i64) = redis::pipe()
            .atomic()
            .cmd("EXISTS")
            .arg(&native)
            .cmd("GET")
            .arg(&native)
            .cmd("TTL")
            .arg(&native)
            .query_async(&mut conn)
            .await
            .map_err(transport)?;

        let (value, remaining_ttl) = classify_read(reply)?;
        self.metrics.record_extra_ttl_seconds(remaining_ttl);
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str, ttl: TtlSeconds) -> Result<()> {
        let native = self.keys.native_key(key)?;
        let ttl = ttl.or_default(self.default_ttl);
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(&native, value, u64::from(ttl.0))
            .await
            .map_err(transport)
    }
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("keys", &self.keys)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

fn transport(err: redis::RedisError) -> Error {
    Error::Transport(err.to_string())
}

/// Classify an EXISTS/GET/TTL reply into the contract's read outcomes.
///
/// An existing key with a nil body is the engine ambiguity the contract
/// refuses to treat as a miss: it usually means a misconfigured namespace or
/// engine, so it surfaces loudly instead. TTL replies of -1 (no expiry) and
/// -2 (gone) clamp to zero for the observation.
fn classify_read((exists, body, ttl): (i64, Option<String>, i64)) -> Result<(String, f64)> {
    match (exists, body) {
        (0, _) => Err(Error::NotFound),
        (_, Some(value)) => Ok((value, ttl.max(0) as f64)),
        (_, None) => {
            error!("Redis reported an existing key but returned a nil body; is the namespace configured properly?");
            Err(Error::EmptyRecord(
                "nil body for an existing key".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_not_found() {
        assert!(matches!(
            classify_read((0, None, -2)),
            Err(Error::NotFound)
        ));
    }

    #[test]
    fn nil_body_for_existing_key_is_empty_record_not_a_miss() {
        let err = classify_read((1, None, 30)).unwrap_err();
        assert!(matches!(err, Error::EmptyRecord(_)));
    }

    #[test]
    fn present_value_carries_remaining_ttl() {
        let (value, ttl) = classify_read((1, Some("hello".to_string()), 3600)).unwrap();
        assert_eq!(value, "hello");
        assert_eq!(ttl, 3600.0);
    }

    #[test]
    fn non_expiring_record_observes_zero_not_negative() {
        let (_, ttl) = classify_read((1, Some("v".to_string()), -1)).unwrap();
        assert_eq!(ttl, 0.0);
    }
}
