use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use basalt::keyspace::KeySpace;
use basalt::ports::{Backend, TtlMetrics};
use moka::Expiry;
use moka::future::Cache;
use shared::{Error, Result, TtlSeconds};

/// In-process storage engine backed by moka.
///
/// Moka keeps no expiration metadata on records, so each entry carries its
/// resolved TTL and write instant; the expiry policy enforces them and the
/// remaining TTL for the read-side observation is derived from them.
pub struct MemoryBackend {
    keys: KeySpace,
    cache: Cache<String, Entry>,
    default_ttl: TtlSeconds,
    metrics: Arc<dyn TtlMetrics>,
}

#[derive(Clone, Debug)]
struct Entry {
    value: String,
    ttl: Duration,
    written_at: Instant,
}

struct EntryExpiry;

impl Expiry<String, Entry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    // Overwrites restart the clock with the new entry's TTL (last write wins).
    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

impl MemoryBackend {
    pub fn new(keys: KeySpace, default_ttl: TtlSeconds, metrics: Arc<dyn TtlMetrics>) -> Self {
        let cache = Cache::builder().expire_after(EntryExpiry).build();
        Self {
            keys,
            cache,
            default_ttl,
            metrics,
        }
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<String> {
        let native = self.keys.native_key(key)?;
        match self.cache.get(&native).await {
            Some(entry) => {
                let remaining = entry.ttl.saturating_sub(entry.written_at.elapsed());
                self.metrics.record_extra_ttl_seconds(remaining.as_secs_f64());
                Ok(entry.value)
            }
            None => Err(Error::NotFound),
        }
    }

    async fn put(&self, key: &str, value: &str, ttl: TtlSeconds) -> Result<()> {
        let native = self.keys.native_key(key)?;
        let ttl = ttl.or_default(self.default_ttl);
        let entry = Entry {
            value: value.to_string(),
            ttl: ttl.as_duration(),
            written_at: Instant::now(),
        };
        self.cache.insert(native, entry).await;
        Ok(())
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("keys", &self.keys)
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}
