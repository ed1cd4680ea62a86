#![deny(clippy::all)]

use async_trait::async_trait;
use shared::{Result, TtlSeconds};

// Ports are the pluggable extension points for storage engines and telemetry

/// Port for a storage engine holding this service's entries.
///
/// Implementations own one long-lived engine session shared across all
/// concurrent calls and hold no locks of their own; single-key atomicity is
/// the engine's guarantee. Callers bound each call with their own timeout and
/// may drop the future, which abandons the in-flight engine call best-effort.
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    /// Read the value stored under `key`.
    ///
    /// A successful read records exactly one remaining-TTL observation with
    /// the injected [`TtlMetrics`] sink. A miss the engine reports
    /// affirmatively is `Error::NotFound`; a reply carrying no record body
    /// without such a report is `Error::EmptyRecord`.
    async fn get(&self, key: &str) -> Result<String>;

    /// Store `value` under `key`, replacing any prior value unconditionally.
    ///
    /// The TTL sentinel is resolved against the configured default before the
    /// engine sees it. Writes record no metrics.
    async fn put(&self, key: &str, value: &str, ttl: TtlSeconds) -> Result<()>;
}

/// Port for TTL observability, injected at backend construction so backends
/// stay testable in isolation.
pub trait TtlMetrics: Send + Sync + 'static {
    fn record_extra_ttl_seconds(&self, seconds: f64);
}
