pub mod memory_backend;
pub mod redis_backend;

pub use memory_backend::MemoryBackend;
pub use redis_backend::RedisBackend;

use std::sync::Arc;

use basalt::keyspace::KeySpace;
use basalt::ports::{Backend, TtlMetrics};
use shared::Result;
use shared::config::{BackendKind, Config};

/// Entry category within the namespace. External keys are the UUIDs minted
/// by the service, so the category says as much.
pub const ENTRY_CATEGORY: &str = "uuid";

/// Construct the single backend selected by configuration.
///
/// There is no degraded mode: any error returned here must abort startup
/// before traffic is accepted.
pub async fn new_backend(cfg: &Config, metrics: Arc<dyn TtlMetrics>) -> Result<Arc<dyn Backend>> {
    let keys = KeySpace::new(cfg.namespace.clone(), ENTRY_CATEGORY);
    match cfg.backend {
        BackendKind::Redis => Ok(Arc::new(
            RedisBackend::connect(cfg, keys, metrics).await?,
        )),
        BackendKind::Memory => Ok(Arc::new(MemoryBackend::new(
            keys,
            cfg.default_ttl,
            metrics,
        ))),
    }
}
