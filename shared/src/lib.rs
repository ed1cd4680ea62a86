// shared/src/lib.rs

use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Affirmative miss reported by the storage engine.
    #[error("key not found")]
    NotFound,
    /// The key could not be formed into a valid engine-native key.
    #[error("invalid key: {0}")]
    InvalidKey(String),
    /// The engine answered without an explicit not-found, yet returned no
    /// record body. Surfaced as an error, never as a miss.
    #[error("empty record from backend: {0}")]
    EmptyRecord(String),
    /// Engine or network failure unrelated to the key's existence.
    #[error("transport: {0}")]
    Transport(String),
    /// The backend could not be built. Fatal to startup, never per-call.
    #[error("backend construction: {0}")]
    Construction(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Entry lifetime in seconds. `TtlSeconds(0)` is the sentinel meaning
/// "use the backend's configured default".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtlSeconds(pub u32);

impl TtlSeconds {
    /// Defer to the backend's configured default TTL.
    pub const SENTINEL: TtlSeconds = TtlSeconds(0);

    /// Resolve the sentinel against a configured default. The storage engine
    /// must never see a zero TTL, so this runs once at every write boundary.
    pub fn or_default(self, default: TtlSeconds) -> TtlSeconds {
        if self.0 == 0 { default } else { self }
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_secs(u64::from(self.0))
    }
}

pub mod config;
