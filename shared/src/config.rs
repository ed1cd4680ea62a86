use std::str::FromStr;

use tracing::info;

use crate::{Error, Result, TtlSeconds};

/// Storage technology serving the backend contract for this deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    Redis,
    Memory,
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(BackendKind::Redis),
            "memory" => Ok(BackendKind::Memory),
            other => Err(Error::Construction(format!(
                "unrecognized backend {other:?}, expected 'redis' or 'memory'"
            ))),
        }
    }
}

pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub backend: BackendKind,
    pub redis_host: String,
    pub redis_port: u16,
    pub namespace: String,
    pub default_ttl: TtlSeconds,
    pub log_level: String,
}

impl Config {
    const DEFAULT_NAMESPACE: &str = "basalt";
    const DEFAULT_TTL_SECONDS: u32 = 3600;

    pub fn from_env() -> Result<Self> {
        let host = std::env::var("BASALT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let http_port = std::env::var("BASALT_HTTP_PORT")
            .unwrap_or_else(|_| "2424".to_string())
            .parse::<u16>()
            .unwrap_or(2424);
        let backend = std::env::var("BASALT_BACKEND")
            .unwrap_or_else(|_| "redis".to_string())
            .parse::<BackendKind>()?;
        let redis_port = std::env::var("BASALT_REDIS_PORT")
            .unwrap_or_else(|_| "6379".to_string())
            .parse::<u16>()
            .unwrap_or(6379);
        let default_ttl = std::env::var("BASALT_DEFAULT_TTL_SECONDS")
            .unwrap_or_else(|_| Self::DEFAULT_TTL_SECONDS.to_string())
            .parse::<u32>()
            .map_err(|e| Error::Construction(format!("invalid BASALT_DEFAULT_TTL_SECONDS: {e}")))?;
        Ok(Self {
            host,
            http_port,
            backend,
            redis_host: std::env::var("BASALT_REDIS_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            redis_port,
            namespace: std::env::var("BASALT_NAMESPACE")
                .unwrap_or_else(|_| Self::DEFAULT_NAMESPACE.to_string()),
            default_ttl: TtlSeconds(default_ttl),
            log_level: std::env::var("BASALT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Reject configurations that would break backend invariants, then log
    /// the effective settings. Any error here must abort startup.
    pub fn validate_and_log(&self) -> Result<()> {
        if self.namespace.is_empty() {
            return Err(Error::Construction(
                "BASALT_NAMESPACE must not be empty".to_string(),
            ));
        }
        // A zero default would make the sentinel substitution a no-op and let
        // the engine see a zero TTL.
        if self.default_ttl.0 == 0 {
            return Err(Error::Construction(
                "BASALT_DEFAULT_TTL_SECONDS must be positive".to_string(),
            ));
        }
        info!("Backend: {:?}", self.backend);
        if self.backend == BackendKind::Redis {
            info!("Redis endpoint: {}:{}", self.redis_host, self.redis_port);
        }
        info!("Namespace: {}", self.namespace);
        info!("Default TTL: {}s", self.default_ttl.0);
        info!("HTTP bind: {}:{}", self.host, self.http_port);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_kind_parses_known_names() {
        assert_eq!("redis".parse::<BackendKind>().unwrap(), BackendKind::Redis);
        assert_eq!("Memory".parse::<BackendKind>().unwrap(), BackendKind::Memory);
        assert!("cassandra".parse::<BackendKind>().is_err());
    }

    #[test]
    fn zero_default_ttl_is_rejected() {
        let config = Config {
            host: "0.0.0.0".to_string(),
            http_port: 2424,
            backend: BackendKind::Memory,
            redis_host: "127.0.0.1".to_string(),
            redis_port: 6379,
            namespace: "basalt".to_string(),
            default_ttl: TtlSeconds(0),
            log_level: "info".to_string(),
        };
        assert!(matches!(
            config.validate_and_log(),
            Err(Error::Construction(_))
        ));
    }

    #[test]
    fn empty_namespace_is_rejected() {
        let config = Config {
            host: "0.0.0.0".to_string(),
            http_port: 2424,
            backend: BackendKind::Memory,
            redis_host: "127.0.0.1".to_string(),
            redis_port: 6379,
            namespace: String::new(),
            default_ttl: TtlSeconds(3600),
            log_level: "info".to_string(),
        };
        assert!(config.validate_and_log().is_err());
    }
}
