//! PostgreSQL pool settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection pool settings for the attendance database.
///
/// RollCall serves a single department, so the pool defaults are sized
/// for a handful of concurrent admin scanners rather than a large fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: String,
    /// Upper bound on pooled connections.
    #[serde(default = "defaults::max_connections")]
    pub max_connections: u32,
    /// Connections kept warm when idle.
    #[serde(default = "defaults::min_connections")]
    pub min_connections: u32,
    /// Seconds to wait when acquiring a connection.
    #[serde(default = "defaults::connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Seconds before an idle connection is dropped.
    #[serde(default = "defaults::idle_timeout")]
    pub idle_timeout_seconds: u64,
}

impl DatabaseConfig {
    /// Acquire timeout as a [`Duration`].
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Idle timeout as a [`Duration`].
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_seconds)
    }
}

mod defaults {
    pub fn max_connections() -> u32 {
        10
    }

    pub fn min_connections() -> u32 {
        2
    }

    pub fn connect_timeout() -> u64 {
        10
    }

    pub fn idle_timeout() -> u64 {
        300
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_only_config_gets_pool_defaults() {
        let config: DatabaseConfig = serde_json::from_value(serde_json::json!({
            "url": "postgres://localhost/rollcall"
        }))
        .unwrap();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.acquire_timeout(), Duration::from_secs(10));
        assert_eq!(config.idle_timeout(), Duration::from_secs(300));
    }
}
