//! Shared HTTP client utilities

use crate::{EgressError, Result};
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Total request timeout in seconds.
    ///
    /// Project lookups sit on the critical path of every tenant page, so a
    /// hung backend must fail the lookup rather than stall the request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Maximum number of idle connections per host
    #[serde(default = "default_pool_max_idle_per_host")]
    pub pool_max_idle_per_host: usize,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            pool_max_idle_per_host: default_pool_max_idle_per_host(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    3
}

fn default_pool_max_idle_per_host() -> usize {
    16
}

fn default_user_agent() -> String {
    format!("SiteGate/{}", env!("CARGO_PKG_VERSION"))
}

/// Create a configured HTTP client with connection pooling
pub fn create_client(config: &HttpClientConfig) -> Result<Client> {
    if config.timeout_secs == 0 {
        return Err(EgressError::ConfigError(
            "timeout_secs must be greater than zero".to_string(),
        ));
    }

    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        // Expire idle connections before the backend closes them
        .pool_idle_timeout(Duration::from_secs(90))
        .user_agent(&config.user_agent)
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .map_err(|e| EgressError::ConfigError(format!("Failed to create HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::default();
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.connect_timeout_secs, 3);
        assert_eq!(config.pool_max_idle_per_host, 16);
        assert!(config.user_agent.starts_with("SiteGate/"));
    }

    #[test]
    fn test_create_client() {
        let config = HttpClientConfig::default();
        let client = create_client(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = HttpClientConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            create_client(&config),
            Err(EgressError::ConfigError(_))
        ));
    }
}
