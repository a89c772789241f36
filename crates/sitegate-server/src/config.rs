//! Server configuration
//!
//! Loaded from YAML (default) or TOML by file extension, then overridden by
//! `SITEGATE_*` environment variables and finally by CLI flags.

use serde::{Deserialize, Serialize};
use sitegate_egress::ApiProjectConfig;
use sitegate_routing::TenancyConfig;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub tenancy: TenancyConfig,

    #[serde(default)]
    pub backend: ApiProjectConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default = "default_false")]
    pub json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            tenancy: TenancyConfig::default(),
            backend: ApiProjectConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: default_false(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)?
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents)?
        };

        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) {
        // Backend settings
        if let Ok(val) = std::env::var("SITEGATE_BACKEND_URL") {
            self.backend.base_url = val;
        }

        if let Ok(val) = std::env::var("SITEGATE_BACKEND_TIMEOUT_SECS")
            && let Ok(secs) = val.parse::<u64>()
        {
            self.backend.client_config.timeout_secs = secs;
        }

        // Tenancy settings
        if let Ok(val) = std::env::var("SITEGATE_BASE_DOMAINS") {
            self.tenancy.base_domains = split_list(&val);
        }

        if let Ok(val) = std::env::var("SITEGATE_ADMIN_HOSTS") {
            self.tenancy.admin_hosts = split_list(&val);
        }

        // Logging settings
        if let Ok(val) = std::env::var("SITEGATE_LOG_LEVEL") {
            self.logging.level = val;
        }

        if let Ok(val) = std::env::var("SITEGATE_LOG_JSON")
            && let Ok(enabled) = val.parse::<bool>()
        {
            self.logging.json = enabled;
        }

        // Server settings
        if let Ok(val) = std::env::var("SITEGATE_PORT")
            && let Ok(port) = val.parse::<u16>()
        {
            self.port = port;
        }

        if let Ok(val) = std::env::var("SITEGATE_HOST") {
            self.host = val;
        }
    }

    /// Validate the merged configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        self.tenancy.validate()?;

        if self.backend.base_url.trim().is_empty() {
            anyhow::bail!("backend.base_url must not be empty");
        }

        Ok(())
    }
}

/// Comma-separated list, blanks dropped
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_false() -> bool {
    false
}
