//! Tenancy configuration
//!
//! Static lists that tell the resolver which hosts serve the administrative
//! application, which domains host tenant subdomains, and which hosts are
//! served as-is. Loaded once at startup and injected into the resolver.

use serde::{Deserialize, Serialize};
use sitegate_core::{Error, Result};

/// Tenancy configuration
///
/// ```yaml
/// tenancy:
///   base_domains: ["webbuilder.com", "localhost"]
///   admin_hosts: ["webbuilder.com", "www.webbuilder.com", "webbuilder.local"]
///   local_dev_hosts: ["localhost", "127.0.0.1"]
///   bypass_hosts: ["staging.webbuilder.com"]
///   bypass_subdomains: ["admin", "api", "app"]
///   admin_prefixes: ["/admin", "/dashboard", "/account"]
///   login_path: /administrator
///   session_cookie: token
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenancyConfig {
    /// Domains whose subdomains are tenant sites
    #[serde(default = "default_base_domains")]
    pub base_domains: Vec<String>,

    /// Hosts allowed to serve the administrative sections
    #[serde(default = "default_admin_hosts")]
    pub admin_hosts: Vec<String>,

    /// Hosts where the tenant is taken from the first path segment
    #[serde(default = "default_local_dev_hosts")]
    pub local_dev_hosts: Vec<String>,

    /// Fully-qualified hosts served as-is (operator and staging domains)
    #[serde(default = "default_bypass_hosts")]
    pub bypass_hosts: Vec<String>,

    /// Subdomain labels on any base domain that are never tenants
    #[serde(default = "default_bypass_subdomains")]
    pub bypass_subdomains: Vec<String>,

    /// Path prefixes of the administrative sections
    #[serde(default = "default_admin_prefixes")]
    pub admin_prefixes: Vec<String>,

    /// Path prefixes of framework assets and API routes (never rewritten)
    #[serde(default = "default_passthrough_prefixes")]
    pub passthrough_prefixes: Vec<String>,

    /// Login page of the administrative application
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Name of the cookie carrying the admin session token
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            base_domains: default_base_domains(),
            admin_hosts: default_admin_hosts(),
            local_dev_hosts: default_local_dev_hosts(),
            bypass_hosts: default_bypass_hosts(),
            bypass_subdomains: default_bypass_subdomains(),
            admin_prefixes: default_admin_prefixes(),
            passthrough_prefixes: default_passthrough_prefixes(),
            login_path: default_login_path(),
            session_cookie: default_session_cookie(),
        }
    }
}

impl TenancyConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_domains.iter().any(|d| normalize_domain(d).is_empty()) {
            return Err(Error::Config("tenancy.base_domains contains an empty domain".to_string()));
        }

        for prefix in self.admin_prefixes.iter().chain(&self.passthrough_prefixes) {
            if !prefix.starts_with('/') || prefix.len() < 2 {
                return Err(Error::Config(format!(
                    "Path prefix '{}' must start with '/' and name a section",
                    prefix
                )));
            }
        }

        if !self.login_path.starts_with('/') {
            return Err(Error::Config(format!(
                "tenancy.login_path '{}' must start with '/'",
                self.login_path
            )));
        }

        if self.session_cookie.trim().is_empty() {
            return Err(Error::Config("tenancy.session_cookie is empty".to_string()));
        }

        Ok(())
    }

    /// Return a copy with every host and domain lower-cased and trimmed
    pub fn normalized(&self) -> Self {
        let hosts = |list: &[String]| -> Vec<String> {
            list.iter()
                .map(|h| normalize_domain(h))
                .filter(|h| !h.is_empty())
                .collect()
        };

        Self {
            base_domains: hosts(&self.base_domains),
            admin_hosts: hosts(&self.admin_hosts),
            local_dev_hosts: hosts(&self.local_dev_hosts),
            bypass_hosts: hosts(&self.bypass_hosts),
            bypass_subdomains: hosts(&self.bypass_subdomains),
            admin_prefixes: self.admin_prefixes.clone(),
            passthrough_prefixes: self.passthrough_prefixes.clone(),
            login_path: self.login_path.clone(),
            session_cookie: self.session_cookie.clone(),
        }
    }
}

fn normalize_domain(domain: &str) -> String {
    domain
        .trim()
        .trim_start_matches('.')
        .trim_end_matches('.')
        .to_ascii_lowercase()
}

fn default_base_domains() -> Vec<String> {
    vec!["webbuilder.com".to_string(), "localhost".to_string()]
}

fn default_admin_hosts() -> Vec<String> {
    vec![
        "webbuilder.com".to_string(),
        "www.webbuilder.com".to_string(),
        "webbuilder.local".to_string(),
        "localhost".to_string(),
        "127.0.0.1".to_string(),
    ]
}

fn default_local_dev_hosts() -> Vec<String> {
    vec!["localhost".to_string(), "127.0.0.1".to_string(), "[::1]".to_string()]
}

fn default_bypass_hosts() -> Vec<String> {
    vec!["staging.webbuilder.com".to_string()]
}

fn default_bypass_subdomains() -> Vec<String> {
    vec!["admin".to_string(), "api".to_string(), "app".to_string()]
}

fn default_admin_prefixes() -> Vec<String> {
    vec![
        "/admin".to_string(),
        "/dashboard".to_string(),
        "/account".to_string(),
    ]
}

fn default_passthrough_prefixes() -> Vec<String> {
    vec![
        "/api".to_string(),
        "/_next".to_string(),
        "/static".to_string(),
        "/assets".to_string(),
        "/healthz".to_string(),
        "/readyz".to_string(),
        "/metrics".to_string(),
    ]
}

fn default_login_path() -> String {
    "/administrator".to_string()
}

fn default_session_cookie() -> String {
    "token".to_string()
}
