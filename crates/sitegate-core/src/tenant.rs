//! Tenant types and per-request tenant context

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Maximum length of a DNS label, which bounds every tenant slug.
const MAX_SLUG_LEN: usize = 63;

/// Identifier of a tenant (project) in the website builder.
///
/// A slug is a single DNS label: lowercase ASCII letters, digits and hyphens,
/// not starting or ending with a hyphen. It is used verbatim both as the
/// subdomain (`acme.example.com`) and as the internal route segment
/// (`/site/acme/...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantSlug(String);

impl TenantSlug {
    /// Parse a tenant slug, lower-casing it first
    pub fn from_string(s: &str) -> Result<Self> {
        let slug = s.trim().to_ascii_lowercase();

        if slug.is_empty() {
            return Err(Error::InvalidTenant("Tenant slug is empty".to_string()));
        }

        if slug.len() > MAX_SLUG_LEN {
            return Err(Error::InvalidTenant(format!(
                "Tenant slug exceeds {} characters",
                MAX_SLUG_LEN
            )));
        }

        if !slug
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
        {
            return Err(Error::InvalidTenant(format!(
                "Tenant slug '{}' contains invalid characters",
                slug
            )));
        }

        if slug.starts_with('-') || slug.ends_with('-') {
            return Err(Error::InvalidTenant(format!(
                "Tenant slug '{}' cannot start or end with a hyphen",
                slug
            )));
        }

        Ok(Self(slug))
    }

    /// Get the slug as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TenantSlug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}

impl TryFrom<String> for TenantSlug {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_string(&value)
    }
}

impl From<TenantSlug> for String {
    fn from(slug: TenantSlug) -> Self {
        slug.0
    }
}

impl AsRef<str> for TenantSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Tenant context derived from a single inbound request.
///
/// Created fresh for every request by the tenant resolver and dropped once
/// the response is produced. Nothing in here is ever persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    /// Host header with the port stripped, lower-cased
    pub host: String,

    /// Host is a loopback address or a known local development host
    pub is_local_development: bool,

    /// The configured base domain the host belongs to, if any
    pub matched_base_domain: Option<String>,

    /// Tenant addressed by this request, if it is tenant traffic
    pub tenant_slug: Option<TenantSlug>,
}

impl TenantContext {
    /// Create a context for a raw host header value
    pub fn new(raw_host: &str) -> Self {
        Self {
            host: normalize_host(raw_host),
            is_local_development: false,
            matched_base_domain: None,
            tenant_slug: None,
        }
    }

    /// Get the tenant slug, returning an error if this is not tenant traffic
    pub fn require_tenant(&self) -> Result<&TenantSlug> {
        self.tenant_slug
            .as_ref()
            .ok_or_else(|| Error::InvalidTenant(format!("Host '{}' is not a tenant host", self.host)))
    }
}

/// Lower-case a host header value and strip any port and trailing dot.
///
/// Bracketed IPv6 literals (`[::1]:3000`) keep their brackets.
pub fn normalize_host(raw_host: &str) -> String {
    let host = raw_host.trim();

    let without_port = if host.starts_with('[') {
        match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        }
    } else {
        match host.rsplit_once(':') {
            Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
            _ => host,
        }
    };

    without_port.trim_end_matches('.').to_ascii_lowercase()
}
