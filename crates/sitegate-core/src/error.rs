//! Error types for SiteGate Core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Multi-tenancy errors
    #[error("Invalid tenant: {0}")]
    InvalidTenant(String),

    #[error("Tenant not found: {0}")]
    TenantNotFound(String),

    // Backend errors
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Backend request timed out after {0}s")]
    Timeout(u64),

    // Rendering errors
    #[error("Render error: {0}")]
    Render(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error means the tenant cannot be served at all.
    ///
    /// Backend failures and timeouts are folded into "not found" at the
    /// routing layer; only render and internal errors reach the user as 500s.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::TenantNotFound(_)
                | Error::InvalidTenant(_)
                | Error::Backend(_)
                | Error::Timeout(_)
                | Error::Serialization(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
