//! SiteGate Egress
//!
//! This crate talks to the website-builder backend:
//! - Shared HTTP client configuration
//! - `ApiProjectSource`, the project-by-slug lookup
//! - `ProjectLoader`, request-scoped memoization of project lookups

pub mod client;
pub mod loader;
pub mod project_api;

pub use client::{HttpClientConfig, create_client};
pub use loader::ProjectLoader;
pub use project_api::{ApiProjectConfig, ApiProjectSource};

use thiserror::Error;

/// Egress error types
#[derive(Debug, Error)]
pub enum EgressError {
    /// Transport-level failure
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Backend answered with an unexpected status
    #[error("Backend error ({status_code}): {message}")]
    BackendError { status_code: u16, message: String },

    /// Backend did not answer in time
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Backend payload could not be decoded
    #[error("Failed to parse backend response: {0}")]
    ParseError(String),

    /// Client could not be configured
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, EgressError>;

impl From<EgressError> for sitegate_core::Error {
    fn from(err: EgressError) -> Self {
        match err {
            EgressError::Timeout(secs) => sitegate_core::Error::Timeout(secs),
            EgressError::ConfigError(msg) => sitegate_core::Error::Config(msg),
            other => sitegate_core::Error::Backend(other.to_string()),
        }
    }
}
