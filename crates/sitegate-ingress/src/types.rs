//! Shared ingress types and utilities

use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use serde::{Deserialize, Serialize};
use sitegate_themes::{ERROR_PAGE_HTML, render_not_found};
use thiserror::Error;

/// Request ID for tracing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Longest client-supplied request id that is kept
    const MAX_LEN: usize = 128;

    /// Generate a new request ID
    pub fn generate() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let count = COUNTER.fetch_add(1, Ordering::Relaxed);
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_micros())
            .unwrap_or_default();

        Self(format!("req_{:x}_{:x}", timestamp, count))
    }

    /// Accept a request id forwarded by a proxy; `None` when unusable
    pub fn from_header(value: &str) -> Option<Self> {
        let value = value.trim();
        let valid = !value.is_empty()
            && value.len() <= Self::MAX_LEN
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

        valid.then(|| Self(value.to_string()))
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Link prefix of the site being rendered, set by the tenant routing
/// middleware on rewritten requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRoot(pub String);

/// Ingress errors
#[derive(Debug, Error)]
pub enum IngressError {
    #[error("Site not found: {0}")]
    NotFound(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sitegate_core::Error> for IngressError {
    fn from(err: sitegate_core::Error) -> Self {
        match err {
            sitegate_core::Error::Render(msg) => IngressError::Render(msg),
            e if e.is_not_found() => IngressError::NotFound(not_found_subject(&e)),
            e => IngressError::Internal(e.to_string()),
        }
    }
}

fn not_found_subject(err: &sitegate_core::Error) -> String {
    match err {
        sitegate_core::Error::TenantNotFound(slug) | sitegate_core::Error::InvalidTenant(slug) => {
            slug.clone()
        }
        _ => String::new(),
    }
}

impl IntoResponse for IngressError {
    fn into_response(self) -> Response {
        match self {
            IngressError::NotFound(tenant) => match render_not_found(&tenant) {
                Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
                Err(e) => {
                    tracing::error!("Failed to render not-found page: {}", e);
                    (
                        StatusCode::NOT_FOUND,
                        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                        "Site not found",
                    )
                        .into_response()
                }
            },
            IngressError::Render(_) | IngressError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_PAGE_HTML)).into_response()
            }
        }
    }
}

/// Ingress result type
pub type Result<T> = std::result::Result<T, IngressError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_generate() {
        let id1 = RequestId::generate();
        let id2 = RequestId::generate();
        assert_ne!(id1, id2);
        assert!(id1.as_str().starts_with("req_"));
    }

    #[test]
    fn test_request_id_from_header() {
        assert_eq!(
            RequestId::from_header(" abc-123_x.y ").map(|id| id.to_string()),
            Some("abc-123_x.y".to_string())
        );
        assert!(RequestId::from_header("").is_none());
        assert!(RequestId::from_header("has space").is_none());
        assert!(RequestId::from_header(&"a".repeat(200)).is_none());
    }

    #[test]
    fn test_core_error_mapping() {
        let err: IngressError = sitegate_core::Error::TenantNotFound("ghost".to_string()).into();
        assert!(matches!(err, IngressError::NotFound(ref t) if t == "ghost"));

        let err: IngressError = sitegate_core::Error::Timeout(10).into();
        assert!(matches!(err, IngressError::NotFound(ref t) if t.is_empty()));

        let err: IngressError = sitegate_core::Error::Render("bad".to_string()).into();
        assert!(matches!(err, IngressError::Render(_)));

        let err: IngressError = sitegate_core::Error::Config("bad".to_string()).into();
        assert!(matches!(err, IngressError::Internal(_)));
    }

    #[test]
    fn test_status_codes() {
        let response = IngressError::NotFound("ghost".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = IngressError::Render("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
