//! Backend project-by-slug lookup

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use sitegate_core::{ProjectEnvelope, ProjectMetadata, ProjectSource, TenantSlug};
use sitegate_observability::Metrics;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::{EgressError, HttpClientConfig, Result, create_client};

/// Placeholder replaced by the tenant slug in `project_path`
const SLUG_PLACEHOLDER: &str = "{slug}";

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiProjectConfig {
    /// Base URL of the website-builder backend
    pub base_url: String,

    /// Path of the project-by-slug lookup; `{slug}` is substituted
    #[serde(default = "default_project_path")]
    pub project_path: String,

    /// HTTP client settings
    #[serde(flatten)]
    pub client_config: HttpClientConfig,
}

impl Default for ApiProjectConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            project_path: default_project_path(),
            client_config: HttpClientConfig::default(),
        }
    }
}

fn default_project_path() -> String {
    "/projects/slug/{slug}".to_string()
}

/// Project source backed by the website-builder REST API
pub struct ApiProjectSource {
    config: ApiProjectConfig,
    client: Client,
    metrics: Option<Arc<Metrics>>,
}

impl ApiProjectSource {
    /// Create a new API project source
    pub fn new(config: ApiProjectConfig) -> Result<Self> {
        if !config.project_path.contains(SLUG_PLACEHOLDER) {
            return Err(EgressError::ConfigError(format!(
                "project_path '{}' must contain {}",
                config.project_path, SLUG_PLACEHOLDER
            )));
        }

        let client = create_client(&config.client_config)?;
        Ok(Self {
            config,
            client,
            metrics: None,
        })
    }

    /// Record fetch counts and latencies into `metrics`
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the lookup URL for a tenant
    pub fn project_url(&self, slug: &TenantSlug) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.project_path.replace(SLUG_PLACEHOLDER, slug.as_str())
        )
    }

    /// Perform the lookup.
    ///
    /// `Ok(None)` means the backend answered but the project is absent or
    /// disabled.
    async fn lookup(&self, slug: &TenantSlug) -> Result<Option<ProjectMetadata>> {
        let url = self.project_url(slug);
        debug!("Fetching project for tenant {} from {}", slug, url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                EgressError::Timeout(self.config.client_config.timeout_secs)
            } else {
                EgressError::HttpError(e)
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EgressError::BackendError {
                status_code: status.as_u16(),
                message,
            });
        }

        let envelope: ProjectEnvelope = response.json().await.map_err(|e| {
            if e.is_timeout() {
                EgressError::Timeout(self.config.client_config.timeout_secs)
            } else {
                EgressError::ParseError(e.to_string())
            }
        })?;

        Ok(envelope.into_live_project())
    }

    fn record(&self, result: &str, started: Instant) {
        if let Some(metrics) = &self.metrics {
            metrics.record_project_fetch(result, started.elapsed().as_secs_f64());
        }
    }
}

#[async_trait]
impl ProjectSource for ApiProjectSource {
    async fn fetch_project(&self, slug: &TenantSlug) -> sitegate_core::Result<ProjectMetadata> {
        let started = Instant::now();

        match self.lookup(slug).await {
            Ok(Some(project)) => {
                self.record("found", started);
                Ok(project)
            }
            Ok(None) => {
                self.record("not_found", started);
                Err(sitegate_core::Error::TenantNotFound(slug.to_string()))
            }
            Err(e) => {
                let label = match &e {
                    EgressError::Timeout(_) => "timeout",
                    _ => "error",
                };
                self.record(label, started);
                warn!("Project lookup for tenant {} failed: {}", slug, e);
                Err(e.into())
            }
        }
    }
}
