//! Application assembly
//!
//! Wires the configuration into the shared state: backend project source,
//! built-in theme registry, metrics, and the readiness checks served on
//! `/readyz`.

use axum::Router;
use sitegate_egress::ApiProjectSource;
use sitegate_ingress::AppState;
use sitegate_observability::{HealthState, Metrics, Readiness, ReadinessChecker};
use sitegate_themes::ThemeRegistry;
use std::sync::Arc;

use crate::config::ServerConfig;

/// Ready once at least one theme is registered
pub struct ThemeRegistryReadiness {
    registry: Arc<ThemeRegistry>,
}

impl ThemeRegistryReadiness {
    pub fn new(registry: Arc<ThemeRegistry>) -> Self {
        Self { registry }
    }
}

impl ReadinessChecker for ThemeRegistryReadiness {
    fn check(&self) -> Readiness {
        let themes: Vec<&str> = self
            .registry
            .theme_ids()
            .into_iter()
            .map(|id| id.as_str())
            .collect();

        Readiness {
            ready: !themes.is_empty(),
            detail: format!("{} themes registered: {}", themes.len(), themes.join(", ")),
        }
    }
}

/// Build the complete router for `config`
pub fn build_app(config: &ServerConfig, registry: Arc<ThemeRegistry>) -> anyhow::Result<Router> {
    let metrics = Arc::new(
        Metrics::new().map_err(|e| anyhow::anyhow!("Failed to create metrics: {}", e))?,
    );

    let source = ApiProjectSource::new(config.backend.clone())?.with_metrics(metrics.clone());

    let health = HealthState::with_readiness_checker(
        metrics.clone(),
        Arc::new(ThemeRegistryReadiness::new(registry.clone())),
    );

    let state = AppState::new(&config.tenancy, registry, Arc::new(source), metrics);

    Ok(sitegate_ingress::app(state, health))
}
