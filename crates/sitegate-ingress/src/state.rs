//! Shared application state

use sitegate_core::ProjectSource;
use sitegate_observability::Metrics;
use sitegate_routing::{TenancyConfig, TenantResolver};
use sitegate_themes::{PageDispatcher, ThemeRegistry};
use std::sync::Arc;

/// Immutable state shared by every request
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<TenantResolver>,
    pub dispatcher: PageDispatcher,
    /// Backend used by each request's `ProjectLoader`
    pub source: Arc<dyn ProjectSource>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(
        tenancy: &TenancyConfig,
        registry: Arc<ThemeRegistry>,
        source: Arc<dyn ProjectSource>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            resolver: Arc::new(TenantResolver::new(tenancy)),
            dispatcher: PageDispatcher::new(registry),
            source,
            metrics,
        }
    }
}
