//! Request-scoped project loader
//!
//! A `ProjectLoader` is created for every inbound request and dropped with
//! it. Within that lifetime each distinct tenant slug is fetched from the
//! backend at most once, even when several parts of the render (document
//! metadata, page body) ask for the same project concurrently. It is not a
//! process-wide cache: a new request always sees fresh backend data.

use dashmap::DashMap;
use sitegate_core::{Error, ProjectMetadata, ProjectSource, Result, TenantSlug};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Outcome of a single backend lookup, shared by every caller in the request.
///
/// Failures are kept as "absent" so that a failed lookup is not retried
/// within the same request.
type SharedLookup = Option<Arc<ProjectMetadata>>;

/// Request-scoped, memoizing project loader
pub struct ProjectLoader {
    source: Arc<dyn ProjectSource>,
    lookups: DashMap<TenantSlug, Arc<OnceCell<SharedLookup>>>,
}

impl ProjectLoader {
    /// Create a loader for one request
    pub fn new(source: Arc<dyn ProjectSource>) -> Self {
        Self {
            source,
            lookups: DashMap::new(),
        }
    }

    /// Load the project for a tenant
    ///
    /// # Errors
    /// `Error::TenantNotFound` when the backend reports the project as absent
    /// or disabled, or when the lookup failed for any other reason.
    pub async fn load(&self, slug: &TenantSlug) -> Result<Arc<ProjectMetadata>> {
        // Clone the cell out so the map shard lock is not held across the await
        let cell = self
            .lookups
            .entry(slug.clone())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        let lookup = cell
            .get_or_init(|| async {
                match self.source.fetch_project(slug).await {
                    Ok(project) => {
                        debug!("Loaded project '{}' for tenant {}", project.company_name, slug);
                        Some(Arc::new(project))
                    }
                    Err(Error::TenantNotFound(_)) => {
                        debug!("Tenant {} not found", slug);
                        None
                    }
                    Err(e) => {
                        warn!("Treating tenant {} as not found: {}", slug, e);
                        None
                    }
                }
            })
            .await;

        lookup
            .clone()
            .ok_or_else(|| Error::TenantNotFound(slug.to_string()))
    }

    /// Number of distinct tenants looked up so far
    pub fn distinct_lookups(&self) -> usize {
        self.lookups.len()
    }
}
