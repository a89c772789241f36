//! Project source trait
//!
//! The `ProjectSource` trait abstracts the website-builder backend so that
//! the request-scoped loader and the site handler can be exercised against
//! the real HTTP backend or an in-memory fake.

use async_trait::async_trait;

use crate::{ProjectMetadata, Result, TenantSlug};

/// Source of tenant project metadata
///
/// Implementations:
/// - `ApiProjectSource` (in `sitegate-egress`): HTTP lookup against the backend
///
/// # Example
/// ```no_run
/// # use sitegate_core::{ProjectSource, TenantSlug};
/// # async fn example(source: &dyn ProjectSource) -> sitegate_core::Result<()> {
/// let slug = TenantSlug::from_string("acme")?;
/// let project = source.fetch_project(&slug).await?;
/// println!("{}", project.company_name);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ProjectSource: Send + Sync {
    /// Fetch project metadata for a tenant
    ///
    /// # Errors
    /// - `Error::TenantNotFound` if the backend reports the project as absent
    ///   or disabled
    /// - `Error::Backend` for transport or unexpected status errors
    /// - `Error::Timeout` if the backend did not answer in time
    async fn fetch_project(&self, slug: &TenantSlug) -> Result<ProjectMetadata>;
}
