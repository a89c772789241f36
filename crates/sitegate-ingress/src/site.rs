//! Tenant site handler
//!
//! Serves the internal route `/site/{tenant}/{*path}` that the tenant routing
//! middleware rewrites tenant traffic to. Every request gets its own
//! `ProjectLoader`, shared by metadata generation and page rendering.

use axum::{
    extract::{Path, Request, State},
    response::{Html, IntoResponse, Response},
};
use sitegate_core::{Result as CoreResult, TenantContext, TenantSlug, resolve_theme_id};
use sitegate_egress::ProjectLoader;
use sitegate_routing::resolver::SITE_PREFIX;
use sitegate_themes::{DispatchOutcome, PageMeta, RenderContext, page_path};
use tracing::{debug, warn};

use crate::state::AppState;
use crate::types::{IngressError, Result, SiteRoot};

/// `GET /site/{tenant}` and `GET /site/{tenant}/`
pub async fn site_home(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
    req: Request,
) -> Result<Response> {
    let slug = request_tenant(&req, &tenant)?;
    render_site(&state, slug, "", site_root(&req, &tenant)).await
}

/// `GET /site/{tenant}/{*path}`
pub async fn site_page(
    State(state): State<AppState>,
    Path((tenant, path)): Path<(String, String)>,
    req: Request,
) -> Result<Response> {
    let slug = request_tenant(&req, &tenant)?;
    render_site(&state, slug, &path, site_root(&req, &tenant)).await
}

/// Fallback for every route outside the tenant site
pub async fn not_found() -> Response {
    IngressError::NotFound(String::new()).into_response()
}

/// Tenant of the request: taken from the context resolved by the routing
/// middleware, else validated from the internal route segment
fn request_tenant(req: &Request, tenant: &str) -> Result<TenantSlug> {
    if let Some(context) = req.extensions().get::<TenantContext>() {
        return context.require_tenant().cloned().map_err(|e| {
            debug!("Rejecting request on {}: {}", context.host, e);
            IngressError::NotFound(tenant.to_string())
        });
    }

    TenantSlug::from_string(tenant).map_err(|e| {
        debug!("Rejecting tenant '{}': {}", tenant, e);
        IngressError::NotFound(tenant.to_string())
    })
}

/// Link prefix set by the routing middleware, else the internal route itself
fn site_root(req: &Request, tenant: &str) -> String {
    req.extensions()
        .get::<SiteRoot>()
        .map(|root| root.0.clone())
        .unwrap_or_else(|| format!("{}/{}", SITE_PREFIX, tenant))
}

/// Generate the document metadata of a page through the request's loader
pub async fn generate_meta(
    loader: &ProjectLoader,
    slug: &TenantSlug,
    page_path: &str,
) -> CoreResult<PageMeta> {
    let project = loader.load(slug).await?;
    Ok(PageMeta::for_page(&project, page_path))
}

async fn render_site(state: &AppState, slug: TenantSlug, path: &str, site_root: String) -> Result<Response> {
    let segments: Vec<&str> = path.split('/').collect();
    let page_path = page_path(&segments);
    let loader = ProjectLoader::new(state.source.clone());

    let (meta, project) = tokio::join!(
        generate_meta(&loader, &slug, &page_path),
        loader.load(&slug)
    );

    let project = project.inspect_err(|_| {
        warn!("No live project for tenant {}, serving not-found", slug);
        state.metrics.record_dispatch("none", "not_found");
    })?;
    let meta = meta?;

    let theme_id = resolve_theme_id(&project);
    let ctx = RenderContext {
        project: &project,
        tenant: &slug,
        page_path: &page_path,
        meta: &meta,
        site_root: &site_root,
    };

    let outcome = state.dispatcher.dispatch(&theme_id, &ctx).inspect_err(|_| {
        state.metrics.record_dispatch(theme_id.as_str(), "error");
    })?;
    state
        .metrics
        .record_dispatch(theme_id.as_str(), outcome.label());

    match outcome {
        DispatchOutcome::Composed(page) => Ok(Html(page.html).into_response()),
        DispatchOutcome::ThemeMissing(_) => Err(IngressError::NotFound(slug.to_string())),
    }
}
