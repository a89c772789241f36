//! SiteGate Ingress
//!
//! The HTTP surface of SiteGate: middleware that resolves every request
//! against the tenancy rules, and the tenant site handler that loads the
//! project and dispatches the page to its theme.

pub mod cookies;
pub mod middleware;
pub mod site;
pub mod state;
pub mod types;

pub use state::AppState;
pub use types::{IngressError, RequestId, Result, SiteRoot};

use axum::{Router, middleware::from_fn, middleware::from_fn_with_state, routing::get};
use sitegate_observability::{HealthState, health_router};
use tower_http::trace::TraceLayer;

/// Router for the internal tenant route
pub fn site_router(state: AppState) -> Router {
    Router::new()
        .route("/site/{tenant}", get(site::site_home))
        .route("/site/{tenant}/", get(site::site_home))
        .route("/site/{tenant}/{*path}", get(site::site_page))
        .fallback(site::not_found)
        .with_state(state)
}

/// Complete application router.
///
/// Health endpoints are matched first. Everything else reaches the site
/// router through the tenant routing middleware, which rewrites the URI
/// before the site router matches it.
pub fn app(state: AppState, health: HealthState) -> Router {
    Router::new()
        .merge(health_router(health))
        .fallback_service(site_router(state.clone()))
        .layer(from_fn_with_state(
            state,
            middleware::tenant_routing_middleware,
        ))
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_context_middleware))
        .layer(TraceLayer::new_for_http())
}
