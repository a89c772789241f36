//! Ingress middleware

use crate::cookies;
use crate::state::AppState;
use crate::types::{IngressError, RequestId, SiteRoot};
use axum::{
    extract::{Request, State},
    http::{HeaderValue, Uri, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use sitegate_routing::RoutingDecision;
use tracing::{debug, warn};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware to tag every request and response with a request id
pub async fn request_context_middleware(mut req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(RequestId::from_header)
        .unwrap_or_else(RequestId::generate);

    req.extensions_mut().insert(request_id.clone());

    let mut response = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Middleware to add security headers
pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    let headers = response.headers_mut();
    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("x-frame-options", HeaderValue::from_static("SAMEORIGIN"));
    headers.insert(
        "referrer-policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        "strict-transport-security",
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );

    response
}

/// Host of the request: `Host` header, else the URI authority
fn request_host(req: &Request) -> &str {
    req.headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| req.uri().authority().map(|a| a.as_str()))
        .unwrap_or_default()
}

/// Middleware applying the tenant routing decision.
///
/// Must wrap the router whose routes should see the rewritten URI, so it is
/// installed around the site router's fallback service.
pub async fn tenant_routing_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let host = request_host(&req).to_string();
    let has_session_token = cookies::has_cookie(req.headers(), &state.resolver.config().session_cookie);

    let decision = state
        .resolver
        .resolve(&host, req.uri().path(), has_session_token);
    state.metrics.record_routing_decision(decision.label());

    match decision {
        RoutingDecision::PassThrough => next.run(req).await,
        RoutingDecision::Redirect {
            location,
            clear_cookies,
            reason,
        } => {
            debug!(
                "Redirecting {}{} to {} ({})",
                host,
                req.uri().path(),
                location,
                reason.as_str()
            );

            let mut response = Redirect::temporary(&location).into_response();
            if clear_cookies {
                for expired in cookies::expire_all(req.headers()) {
                    response.headers_mut().append(header::SET_COOKIE, expired);
                }
            }
            response
        }
        RoutingDecision::Rewrite { path, context } => {
            let target = match req.uri().query() {
                Some(query) => format!("{}?{}", path, query),
                None => path,
            };

            let uri = match target.parse::<Uri>() {
                Ok(uri) => uri,
                Err(e) => {
                    warn!("Cannot rewrite {}{} to {}: {}", host, req.uri(), target, e);
                    return IngressError::Internal(e.to_string()).into_response();
                }
            };

            let site_root = state.resolver.site_root(&context);
            *req.uri_mut() = uri;
            req.extensions_mut().insert(SiteRoot(site_root));
            req.extensions_mut().insert(context);

            next.run(req).await
        }
    }
}
