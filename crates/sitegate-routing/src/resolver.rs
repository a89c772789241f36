//! Tenant resolver
//!
//! Maps an inbound `(host, path, session cookie present)` triple to a
//! routing decision:
//! - Framework assets and API routes pass through untouched
//! - Admin sections on non-admin hosts redirect to the site root
//! - Admin sections on admin hosts require a session token, otherwise the
//!   request is redirected to the login page with every cookie cleared
//! - Bypass hosts and subdomains are served as-is
//! - Tenant subdomains (and the first path segment on local development
//!   hosts) are rewritten to the internal `/site/{tenant}/{rest}` route

use sitegate_core::{TenantContext, TenantSlug};
use tracing::debug;

use crate::{PathClass, PathClassifier, TenancyConfig};

/// Internal route prefix serving tenant sites
pub const SITE_PREFIX: &str = "/site";

/// Why a redirect was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// Admin section requested on a host that does not serve it
    AdminOnNonAdminHost,
    /// Admin section requested without a session token
    Unauthenticated,
}

impl RedirectReason {
    /// Short label for logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            RedirectReason::AdminOnNonAdminHost => "admin_on_non_admin_host",
            RedirectReason::Unauthenticated => "unauthenticated",
        }
    }
}

/// Outcome of tenant resolution for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDecision {
    /// Serve the request unchanged
    PassThrough,
    /// Answer with a redirect
    Redirect {
        location: String,
        /// Expire every cookie sent with the request
        clear_cookies: bool,
        reason: RedirectReason,
    },
    /// Serve the request from the internal tenant route
    Rewrite {
        path: String,
        context: TenantContext,
    },
}

impl RoutingDecision {
    /// Short label for logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            RoutingDecision::PassThrough => "pass_through",
            RoutingDecision::Redirect { reason, .. } => reason.as_str(),
            RoutingDecision::Rewrite { .. } => "rewrite",
        }
    }
}

/// Build the internal route for a tenant and the remaining path.
///
/// `rest` is either empty or starts with `/`.
pub fn site_path(slug: &TenantSlug, rest: &str) -> String {
    format!("{}/{}{}", SITE_PREFIX, slug, rest)
}

/// Resolves inbound requests against the tenancy configuration
#[derive(Debug, Clone)]
pub struct TenantResolver {
    config: TenancyConfig,
    classifier: PathClassifier,
}

impl TenantResolver {
    /// Create a resolver; hosts and domains in `config` are normalized
    pub fn new(config: &TenancyConfig) -> Self {
        let config = config.normalized();
        let classifier = PathClassifier::new(&config);
        Self { config, classifier }
    }

    /// Get the (normalized) configuration
    pub fn config(&self) -> &TenancyConfig {
        &self.config
    }

    /// Resolve a request
    ///
    /// # Arguments
    /// * `host` - Raw `Host` header value (port allowed)
    /// * `path` - Request path, without query string
    /// * `has_session_token` - Whether the admin session cookie is present
    pub fn resolve(&self, host: &str, path: &str, has_session_token: bool) -> RoutingDecision {
        let path = if path.is_empty() { "/" } else { path };

        let class = self.classifier.classify(path);
        if class == PathClass::Passthrough {
            debug!("Passing through framework path {}", path);
            return RoutingDecision::PassThrough;
        }

        let context = self.tenant_context(host, path);

        if class == PathClass::Admin {
            if !self.is_admin_host(&context.host) {
                debug!(
                    "Admin path {} requested on non-admin host {}, redirecting to root",
                    path, context.host
                );
                return RoutingDecision::Redirect {
                    location: "/".to_string(),
                    clear_cookies: false,
                    reason: RedirectReason::AdminOnNonAdminHost,
                };
            }

            if !has_session_token {
                debug!(
                    "Admin path {} requested without session token, redirecting to {}",
                    path, self.config.login_path
                );
                return RoutingDecision::Redirect {
                    location: self.config.login_path.clone(),
                    clear_cookies: true,
                    reason: RedirectReason::Unauthenticated,
                };
            }

            return RoutingDecision::PassThrough;
        }

        if self.is_bypass_host(&context.host) {
            debug!("Host {} bypasses tenant routing", context.host);
            return RoutingDecision::PassThrough;
        }

        let Some(slug) = context.tenant_slug.clone() else {
            return RoutingDecision::PassThrough;
        };

        let rest = if context.matched_base_domain.is_some() && !self.subdomain_of(&context).is_empty() {
            path.to_string()
        } else {
            strip_first_segment(path).to_string()
        };

        let rewritten = site_path(&slug, &rest);
        debug!(
            "Rewriting {}{} to {} (tenant: {})",
            context.host, path, rewritten, slug
        );

        RoutingDecision::Rewrite {
            path: rewritten,
            context,
        }
    }

    /// Derive the tenant context of a request
    pub fn tenant_context(&self, host: &str, path: &str) -> TenantContext {
        let mut context = TenantContext::new(host);
        context.is_local_development = self.is_local_host(&context.host);
        context.matched_base_domain = self.match_base_domain(&context.host).map(str::to_string);

        let subdomain = self.subdomain_of(&context);
        if !subdomain.is_empty() {
            if self.is_tenant_subdomain(subdomain) {
                context.tenant_slug = TenantSlug::from_string(subdomain).ok();
            }
            return context;
        }

        if context.is_local_development
            && let Some(segment) = path.trim_start_matches('/').split('/').next()
            && !segment.is_empty()
            && !self.classifier.is_reserved_segment(segment)
        {
            context.tenant_slug = TenantSlug::from_string(segment).ok();
        }

        context
    }

    /// Prefix of in-site links for a tenant request: empty when the tenant
    /// comes from the subdomain, `/{slug}` in local development
    pub fn site_root(&self, context: &TenantContext) -> String {
        match &context.tenant_slug {
            Some(slug) if self.subdomain_of(context).is_empty() => format!("/{}", slug),
            _ => String::new(),
        }
    }

    /// Longest configured base domain the host equals or is a subdomain of
    fn match_base_domain(&self, host: &str) -> Option<&str> {
        self.config
            .base_domains
            .iter()
            .filter(|domain| is_same_or_subdomain(host, domain))
            .max_by_key(|domain| domain.len())
            .map(String::as_str)
    }

    /// Subdomain part of the host relative to the matched base domain
    fn subdomain_of<'a>(&self, context: &'a TenantContext) -> &'a str {
        match &context.matched_base_domain {
            Some(base) => context
                .host
                .strip_suffix(base.as_str())
                .and_then(|s| s.strip_suffix('.'))
                .unwrap_or(""),
            None => "",
        }
    }

    fn is_tenant_subdomain(&self, subdomain: &str) -> bool {
        subdomain != "www"
            && !subdomain.contains('.')
            && !self.config.bypass_subdomains.iter().any(|s| s == subdomain)
    }

    fn is_admin_host(&self, host: &str) -> bool {
        self.config.admin_hosts.iter().any(|h| h == host)
    }

    fn is_bypass_host(&self, host: &str) -> bool {
        self.config.bypass_hosts.iter().any(|h| h == host)
    }

    fn is_local_host(&self, host: &str) -> bool {
        self.config
            .local_dev_hosts
            .iter()
            .any(|local| is_same_or_subdomain(host, local))
    }
}

fn is_same_or_subdomain(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Drop the first path segment: `/acme/about` → `/about`, `/acme` → ``
fn strip_first_segment(path: &str) -> &str {
    let trimmed = path.trim_start_matches('/');
    match trimmed.find('/') {
        Some(idx) => &trimmed[idx..],
        None => "",
    }
}
