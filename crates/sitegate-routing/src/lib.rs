//! SiteGate Routing Engine
//!
//! This crate decides what happens to every inbound request before any
//! handler runs:
//! - Path classification (framework assets, admin sections)
//! - Tenant resolution from the host header (subdomains, local development)
//! - Admin gating by host allow-list and session cookie

pub mod config;
pub mod path_classifier;
pub mod resolver;

// Re-export commonly used types
pub use config::TenancyConfig;
pub use path_classifier::{PathClass, PathClassifier};
pub use resolver::{RedirectReason, RoutingDecision, TenantResolver, site_path};
