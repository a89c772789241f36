//! Path classification for tenant routing
//!
//! This module decides, from the path alone, whether a request is a
//! framework asset / API call that must never be rewritten, a request for
//! one of the administrative sections, or ordinary page traffic.

use std::collections::HashSet;

use crate::TenancyConfig;

/// Classification of a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Framework assets, API routes, health endpoints, static files
    Passthrough,
    /// One of the administrative sections
    Admin,
    /// Anything else: main-site or tenant pages
    Page,
}

/// Classifies request paths for the tenant resolver
#[derive(Debug, Clone)]
pub struct PathClassifier {
    passthrough_prefixes: Vec<String>,
    admin_prefixes: Vec<String>,
    /// First path segments that belong to the main site and can never be a
    /// tenant slug in local development mode
    reserved_segments: HashSet<String>,
}

impl PathClassifier {
    /// Create a classifier from the tenancy configuration
    pub fn new(config: &TenancyConfig) -> Self {
        let reserved_segments = config
            .admin_prefixes
            .iter()
            .chain(&config.passthrough_prefixes)
            .chain(std::iter::once(&config.login_path))
            .filter_map(|p| first_segment(p))
            .map(str::to_string)
            .chain(std::iter::once("site".to_string()))
            .collect();

        Self {
            passthrough_prefixes: config.passthrough_prefixes.clone(),
            admin_prefixes: config.admin_prefixes.clone(),
            reserved_segments,
        }
    }

    /// Classify a request path
    ///
    /// # Examples
    /// ```
    /// use sitegate_routing::{PathClass, PathClassifier, TenancyConfig};
    ///
    /// let classifier = PathClassifier::new(&TenancyConfig::default());
    ///
    /// assert_eq!(classifier.classify("/api/projects"), PathClass::Passthrough);
    /// assert_eq!(classifier.classify("/logo.png"), PathClass::Passthrough);
    /// assert_eq!(classifier.classify("/admin/plan"), PathClass::Admin);
    /// assert_eq!(classifier.classify("/administrator"), PathClass::Page);
    /// assert_eq!(classifier.classify("/about"), PathClass::Page);
    /// ```
    pub fn classify(&self, path: &str) -> PathClass {
        if self.is_passthrough(path) {
            PathClass::Passthrough
        } else if self.is_admin(path) {
            PathClass::Admin
        } else {
            PathClass::Page
        }
    }

    /// Check if a path is a framework asset or API route
    ///
    /// Any path whose last segment carries a file extension is treated as a
    /// static file.
    pub fn is_passthrough(&self, path: &str) -> bool {
        if self
            .passthrough_prefixes
            .iter()
            .any(|prefix| has_segment_prefix(path, prefix))
        {
            return true;
        }

        path.rsplit('/')
            .next()
            .is_some_and(|last| last.contains('.') && !last.starts_with('.') && !last.ends_with('.'))
    }

    /// Check if a path targets one of the administrative sections
    pub fn is_admin(&self, path: &str) -> bool {
        self.admin_prefixes
            .iter()
            .any(|prefix| has_segment_prefix(path, prefix))
    }

    /// Check if a first path segment is reserved for the main site
    pub fn is_reserved_segment(&self, segment: &str) -> bool {
        self.reserved_segments.contains(&segment.to_ascii_lowercase())
    }
}

/// `path` equals `prefix` or continues it with a new segment.
///
/// `/admin` matches `/admin` and `/admin/plan` but not `/administrator`.
fn has_segment_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn first_segment(path: &str) -> Option<&str> {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .filter(|s| !s.is_empty())
}
