//! Canonical theme identifiers
//!
//! Projects reference their theme by a free-form slug or name ("Housing",
//! "Colonerize Old!!"). Before it can address the theme registry the
//! reference is normalized into a [`ThemeId`]: lower-case, whitespace runs
//! collapsed to a single hyphen, everything outside `[a-z0-9-]` stripped.
//! A reference that leaves no letter or digit behind selects the default
//! theme.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

use crate::ProjectMetadata;

/// Theme used when a project has no (usable) theme reference
pub const DEFAULT_THEME: &str = "default";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Normalized, lookup-safe theme identifier.
///
/// Always non-empty and composed only of `[a-z0-9-]`, so it can never carry
/// path separators or traversal sequences.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ThemeId(String);

impl ThemeId {
    /// Normalize an optional theme reference into a theme id
    pub fn normalize(reference: Option<&str>) -> Self {
        let Some(reference) = reference else {
            return Self::default();
        };

        let lowered = reference.trim().to_lowercase();
        let hyphenated = WHITESPACE_RUN.replace_all(&lowered, "-");
        let canonical: String = hyphenated
            .chars()
            .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || *ch == '-')
            .collect();
        let canonical = canonical.trim_matches('-');

        if !canonical.chars().any(|ch| ch.is_ascii_alphanumeric()) {
            return Self::default();
        }

        Self(canonical.to_string())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the default theme
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_THEME
    }
}

impl Default for ThemeId {
    fn default() -> Self {
        Self(DEFAULT_THEME.to_string())
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ThemeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derive the canonical theme id of a project. Pure; no I/O.
pub fn resolve_theme_id(project: &ProjectMetadata) -> ThemeId {
    ThemeId::normalize(project.theme_reference())
}
