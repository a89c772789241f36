//! Static theme registry
//!
//! Themes are compiled into the binary. A theme is a layout function plus a
//! map from page path to page function; looking up an unknown theme or page
//! is an ordinary `None`, never an error.

use sitegate_core::{Result, ThemeId};
use std::collections::HashMap;

use crate::builtin;
use crate::context::RenderContext;

/// Wraps a rendered page body in the theme's document shell
pub type LayoutFn = fn(&RenderContext<'_>, &str) -> Result<String>;

/// Renders the body of a single page
pub type PageFn = fn(&RenderContext<'_>) -> Result<String>;

/// A layout and the pages it can wrap
#[derive(Clone)]
pub struct Theme {
    layout: LayoutFn,
    pages: HashMap<&'static str, PageFn>,
}

impl Theme {
    /// Create a theme with no pages
    pub fn new(layout: LayoutFn) -> Self {
        Self {
            layout,
            pages: HashMap::new(),
        }
    }

    /// Add a page under `path`
    pub fn with_page(mut self, path: &'static str, page: PageFn) -> Self {
        self.pages.insert(path, page);
        self
    }

    pub fn layout(&self) -> LayoutFn {
        self.layout
    }

    pub fn page(&self, path: &str) -> Option<PageFn> {
        self.pages.get(path).copied()
    }

    /// Registered page paths, sorted
    pub fn page_paths(&self) -> Vec<&'static str> {
        let mut paths: Vec<_> = self.pages.keys().copied().collect();
        paths.sort_unstable();
        paths
    }
}

/// Theme id → theme lookup table
#[derive(Clone, Default)]
pub struct ThemeRegistry {
    themes: HashMap<ThemeId, Theme>,
}

impl ThemeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in theme
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (id, theme) in builtin::themes() {
            registry.register(ThemeId::normalize(Some(id)), theme);
        }
        registry
    }

    /// Register a theme, replacing any theme with the same id
    pub fn register(&mut self, id: ThemeId, theme: Theme) {
        self.themes.insert(id, theme);
    }

    /// Layout of a theme, if the theme exists
    pub fn layout(&self, id: &ThemeId) -> Option<LayoutFn> {
        self.themes.get(id).map(Theme::layout)
    }

    /// Page of a theme, if both exist
    pub fn page(&self, id: &ThemeId, page_path: &str) -> Option<PageFn> {
        self.themes.get(id)?.page(page_path)
    }

    pub fn get(&self, id: &ThemeId) -> Option<&Theme> {
        self.themes.get(id)
    }

    pub fn contains(&self, id: &ThemeId) -> bool {
        self.themes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Registered theme ids, sorted
    pub fn theme_ids(&self) -> Vec<&ThemeId> {
        let mut ids: Vec<_> = self.themes.keys().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ThemeId {
        ThemeId::normalize(Some(s))
    }

    #[test]
    fn test_builtin_themes() {
        let registry = ThemeRegistry::builtin();
        let ids: Vec<_> = registry.theme_ids().iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["colonerize-old", "default", "housing"]);

        let housing = registry.get(&id("housing")).unwrap();
        assert_eq!(
            housing.page_paths(),
            vec!["about", "contact", "home", "listings"]
        );
    }

    #[test]
    fn test_lookup_misses_are_none() {
        let registry = ThemeRegistry::builtin();

        assert!(registry.layout(&id("housing")).is_some());
        assert!(registry.page(&id("housing"), "about").is_some());

        assert!(registry.layout(&id("brutalist")).is_none());
        assert!(registry.page(&id("brutalist"), "about").is_none());
        assert!(registry.page(&id("housing"), "nonexistent-page").is_none());
        assert!(registry.page(&id("colonerize-old"), "listings").is_none());
    }

    #[test]
    fn test_empty_registry() {
        let registry = ThemeRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(!registry.contains(&id("default")));
    }
}
