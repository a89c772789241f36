//! Page dispatch: theme layout + page, or the generic fallback page
//!
//! Resolution runs in a fixed order:
//!
//! 1. the layout of the theme is looked up; a miss ends dispatch with
//!    `ThemeMissing` and no other theme is substituted
//! 2. the page is looked up under the joined page path; a miss renders the
//!    generic fallback body instead
//! 3. the layout wraps the page body
//!
//! A missing page therefore never turns into a not-found response as long as
//! the theme itself resolves.

use sitegate_core::{Result, ThemeId};
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::context::{HOME_PAGE, RenderContext};
use crate::fallback::render_fallback;
use crate::registry::ThemeRegistry;

/// Where the page body came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSource {
    /// The theme's own page
    Theme,
    /// The generic fallback page
    Fallback,
}

impl PageSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageSource::Theme => "theme",
            PageSource::Fallback => "fallback",
        }
    }
}

/// A fully composed document
#[derive(Debug, Clone)]
pub struct ComposedPage {
    pub theme_id: ThemeId,
    pub page_path: String,
    pub source: PageSource,
    pub html: String,
}

/// Result of dispatching one page
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    Composed(ComposedPage),
    /// The theme has no registered layout
    ThemeMissing(ThemeId),
}

impl DispatchOutcome {
    /// Metrics label
    pub fn label(&self) -> &'static str {
        match self {
            DispatchOutcome::Composed(page) => page.source.as_str(),
            DispatchOutcome::ThemeMissing(_) => "theme_missing",
        }
    }
}

/// Join request segments into a page path; `home` when there are none
pub fn page_path<S: AsRef<str>>(segments: &[S]) -> String {
    let joined = segments
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        HOME_PAGE.to_string()
    } else {
        joined
    }
}

/// Dispatches pages against a theme registry
#[derive(Clone)]
pub struct PageDispatcher {
    registry: Arc<ThemeRegistry>,
}

impl PageDispatcher {
    pub fn new(registry: Arc<ThemeRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    /// Render `ctx.page_path` of `theme_id`.
    ///
    /// # Errors
    /// `Error::Render` when a template fails to render. Lookup misses are
    /// not errors.
    pub fn dispatch(&self, theme_id: &ThemeId, ctx: &RenderContext<'_>) -> Result<DispatchOutcome> {
        let Some(layout) = self.registry.layout(theme_id) else {
            warn!(
                "Theme '{}' of tenant {} is not registered",
                theme_id, ctx.tenant
            );
            return Ok(DispatchOutcome::ThemeMissing(theme_id.clone()));
        };

        let (body, source) = match self.registry.page(theme_id, ctx.page_path) {
            Some(page) => (page(ctx), PageSource::Theme),
            None => {
                warn!(
                    "Page '{}' not found in theme '{}', rendering fallback for tenant {}",
                    ctx.page_path, theme_id, ctx.tenant
                );
                (
                    render_fallback(ctx.tenant.as_str(), ctx.page_path),
                    PageSource::Fallback,
                )
            }
        };

        let html = body
            .and_then(|body| layout(ctx, &body))
            .inspect_err(|e| {
                error!(
                    "Failed to render page '{}' of theme '{}': {}",
                    ctx.page_path, theme_id, e
                )
            })?;

        debug!(
            "Composed page '{}' of theme '{}' ({})",
            ctx.page_path,
            theme_id,
            source.as_str()
        );

        Ok(DispatchOutcome::Composed(ComposedPage {
            theme_id: theme_id.clone(),
            page_path: ctx.page_path.to_string(),
            source,
            html,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PageMeta;
    use crate::registry::Theme;
    use sitegate_core::{Error, ProjectMetadata, TenantSlug};

    fn dispatcher() -> PageDispatcher {
        PageDispatcher::new(Arc::new(ThemeRegistry::builtin()))
    }

    fn run(dispatcher: &PageDispatcher, theme: &str, page: &str) -> Result<DispatchOutcome> {
        let project = ProjectMetadata {
            company_name: "Acme Homes".to_string(),
            ..Default::default()
        };
        let tenant = TenantSlug::from_string("acme").unwrap();
        let meta = PageMeta::for_page(&project, page);
        let ctx = RenderContext {
            project: &project,
            tenant: &tenant,
            page_path: page,
            meta: &meta,
            site_root: "",
        };
        dispatcher.dispatch(&ThemeId::normalize(Some(theme)), &ctx)
    }

    fn composed(outcome: DispatchOutcome) -> ComposedPage {
        match outcome {
            DispatchOutcome::Composed(page) => page,
            other => panic!("expected composed page, got {:?}", other),
        }
    }

    #[test]
    fn test_page_path() {
        assert_eq!(page_path::<&str>(&[]), "home");
        assert_eq!(page_path(&["about"]), "about");
        assert_eq!(page_path(&["listings", "", "2024"]), "listings/2024");
        assert_eq!(page_path(&[String::new()]), "home");
    }

    #[test]
    fn test_known_page_is_composed() {
        let page = composed(run(&dispatcher(), "housing", "about").unwrap());

        assert_eq!(page.source, PageSource::Theme);
        assert_eq!(page.theme_id.as_str(), "housing");
        assert!(page.html.contains("theme-housing"));
        assert!(page.html.contains("About Acme Homes"));
    }

    #[test]
    fn test_punctuation_only_theme_renders_default() {
        for theme in ["!!! ???", " - ", "?"] {
            let outcome = run(&dispatcher(), theme, "home").unwrap();
            assert_ne!(outcome.label(), "theme_missing", "theme {:?}", theme);
        }

        let page = composed(run(&dispatcher(), "!!! ???", "about").unwrap());
        assert_eq!(page.theme_id.as_str(), "default");
        assert_eq!(page.source, PageSource::Theme);
        assert!(page.html.contains("theme-default"));
    }

    #[test]
    fn test_unknown_page_falls_back_inside_layout() {
        let outcome = run(&dispatcher(), "housing", "nonexistent-page").unwrap();
        assert_eq!(outcome.label(), "fallback");

        let page = composed(outcome);
        assert_eq!(page.source, PageSource::Fallback);
        assert!(page.html.contains("theme-housing"));
        assert!(page.html.contains("fallback-page"));
        assert!(page.html.contains("nonexistent-page"));
    }

    #[test]
    fn test_every_registered_page_composes() {
        let dispatcher = dispatcher();
        for id in dispatcher.registry().theme_ids() {
            let theme = dispatcher.registry().get(id).unwrap();
            for page in theme.page_paths() {
                let page = composed(run(&dispatcher, id.as_str(), page).unwrap());
                assert_eq!(page.source, PageSource::Theme);
            }
        }
    }

    #[test]
    fn test_unknown_theme_is_missing() {
        let outcome = run(&dispatcher(), "brutalist", "about").unwrap();
        assert!(matches!(outcome, DispatchOutcome::ThemeMissing(ref id) if id.as_str() == "brutalist"));
        assert_eq!(outcome.label(), "theme_missing");
    }

    #[test]
    fn test_render_failure_is_error() {
        fn failing_layout(_: &RenderContext<'_>, _: &str) -> Result<String> {
            Err(Error::Render("layout exploded".to_string()))
        }

        let mut registry = ThemeRegistry::new();
        registry.register(ThemeId::normalize(Some("broken")), Theme::new(failing_layout));

        let result = run(&PageDispatcher::new(Arc::new(registry)), "broken", "home");
        assert!(matches!(result, Err(Error::Render(_))));
    }
}
