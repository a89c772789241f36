//! Themes compiled into the binary

mod colonerize_old;
mod default_theme;
mod housing;

use crate::registry::Theme;

/// Built-in themes keyed by their canonical id
pub(crate) fn themes() -> Vec<(&'static str, Theme)> {
    vec![
        ("default", default_theme::theme()),
        ("housing", housing::theme()),
        ("colonerize-old", colonerize_old::theme()),
    ]
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::context::{PageMeta, RenderContext};
    use sitegate_core::{ProjectMetadata, SocialLinks, TenantSlug};

    pub fn project() -> ProjectMetadata {
        ProjectMetadata {
            company_name: "Acme Homes".to_string(),
            meta_description: Some("Homes for everyone".to_string()),
            email: Some("hello@acme.test".to_string()),
            phone: Some("555 0100".to_string()),
            social: SocialLinks {
                facebook: Some("https://facebook.com/acme".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Run `f` with a render context for `page_path`
    pub fn with_context<T>(page_path: &str, f: impl FnOnce(&RenderContext<'_>) -> T) -> T {
        let project = project();
        let tenant = TenantSlug::from_string("acme").unwrap();
        let meta = PageMeta::for_page(&project, page_path);
        let ctx = RenderContext {
            project: &project,
            tenant: &tenant,
            page_path,
            meta: &meta,
            site_root: "",
        };
        f(&ctx)
    }
}
