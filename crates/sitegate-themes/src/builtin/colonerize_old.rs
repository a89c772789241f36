//! `colonerize-old` theme: the legacy single-column layout

use askama::Template;
use sitegate_core::Result;

use crate::context::{NavItem, PageMeta, RenderContext, SiteView, render_template};
use crate::registry::Theme;

const NAV: &[(&str, &str)] = &[("home", "Home"), ("about", "Our story")];

#[derive(Template)]
#[template(path = "colonerize_old/layout.html")]
struct LayoutTemplate<'a> {
    site: SiteView,
    nav: Vec<NavItem>,
    meta: &'a PageMeta,
    body: &'a str,
}

#[derive(Template)]
#[template(path = "colonerize_old/home.html")]
struct HomeTemplate<'a> {
    site: SiteView,
    meta: &'a PageMeta,
}

#[derive(Template)]
#[template(path = "colonerize_old/about.html")]
struct AboutTemplate<'a> {
    site: SiteView,
    meta: &'a PageMeta,
}

pub(crate) fn theme() -> Theme {
    Theme::new(layout)
        .with_page("home", home)
        .with_page("about", about)
}

fn layout(ctx: &RenderContext<'_>, body: &str) -> Result<String> {
    render_template(&LayoutTemplate {
        site: ctx.site(),
        nav: ctx.nav(NAV),
        meta: ctx.meta,
        body,
    })
}

fn home(ctx: &RenderContext<'_>) -> Result<String> {
    render_template(&HomeTemplate {
        site: ctx.site(),
        meta: ctx.meta,
    })
}

fn about(ctx: &RenderContext<'_>) -> Result<String> {
    render_template(&AboutTemplate {
        site: ctx.site(),
        meta: ctx.meta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::test_support::with_context;

    #[test]
    fn test_home_in_layout() {
        let html = with_context("home", |ctx| {
            let body = home(ctx)?;
            layout(ctx, &body)
        })
        .unwrap();

        assert!(html.contains("theme-colonerize-old"));
        assert!(html.contains("colonerize-home"));
    }
}
