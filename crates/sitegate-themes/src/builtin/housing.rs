//! `housing` theme: real-estate sites with a listings page

use askama::Template;
use sitegate_core::Result;

use crate::context::{NavItem, PageMeta, RenderContext, SiteView, render_template};
use crate::registry::Theme;

const NAV: &[(&str, &str)] = &[
    ("home", "Home"),
    ("listings", "Listings"),
    ("about", "About us"),
    ("contact", "Contact"),
];

#[derive(Template)]
#[template(path = "housing/layout.html")]
struct LayoutTemplate<'a> {
    site: SiteView,
    nav: Vec<NavItem>,
    meta: &'a PageMeta,
    body: &'a str,
}

#[derive(Template)]
#[template(path = "housing/home.html")]
struct HomeTemplate<'a> {
    site: SiteView,
    meta: &'a PageMeta,
    listings_href: String,
}

#[derive(Template)]
#[template(path = "housing/about.html")]
struct AboutTemplate<'a> {
    site: SiteView,
    meta: &'a PageMeta,
}

#[derive(Template)]
#[template(path = "housing/listings.html")]
struct ListingsTemplate {
    site: SiteView,
}

#[derive(Template)]
#[template(path = "housing/contact.html")]
struct ContactTemplate {
    site: SiteView,
}

pub(crate) fn theme() -> Theme {
    Theme::new(layout)
        .with_page("home", home)
        .with_page("about", about)
        .with_page("listings", listings)
        .with_page("contact", contact)
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
        listings_href: ctx.href("listings"),
    })
}

fn about(ctx: &RenderContext<'_>) -> Result<String> {
    render_template(&AboutTemplate {
        site: ctx.site(),
        meta: ctx.meta,
    })
}

fn listings(ctx: &RenderContext<'_>) -> Result<String> {
    render_template(&ListingsTemplate { site: ctx.site() })
}

fn contact(ctx: &RenderContext<'_>) -> Result<String> {
    render_template(&ContactTemplate { site: ctx.site() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::test_support::with_context;

    #[test]
    fn test_layout_marks_active_page() {
        let html = with_context("about", |ctx| layout(ctx, "")).unwrap();
        assert!(html.contains("theme-housing"));
        assert!(html.contains("<title>About | Acme Homes</title>"));
        assert!(html.contains("class=\"active\""));
        assert!(html.contains("Call us: 555 0100"));
    }

    #[test]
    fn test_pages_render() {
        let html = with_context("about", about).unwrap();
        assert!(html.contains("About Acme Homes"));

        let html = with_context("home", home).unwrap();
        assert!(html.contains("Find your next home with Acme Homes"));

        let html = with_context("listings", listings).unwrap();
        assert!(html.contains("<h1>Listings</h1>"));
    }
}
