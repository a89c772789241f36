//! `default` theme: used by every project without a theme assignment

use askama::Template;
use sitegate_core::Result;

use crate::context::{NavItem, PageMeta, RenderContext, SiteView, render_template};
use crate::registry::Theme;

const NAV: &[(&str, &str)] = &[("home", "Home"), ("about", "About"), ("contact", "Contact")];

#[derive(Template)]
#[template(path = "default/layout.html")]
struct LayoutTemplate<'a> {
    site: SiteView,
    nav: Vec<NavItem>,
    meta: &'a PageMeta,
    body: &'a str,
}

#[derive(Template)]
#[template(path = "default/home.html")]
struct HomeTemplate<'a> {
    site: SiteView,
    meta: &'a PageMeta,
}

#[derive(Template)]
#[template(path = "default/about.html")]
struct AboutTemplate<'a> {
    site: SiteView,
    meta: &'a PageMeta,
}

#[derive(Template)]
#[template(path = "default/contact.html")]
struct ContactTemplate {
    site: SiteView,
}

pub(crate) fn theme() -> Theme {
    Theme::new(layout)
        .with_page("home", home)
        .with_page("about", about)
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
    })
}

fn about(ctx: &RenderContext<'_>) -> Result<String> {
    render_template(&AboutTemplate {
        site: ctx.site(),
        meta: ctx.meta,
    })
}

fn contact(ctx: &RenderContext<'_>) -> Result<String> {
    render_template(&ContactTemplate { site: ctx.site() })
}
