//! Theme-independent pages: the generic fallback page body, the not-found
//! document and the plain error document.

use askama::Template;
use sitegate_core::Result;

use crate::context::{page_title, render_template};

#[derive(Template)]
#[template(path = "fallback.html")]
struct FallbackTemplate<'a> {
    company: &'a str,
    page_path: &'a str,
    title: String,
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate<'a> {
    tenant: &'a str,
}

/// Document served for render failures. Static so it cannot fail itself.
pub const ERROR_PAGE_HTML: &str = "<!DOCTYPE html>\n\
<html lang=\"en\"><head><meta charset=\"utf-8\"><title>Something went wrong</title></head>\n\
<body><h1>Something went wrong</h1><p>The page could not be rendered. Please try again later.</p></body></html>\n";

/// Generic content for a page the tenant's theme does not provide.
///
/// Rendered as a page body; the theme layout still wraps it.
pub fn render_fallback(company: &str, page_path: &str) -> Result<String> {
    render_template(&FallbackTemplate {
        company,
        page_path,
        title: page_title(page_path),
    })
}

/// Terminal not-found document. `tenant` may be empty when unknown.
pub fn render_not_found(tenant: &str) -> Result<String> {
    render_template(&NotFoundTemplate { tenant })
}
