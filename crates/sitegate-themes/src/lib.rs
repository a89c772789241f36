//! SiteGate Themes
//!
//! Statically registered site themes and the page dispatcher:
//! - `ThemeRegistry`: theme id → layout + pages, compiled in
//! - `PageDispatcher`: composes layout and page, with the generic fallback
//!   page for paths a theme does not provide
//! - Not-found and error documents
//!
//! All HTML is rendered with askama templates from `templates/`.

mod builtin;
pub mod context;
pub mod dispatcher;
pub mod fallback;
pub mod registry;

pub use context::{HOME_PAGE, NavItem, PageMeta, RenderContext, SiteView, SocialLink, page_title};
pub use dispatcher::{ComposedPage, DispatchOutcome, PageDispatcher, PageSource, page_path};
pub use fallback::{ERROR_PAGE_HTML, render_fallback, render_not_found};
pub use registry::{LayoutFn, PageFn, Theme, ThemeRegistry};
