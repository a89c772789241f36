//! Render context handed to layouts and pages

use askama::Template;
use serde::Serialize;
use sitegate_core::{Error, ProjectMetadata, Result, TenantSlug};

/// Page path rendered when the request has no segments after the tenant
pub const HOME_PAGE: &str = "home";

/// Document metadata (`<title>`, description, keywords, favicon)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub favicon: String,
}

impl PageMeta {
    /// Build the document metadata for one page of a project
    pub fn for_page(project: &ProjectMetadata, page_path: &str) -> Self {
        let site_title = match project.display_title().trim() {
            "" => "Website",
            title => title,
        };

        let title = if page_path == HOME_PAGE {
            site_title.to_string()
        } else {
            format!("{} | {}", page_title(page_path), site_title)
        };

        let description = non_blank(project.meta_description.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Welcome to {}", site_title));

        Self {
            title,
            description,
            keywords: non_blank(project.meta_keywords.as_deref())
                .unwrap_or_default()
                .to_string(),
            favicon: non_blank(project.favicon.as_deref())
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Human-readable title of a page path: last segment, hyphens and
/// underscores as spaces, each word capitalized.
///
/// ```
/// use sitegate_themes::page_title;
///
/// assert_eq!(page_title("nonexistent-page"), "Nonexistent Page");
/// assert_eq!(page_title("services/roof_repair"), "Roof Repair");
/// ```
pub fn page_title(page_path: &str) -> String {
    let last = page_path.rsplit('/').find(|s| !s.is_empty()).unwrap_or(HOME_PAGE);

    last.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Navigation entry rendered by theme layouts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Social profile link rendered in footers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub network: &'static str,
    pub url: String,
}

/// Display-ready view of the project, shared by every theme template.
///
/// Optional backend fields are flattened to empty strings so templates only
/// need `is_empty()` checks.
#[derive(Debug, Clone)]
pub struct SiteView {
    pub company_name: String,
    pub tenant: String,
    pub home_href: String,
    pub logo: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub social: Vec<SocialLink>,
}

/// Everything a layout or page needs to render one request
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Full project metadata of the tenant
    pub project: &'a ProjectMetadata,
    pub tenant: &'a TenantSlug,
    /// Joined page path, `home` when empty
    pub page_path: &'a str,
    pub meta: &'a PageMeta,
    /// Prefix of in-site links: empty on tenant subdomains, `/{slug}` in
    /// local development, `/site/{slug}` on the internal route
    pub site_root: &'a str,
}

impl<'a> RenderContext<'a> {
    /// Link to a page of the current site
    pub fn href(&self, page: &str) -> String {
        if page == HOME_PAGE {
            if self.site_root.is_empty() {
                "/".to_string()
            } else {
                self.site_root.to_string()
            }
        } else {
            format!("{}/{}", self.site_root, page)
        }
    }

    /// Navigation entries for `(page path, label)` pairs
    pub fn nav(&self, pages: &[(&'static str, &'static str)]) -> Vec<NavItem> {
        pages
            .iter()
            .map(|&(page, label)| NavItem {
                label,
                href: self.href(page),
                active: page == self.page_path,
            })
            .collect()
    }

    /// Display view of the project
    pub fn site(&self) -> SiteView {
        let owned = |value: Option<&str>| non_blank(value).unwrap_or_default().to_string();

        let company_name = match self.project.company_name.trim() {
            "" => self.tenant.to_string(),
            name => name.to_string(),
        };

        SiteView {
            company_name,
            tenant: self.tenant.to_string(),
            home_href: self.href(HOME_PAGE),
            logo: owned(self.project.logo.as_deref()),
            email: owned(self.project.email.as_deref()),
            phone: owned(self.project.phone.as_deref()),
            address: owned(self.project.address.as_deref()),
            social: self
                .project
                .social
                .entries()
                .into_iter()
                .map(|(network, url)| SocialLink {
                    network,
                    url: url.to_string(),
                })
                .collect(),
        }
    }
}

/// Render an askama template, mapping failures to `Error::Render`
pub(crate) fn render_template<T: Template>(template: &T) -> Result<String> {
    template
        .render()
        .map_err(|e| Error::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitegate_core::SocialLinks;

    fn project() -> ProjectMetadata {
        ProjectMetadata {
            company_name: "Acme Homes".to_string(),
            meta_description: Some("Homes for everyone".to_string()),
            meta_keywords: Some("homes, rentals".to_string()),
            favicon: Some("  ".to_string()),
            social: SocialLinks {
                twitter: Some("https://twitter.com/acme".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_page_title() {
        assert_eq!(page_title("about"), "About");
        assert_eq!(page_title("nonexistent-page"), "Nonexistent Page");
        assert_eq!(page_title("listings/2024/"), "2024");
        assert_eq!(page_title(""), "Home");
    }

    #[test]
    fn test_meta_for_home_and_inner_pages() {
        let project = project();

        let home = PageMeta::for_page(&project, HOME_PAGE);
        assert_eq!(home.title, "Acme Homes");
        assert_eq!(home.description, "Homes for everyone");
        assert_eq!(home.keywords, "homes, rentals");
        assert_eq!(home.favicon, "");

        let about = PageMeta::for_page(&project, "about");
        assert_eq!(about.title, "About | Acme Homes");
    }

    #[test]
    fn test_meta_defaults_for_sparse_project() {
        let meta = PageMeta::for_page(&ProjectMetadata::default(), HOME_PAGE);
        assert_eq!(meta.title, "Website");
        assert_eq!(meta.description, "Welcome to Website");
    }

    #[test]
    fn test_links_follow_site_root() {
        let project = project();
        let tenant = TenantSlug::from_string("acme").unwrap();
        let meta = PageMeta::for_page(&project, "about");

        let mut ctx = RenderContext {
            project: &project,
            tenant: &tenant,
            page_path: "about",
            meta: &meta,
            site_root: "",
        };
        assert_eq!(ctx.href(HOME_PAGE), "/");
        assert_eq!(ctx.href("about"), "/about");

        ctx.site_root = "/acme";
        assert_eq!(ctx.href(HOME_PAGE), "/acme");

        let nav = ctx.nav(&[("home", "Home"), ("about", "About")]);
        assert_eq!(nav[1].href, "/acme/about");
        assert!(nav[1].active);
        assert!(!nav[0].active);
    }

    #[test]
    fn test_site_view_flattens_optional_fields() {
        let mut project = project();
        project.company_name = " ".to_string();
        let tenant = TenantSlug::from_string("acme").unwrap();
        let meta = PageMeta::for_page(&project, HOME_PAGE);

        let site = RenderContext {
            project: &project,
            tenant: &tenant,
            page_path: HOME_PAGE,
            meta: &meta,
            site_root: "",
        }
        .site();

        assert_eq!(site.company_name, "acme");
        assert_eq!(site.logo, "");
        assert_eq!(site.social.len(), 1);
        assert_eq!(site.social[0].network, "Twitter");
    }
}
