use serde::Deserialize;

/// One entry of the site's navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }

    /// Whether `path` is this link's page or one of its sub-pages.
    /// The root link `/` only matches `/` itself.
    pub fn is_active(&self, path: &str) -> bool {
        let href = normalize(&self.href);
        let path = normalize(path);
        if href == "/" {
            return path == "/";
        }
        path == href
            || path
                .strip_prefix(href)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Home and Blog.
pub fn default_links() -> Vec<NavLink> {
    vec![NavLink::new("Home", "/"), NavLink::new("Blog", "/blog")]
}

/// The most specific link that is active for `path`.
pub fn active_link<'a>(links: &'a [NavLink], path: &str) -> Option<&'a NavLink> {
    links
        .iter()
        .filter(|link| link.is_active(path))
        .max_by_key(|link| normalize(&link.href).len())
}

/// Drops query, fragment and trailing slash.
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
