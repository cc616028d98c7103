use url::Url;

/// Resolves a hyperlink reference against a base address
///
/// Returns `None` for references that should never enter the frontier:
/// - empty references
/// - fragment-only references (`#...`)
/// - `javascript:` pseudo-scheme references
/// - references that fail URL resolution
/// - references that resolve to a scheme other than http/https
///
/// Total on malformed input; never panics.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use darkwatch::policy::resolve_link;
///
/// let base = Url::parse("https://example.org/start").unwrap();
/// let link = resolve_link(&base, "/next").unwrap();
/// assert_eq!(link.as_str(), "https://example.org/next");
///
/// assert!(resolve_link(&base, "#section").is_none());
/// assert!(resolve_link(&base, "javascript:void(0)").is_none());
/// ```
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }

    let resolved = base.join(href).ok()?;

    if resolved.scheme() == "http" || resolved.scheme() == "https" {
        Some(resolved)
    } else {
        None
    }
}
