use url::Url;

/// Extracts the lowercase hostname from an address
///
/// Unparsable addresses and addresses without a host yield `None`, which the
/// allowlist treats as matching nothing.
pub fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().map(|h| h.to_lowercase())
}

/// Decides whether an address satisfies the domain allowlist
///
/// Open policy: when `enforce` is false, or the allowlist is empty, every
/// address is allowed. Otherwise the address's lowercase hostname must equal
/// an allowlist entry exactly or be a subdomain of one (`host` ends with
/// `".entry"`).
///
/// This check runs twice per discovered link — once before enqueue and once
/// before fetch — so it must stay cheap and deterministic.
///
/// # Examples
///
/// ```
/// use darkwatch::policy::is_allowed;
///
/// let allow = vec!["example.org".to_string()];
/// assert!(is_allowed("https://example.org/a", &allow, true));
/// assert!(is_allowed("https://feeds.example.org/b", &allow, true));
/// assert!(!is_allowed("https://example.com/", &allow, true));
/// assert!(is_allowed("https://example.com/", &allow, false));
/// ```
pub fn is_allowed(url: &str, allowlist: &[String], enforce: bool) -> bool {
    if !enforce || allowlist.is_empty() {
        return true;
    }

    let host = host_of(url).unwrap_or_default();

    allowlist
        .iter()
        .any(|entry| host == *entry || host.ends_with(&format!(".{}", entry)))
}
