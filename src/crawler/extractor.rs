//! HTML content extraction
//!
//! Parses a fetched page into a title, a bounded text excerpt, outbound
//! links, and raw indicator matches. Parsing is defensive: malformed or
//! truncated markup degrades to empty fields, never to an error.

use crate::indicators::find_indicators;
use crate::policy::resolve_link;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Character bound on the stored excerpt; also caps regex cost per page
const EXCERPT_CHARS: usize = 5000;

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Trimmed text of the first title element, or empty
    pub title: String,

    /// Visible text joined with single spaces, truncated to 5000 characters
    pub text_excerpt: String,

    /// Absolute outbound links, de-duplicated and lexicographically sorted
    pub links: Vec<String>,

    /// Indicator matches over the excerpt, de-duplicated and sorted
    pub indicators: Vec<String>,
}

/// Parses a page body into title, excerpt, links, and indicators
///
/// Indicators are scanned over the excerpt only, not the raw HTML: this
/// bounds worst-case regex cost against adversarial page sizes, at the cost
/// of possibly missing values beyond the truncation point.
pub fn parse_page(base_url: &Url, html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let text_excerpt = extract_excerpt(&document);
    let links = extract_links(&document, base_url);
    let indicators = find_indicators(&text_excerpt);

    ParsedPage {
        title,
        text_excerpt,
        links,
        indicators,
    }
}

/// Extracts the trimmed text of the first title element
fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Concatenates visible text nodes, bounded to the excerpt length
///
/// Script and style contents are not visible text and are skipped.
fn extract_excerpt(document: &Html) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for node in document.tree.nodes() {
        if let scraper::Node::Text(text) = node.value() {
            let in_hidden_element = node
                .parent()
                .and_then(|parent| parent.value().as_element())
                .map(|element| matches!(element.name(), "script" | "style"))
                .unwrap_or(false);
            if in_hidden_element {
                continue;
            }

            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed);
            }
        }
    }

    let joined = parts.join(" ");
    if joined.chars().count() <= EXCERPT_CHARS {
        joined
    } else {
        joined.chars().take(EXCERPT_CHARS).collect()
    }
}

/// Extracts anchor targets as absolute URLs, de-duplicated and sorted
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut links = BTreeSet::new();

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(resolved) = resolve_link(base_url, href) {
                links.insert(resolved.to_string());
            }
        }
    }

    links.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.org/start").unwrap()
    }

    #[test]
    fn test_title_links_and_indicators() {
        let html = r#"
        <html>
          <head><title>Threat Feed</title></head>
          <body>
            Contact admin@test.org
            Wallet: bc1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq
            Mirror: abcdefghijklmnop.onion
            <a href="/next">Next</a>
          </body>
        </html>
        "#;

        let parsed = parse_page(&base_url(), html);

        assert_eq!(parsed.title, "Threat Feed");
        assert!(parsed.links.contains(&"https://example.org/next".to_string()));
        assert!(parsed.indicators.contains(&"admin@test.org".to_string()));
        assert!(parsed
            .indicators
            .contains(&"bc1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq".to_string()));
        assert!(parsed
            .indicators
            .contains(&"abcdefghijklmnop.onion".to_string()));
    }

    #[test]
    fn test_missing_title_is_empty() {
        let parsed = parse_page(&base_url(), "<html><body>text</body></html>");
        assert_eq!(parsed.title, "");
    }

    #[test]
    fn test_title_is_trimmed() {
        let parsed = parse_page(
            &base_url(),
            "<html><head><title>  Feed  </title></head><body></body></html>",
        );
        assert_eq!(parsed.title, "Feed");
    }

    #[test]
    fn test_malformed_html_degrades() {
        let parsed = parse_page(&base_url(), "<div><a href=\"</b><<<><title>");
        assert_eq!(parsed.title, "");
        assert!(parsed.indicators.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let parsed = parse_page(&base_url(), "");
        assert_eq!(parsed.title, "");
        assert_eq!(parsed.text_excerpt, "");
        assert!(parsed.links.is_empty());
        assert!(parsed.indicators.is_empty());
    }

    #[test]
    fn test_links_deduplicated_and_sorted() {
        let html = r##"
        <body>
          <a href="/b">B</a>
          <a href="/a">A</a>
          <a href="/b">B again</a>
          <a href="javascript:void(0)">skip</a>
          <a href="#frag">skip</a>
        </body>
        "##;

        let parsed = parse_page(&base_url(), html);
        assert_eq!(
            parsed.links,
            vec![
                "https://example.org/a".to_string(),
                "https://example.org/b".to_string(),
            ]
        );
    }

    #[test]
    fn test_excerpt_joins_with_single_spaces() {
        let html = "<body><p>one</p><p>two</p><p>three</p></body>";
        let parsed = parse_page(&base_url(), html);
        assert_eq!(parsed.text_excerpt, "one two three");
    }

    #[test]
    fn test_script_and_style_excluded_from_excerpt() {
        let html = r#"
        <body>
          <script>var secret = "admin@hidden.org";</script>
          <style>.x { color: red; }</style>
          <p>visible</p>
        </body>
        "#;

        let parsed = parse_page(&base_url(), html);
        assert_eq!(parsed.text_excerpt, "visible");
        assert!(parsed.indicators.is_empty());
    }

    #[test]
    fn test_excerpt_truncated_to_bound() {
        let body = "word ".repeat(2000);
        let html = format!("<body><p>{}</p></body>", body);
        let parsed = parse_page(&base_url(), &html);
        assert_eq!(parsed.text_excerpt.chars().count(), EXCERPT_CHARS);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let body = "é".repeat(6000);
        let html = format!("<body>{}</body>", body);
        let parsed = parse_page(&base_url(), &html);
        assert_eq!(parsed.text_excerpt.chars().count(), EXCERPT_CHARS);
    }

    #[test]
    fn test_indicator_beyond_truncation_missed() {
        // Accepted trade-off: the scan covers the excerpt only.
        let mut body = "x ".repeat(3000);
        body.push_str("late@missed.org");
        let html = format!("<body>{}</body>", body);
        let parsed = parse_page(&base_url(), &html);
        assert!(parsed.indicators.is_empty());
    }
}
