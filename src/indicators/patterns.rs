use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Email-like strings
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+").unwrap());

/// Bitcoin-style addresses: legacy 1/3 prefix or bc1 bech32 prefix,
/// 25-62 trailing characters from the base58/bech32 alphabet
static WALLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:bc1|[13])[a-zA-HJ-NP-Z0-9]{25,62}\b").unwrap());

/// Onion-service hostnames: 16 (v2) to 56 (v3) base32 characters
static ONION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z2-7]{16,56}\.onion\b").unwrap());

/// Scans a text excerpt for threat indicators
///
/// Returns the union of all email, wallet, and onion matches, de-duplicated
/// and lexicographically sorted. Callers are expected to pass the bounded
/// page excerpt, not the raw HTML, which caps the regex cost per page.
pub fn find_indicators(text: &str) -> Vec<String> {
    let mut found = BTreeSet::new();

    for pattern in [&*EMAIL_RE, &*WALLET_RE, &*ONION_RE] {
        for m in pattern.find_iter(text) {
            found.insert(m.as_str().to_string());
        }
    }

    found.into_iter().collect()
}
