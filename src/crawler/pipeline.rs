//! Crawl orchestration
//!
//! Drives the breadth-first traversal: seeds the frontier, enforces the
//! page and depth budgets, applies dry-run suppression, sequences
//! fetch -> extract -> persist, and accumulates run statistics. Per-URL
//! failures are recorded and never abort the run; the only fatal error is
//! the enforcement-with-empty-allowlist precondition, checked before any
//! frontier or storage activity.

use crate::config::Config;
use crate::crawler::extractor::parse_page;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchError, FetchOutcome};
use crate::policy::is_allowed;
use crate::storage::{NewPage, SqliteStore, Store};
use crate::{DarkwatchError, Result};
use chrono::Utc;
use std::collections::{HashSet, VecDeque};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Counters accumulated over one crawl run
///
/// `visited == success + failed` always holds, and `visited` never exceeds
/// the configured page budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// URLs dequeued and processed (silently skipped re-visits not counted)
    pub visited: u32,

    /// Visits that produced a page without an error
    pub success: u32,

    /// Visits recorded with an error (policy, transport, or dry-run)
    pub failed: u32,

    /// Total indicator values persisted
    pub indicators: u32,
}

/// Runs a complete crawl and returns the final statistics
///
/// The frontier is a FIFO queue of `(url, depth)` pairs seeded from the
/// configured seed URLs at depth 0; a seen-set keeps each distinct URL to a
/// single visit per run. Pages at exactly `max-depth` are fetched and parsed
/// but their links are never enqueued.
pub async fn run_pipeline(config: &Config) -> Result<RunStats> {
    let crawl = &config.crawl;

    // Enforcement requested with nothing allowed is a configuration error,
    // not an open policy. Refuse before touching the frontier or storage.
    if crawl.respect_allowed_domains && crawl.allowed_domains.is_empty() {
        return Err(DarkwatchError::EmptyAllowlist);
    }

    let client = build_http_client(config)?;
    let mut store = SqliteStore::open(Path::new(&config.output.database_path))?;

    let mut frontier: VecDeque<(String, u32)> = crawl
        .seed_urls
        .iter()
        .map(|url| (url.clone(), 0))
        .collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut stats = RunStats::default();
    let timeout = Duration::from_secs(crawl.timeout_seconds);

    tracing::info!(
        seeds = frontier.len(),
        max_pages = crawl.max_pages,
        max_depth = crawl.max_depth,
        dry_run = crawl.dry_run,
        "Starting crawl run"
    );

    while stats.visited < crawl.max_pages {
        let Some((url, depth)) = frontier.pop_front() else {
            break;
        };

        // Silent de-dup: a re-queued URL is skipped without counting.
        if !seen.insert(url.clone()) {
            continue;
        }

        stats.visited += 1;
        let fetched_at = Utc::now().to_rfc3339();

        tracing::debug!(url = %url, depth, "Processing URL");

        let outcome = if crawl.dry_run {
            // Dry-run short-circuits before policy and fetcher.
            FetchOutcome::Failed {
                url: url.clone(),
                error: FetchError::DryRun,
            }
        } else {
            fetch_page(
                &client,
                &url,
                timeout,
                &crawl.allowed_domains,
                crawl.respect_allowed_domains,
            )
            .await
        };

        match outcome {
            FetchOutcome::Failed { url, error } => {
                stats.failed += 1;
                tracing::warn!(url = %url, error = %error, "Fetch failed");

                let reason = error.to_string();
                store.save_page(&NewPage {
                    url: &url,
                    fetched_at: &fetched_at,
                    status_code: None,
                    title: "",
                    excerpt: "",
                    error: Some(&reason),
                })?;
            }

            FetchOutcome::Fetched {
                final_url,
                status_code,
                content_type: _,
                body,
            } => {
                let base = Url::parse(&final_url)?;
                let parsed = parse_page(&base, &body);

                store.save_page(&NewPage {
                    url: &final_url,
                    fetched_at: &fetched_at,
                    status_code: Some(status_code),
                    title: &parsed.title,
                    excerpt: &parsed.text_excerpt,
                    error: None,
                })?;
                store.append_indicators(&final_url, &parsed.indicators, &fetched_at)?;

                stats.success += 1;
                stats.indicators += parsed.indicators.len() as u32;

                tracing::debug!(
                    url = %final_url,
                    status_code,
                    links = parsed.links.len(),
                    indicators = parsed.indicators.len(),
                    "Page stored"
                );

                if depth < crawl.max_depth {
                    for link in &parsed.links {
                        if is_allowed(link, &crawl.allowed_domains, crawl.respect_allowed_domains)
                        {
                            frontier.push_back((link.clone(), depth + 1));
                        }
                    }
                }
            }
        }
    }

    tracing::info!(
        visited = stats.visited,
        success = stats.success,
        failed = stats.failed,
        indicators = stats.indicators,
        "Crawl run complete"
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(db_dir: &TempDir) -> Config {
        let mut config: Config = toml::from_str("").unwrap();
        config.output.database_path = db_dir
            .path()
            .join("intel.db")
            .to_string_lossy()
            .into_owned();
        config
    }

    #[tokio::test]
    async fn test_empty_allowlist_with_enforcement_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir);
        config.crawl.respect_allowed_domains = true;
        config.crawl.allowed_domains.clear();
        config.crawl.seed_urls = vec!["https://example.org/".to_string()];

        let result = run_pipeline(&config).await;
        assert!(matches!(result, Err(DarkwatchError::EmptyAllowlist)));

        // Refused before storage: no database file was created.
        assert!(!dir.path().join("intel.db").exists());
    }

    #[tokio::test]
    async fn test_dry_run_records_every_seed_as_failed() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir);
        config.crawl.respect_allowed_domains = false;
        config.crawl.dry_run = true;
        config.crawl.seed_urls = vec![
            "https://example.org/a".to_string(),
            "https://example.org/b".to_string(),
        ];

        let stats = run_pipeline(&config).await.unwrap();

        assert_eq!(stats.visited, 2);
        assert_eq!(stats.success, 0);
        assert_eq!(stats.failed, 2);
        assert_eq!(stats.indicators, 0);

        let store =
            SqliteStore::open(Path::new(&config.output.database_path)).unwrap();
        for url in &config.crawl.seed_urls {
            let page = store.get_page_by_url(url).unwrap().unwrap();
            assert_eq!(page.error.as_deref(), Some("dry-run mode (no network)"));
            assert_eq!(page.status_code, None);
        }
    }

    #[tokio::test]
    async fn test_dry_run_skips_duplicate_seeds_silently() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir);
        config.crawl.respect_allowed_domains = false;
        config.crawl.dry_run = true;
        config.crawl.seed_urls = vec![
            "https://example.org/a".to_string(),
            "https://example.org/a".to_string(),
        ];

        let stats = run_pipeline(&config).await.unwrap();
        assert_eq!(stats.visited, 1);
        assert_eq!(stats.failed, 1);
    }

    #[tokio::test]
    async fn test_page_budget_bounds_visits() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir);
        config.crawl.respect_allowed_domains = false;
        config.crawl.dry_run = true;
        config.crawl.max_pages = 2;
        config.crawl.seed_urls = (0..5)
            .map(|i| format!("https://example.org/{}", i))
            .collect();

        let stats = run_pipeline(&config).await.unwrap();
        assert_eq!(stats.visited, 2);
        assert_eq!(stats.visited, stats.success + stats.failed);
    }

    #[tokio::test]
    async fn test_stats_accounting_invariant() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir);
        config.crawl.respect_allowed_domains = false;
        config.crawl.dry_run = true;
        config.crawl.seed_urls = vec!["https://example.org/".to_string()];

        let stats = run_pipeline(&config).await.unwrap();
        assert_eq!(stats.visited, stats.success + stats.failed);
        assert!(stats.visited <= config.crawl.max_pages);
    }
}
