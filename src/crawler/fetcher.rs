//! HTTP fetcher implementation
//!
//! One bounded GET per call. The client is built once per run from the
//! configuration (user agent, optional SOCKS proxy, TLS trust) and passed
//! in explicitly; this module holds no ambient state.

use crate::config::Config;
use crate::policy::is_allowed;
use crate::Result;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Reason a fetch produced no page content
///
/// The `Display` strings are what gets persisted in the page row's `error`
/// column, so they are part of the stored format.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Domain policy rejected the address before any network access
    #[error("URL outside allowed domains")]
    PolicyRejected,

    /// Dry-run mode suppressed the fetch; synthesized by the orchestrator
    #[error("dry-run mode (no network)")]
    DryRun,

    /// The request exceeded the configured timeout
    #[error("request timeout")]
    Timeout,

    /// TCP/TLS connection failure (refused, DNS, handshake)
    #[error("connection error: {0}")]
    Connect(String),

    /// Any other transport-level failure, including body read errors
    #[error("transport error: {0}")]
    Transport(String),
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// The server answered; any HTTP status counts as fetched
    Fetched {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Lower-cased Content-Type header value
        content_type: String,
        /// Response body; empty unless the content type is HTML
        body: String,
    },

    /// No response was obtained for this URL
    Failed {
        /// The URL as requested
        url: String,
        /// Typed failure reason
        error: FetchError,
    },
}

/// Builds the HTTP client for a crawl run
///
/// Applies the configured user agent, connect timeout, optional SOCKS proxy
/// routing, and TLS trust settings (verification toggle and optional extra
/// CA bundle). Per-request timeouts are applied at fetch time.
pub fn build_http_client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.clone())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true);

    if config.proxy.enabled {
        builder = builder.proxy(reqwest::Proxy::all(&config.proxy.url)?);
    }

    if !config.tls.verify {
        builder = builder.danger_accept_invalid_certs(true);
    }

    if let Some(bundle_path) = &config.tls.ca_bundle {
        let pem = std::fs::read(bundle_path)?;
        builder = builder.add_root_certificate(reqwest::Certificate::from_pem(&pem)?);
    }

    Ok(builder.build()?)
}

/// Fetches a single URL, re-checking domain policy first
///
/// Policy rejection returns without any network access. Every transport
/// failure maps to [`FetchOutcome::Failed`]; this function never returns an
/// `Err` and never panics, so one bad URL cannot abort the run.
///
/// The body is extracted only when the Content-Type contains `text/html`;
/// other payloads (binaries, JSON, feeds) are recorded with an empty body
/// rather than parsed as markup.
pub async fn fetch_page(
    client: &Client,
    url: &str,
    timeout: Duration,
    allowlist: &[String],
    enforce: bool,
) -> FetchOutcome {
    if !is_allowed(url, allowlist, enforce) {
        return FetchOutcome::Failed {
            url: url.to_string(),
            error: FetchError::PolicyRejected,
        };
    }

    let response = match client.get(url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            return FetchOutcome::Failed {
                url: url.to_string(),
                error: classify_transport_error(&e),
            }
        }
    };

    let final_url = response.url().to_string();
    let status_code = response.status().as_u16();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase();

    let body = if content_type.contains("text/html") {
        match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return FetchOutcome::Failed {
                    url: url.to_string(),
                    error: classify_transport_error(&e),
                }
            }
        }
    } else {
        String::new()
    };

    FetchOutcome::Fetched {
        final_url,
        status_code,
        content_type,
        body,
    }
}

/// Maps a reqwest error to a typed fetch failure
fn classify_transport_error(e: &reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Connect(e.to_string())
    } else {
        FetchError::Transport(e.to_string())
    }
}
