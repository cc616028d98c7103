//! Configuration loading and validation
//!
//! Darkwatch is configured from a single TOML file: project identity,
//! output locations, proxy and TLS trust settings, and the crawl policy
//! (budgets, allowlist, seeds, dry-run gate).

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlConfig, OutputConfig, ProxyConfig, TlsConfig};
