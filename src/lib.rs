//! Darkwatch: a bounded defensive threat-intelligence crawler
//!
//! This crate implements a policy-constrained web crawler that turns a list of
//! seed addresses into a structured record of visited pages and extracted
//! threat indicators (emails, cryptocurrency wallets, onion-service addresses),
//! under strict operational limits: domain allowlisting, page and depth
//! budgets, and a dry-run gate that is on by default.

pub mod config;
pub mod crawler;
pub mod indicators;
pub mod output;
pub mod policy;
pub mod storage;

use thiserror::Error;

/// Main error type for Darkwatch operations
#[derive(Debug, Error)]
pub enum DarkwatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("allowlist enforcement is enabled but allowed-domains is empty")]
    EmptyAllowlist,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain entry: {0}")]
    InvalidDomain(String),
}

/// Result type alias for Darkwatch operations
pub type Result<T> = std::result::Result<T, DarkwatchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_pipeline, RunStats};
pub use indicators::IndicatorKind;
