use crate::config::types::{Config, CrawlConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
///
/// This checks structural validity only. The enforcement-with-empty-allowlist
/// precondition is deliberately left to the pipeline so that an empty list
/// with enforcement disabled stays a valid (open-policy) configuration.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.output.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    if config.proxy.enabled {
        Url::parse(&config.proxy.url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid proxy url: {}", e)))?;
    }

    validate_crawl_config(&config.crawl)?;

    Ok(())
}

/// Validates crawl budgets, seeds, and allowlist entries
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.timeout_seconds < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-seconds must be >= 1, got {}",
            config.timeout_seconds
        )));
    }

    for seed in &config.seed_urls {
        let url = Url::parse(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "Seed URL '{}' must use an http or https scheme",
                seed
            )));
        }
    }

    for domain in &config.allowed_domains {
        validate_domain_entry(domain)?;
    }

    Ok(())
}

/// Validates a single allowlist entry
fn validate_domain_entry(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidDomain(
            "allowed-domains entry cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if domain != domain.to_lowercase() {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' must be lowercase",
            domain
        )));
    }

    Ok(())
}
