use serde::Deserialize;

/// Main configuration structure for Darkwatch
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Project name, used in the summary output
    #[serde(rename = "project-name", default = "default_project_name")]
    pub project_name: String,

    /// User agent string sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub proxy: ProxyConfig,

    #[serde(default)]
    pub tls: TlsConfig,

    #[serde(default)]
    pub crawl: CrawlConfig,
}

/// Output locations
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,

    /// Directory the export mode writes CSV/JSON files into
    #[serde(rename = "export-dir", default = "default_export_dir")]
    pub export_dir: String,
}

/// Outbound proxy routing (e.g. a local Tor SOCKS endpoint)
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Proxy URL; socks5h keeps DNS resolution on the proxy side
    #[serde(default = "default_proxy_url")]
    pub url: String,
}

/// TLS trust settings
#[derive(Debug, Clone, Deserialize)]
pub struct TlsConfig {
    /// Verify server certificates. Keep enabled outside of lab setups.
    #[serde(default = "default_true")]
    pub verify: bool,

    /// Optional PEM bundle of additional trusted roots
    #[serde(rename = "ca-bundle", default)]
    pub ca_bundle: Option<String>,
}

/// Crawl budgets and policy
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Maximum number of pages visited in one run
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    /// Maximum link depth expanded from the seeds (seeds are depth 0)
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-seconds", default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Enforce the domain allowlist. Refusing to run with an empty
    /// allowlist while this is set is checked by the pipeline, not here.
    #[serde(rename = "respect-allowed-domains", default = "default_true")]
    pub respect_allowed_domains: bool,

    /// Hostnames permitted when enforcement is on (exact or subdomain match)
    #[serde(rename = "allowed-domains", default)]
    pub allowed_domains: Vec<String>,

    /// Crawl entry points, visited at depth 0
    #[serde(rename = "seed-urls", default)]
    pub seed_urls: Vec<String>,

    /// When true, no network requests are made; safe default to avoid
    /// accidental crawls
    #[serde(rename = "dry-run", default = "default_true")]
    pub dry_run: bool,
}

fn default_project_name() -> String {
    "darkwatch".to_string()
}

fn default_user_agent() -> String {
    "Darkwatch-Research-Bot/0.1".to_string()
}

fn default_database_path() -> String {
    "data/intel.db".to_string()
}

fn default_export_dir() -> String {
    "exports".to_string()
}

fn default_proxy_url() -> String {
    "socks5h://127.0.0.1:9050".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_pages() -> u32 {
    30
}

fn default_max_depth() -> u32 {
    1
}

fn default_timeout_seconds() -> u64 {
    25
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            export_dir: default_export_dir(),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_proxy_url(),
        }
    }
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            verify: true,
            ca_bundle: None,
        }
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            max_depth: default_max_depth(),
            timeout_seconds: default_timeout_seconds(),
            respect_allowed_domains: true,
            allowed_domains: Vec::new(),
            seed_urls: Vec::new(),
            dry_run: true,
        }
    }
}
