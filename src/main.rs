//! Darkwatch main entry point
//!
//! Command-line interface for the Darkwatch threat-intelligence crawler.

use anyhow::Context;
use clap::Parser;
use darkwatch::config::{load_config_with_hash, Config};
use darkwatch::crawler::run_pipeline;
use darkwatch::output::{export_database, load_statistics, print_statistics};
use darkwatch::storage::SqliteStore;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Darkwatch: a bounded defensive threat-intelligence crawler
///
/// Crawls configured seed URLs under strict limits (domain allowlist,
/// page and depth budgets) and records visited pages plus extracted
/// indicators into a SQLite database. Dry-run mode is on by default;
/// disabling it requires explicit confirmation.
#[derive(Parser, Debug)]
#[command(name = "darkwatch")]
#[command(version)]
#[command(about = "Bounded defensive threat-intelligence crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Confirm that real network requests are intended when the config
    /// disables dry-run; replaces the interactive prompt
    #[arg(long)]
    confirm: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "export")]
    stats: bool,

    /// Export the database to CSV/JSON files and exit
    #[arg(long, conflicts_with = "stats")]
    export: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded (hash: {})", config_hash);

    if cli.stats {
        handle_stats(&config)?;
    } else if cli.export {
        handle_export(&config)?;
    } else {
        handle_crawl(&config, cli.confirm).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("darkwatch=info,warn"),
            1 => EnvFilter::new("darkwatch=debug,info"),
            2 => EnvFilter::new("darkwatch=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let store = SqliteStore::open(Path::new(&config.output.database_path))?;
    let stats = load_statistics(&store)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the --export mode: writes CSV/JSON files from the database
fn handle_export(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}", config.output.database_path);
    println!("Export directory: {}\n", config.output.export_dir);

    let store = SqliteStore::open(Path::new(&config.output.database_path))?;
    let paths = export_database(&store, Path::new(&config.output.export_dir))?;

    println!("Exported:");
    println!("  {}", paths.pages_csv.display());
    println!("  {}", paths.indicators_csv.display());
    println!("  {}", paths.json.display());

    Ok(())
}

/// Handles the main crawl operation, gated behind confirmation when
/// dry-run is disabled
async fn handle_crawl(config: &Config, confirm: bool) -> anyhow::Result<()> {
    if !config.crawl.dry_run && !confirm && !confirm_live_run()? {
        std::process::exit(1);
    }

    let stats = run_pipeline(config).await?;

    println!("Project: {}", config.project_name);
    println!("Visited: {}", stats.visited);
    println!("Success: {}", stats.success);
    println!("Failed: {}", stats.failed);
    println!("Indicators: {}", stats.indicators);
    println!("Database: {}", config.output.database_path);

    Ok(())
}

/// Prompts on stdin for explicit confirmation of a live (non-dry-run) crawl
///
/// Only the literal answer `YES` proceeds.
fn confirm_live_run() -> anyhow::Result<bool> {
    print!("WARNING: dry-run is disabled. Type YES to proceed with real network requests: ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    let read = std::io::stdin().read_line(&mut answer)?;

    if read == 0 {
        eprintln!("No interactive input available. Use --confirm to bypass the prompt.");
        return Ok(false);
    }

    if answer.trim() != "YES" {
        eprintln!("Aborted. Re-enable dry-run or pass --confirm to proceed.");
        return Ok(false);
    }

    Ok(true)
}
