//! Database statistics for the inspection mode
//!
//! Aggregates what an existing intelligence database contains so an analyst
//! can check on collected data without opening the file by hand.

use crate::storage::Store;
use crate::Result;

/// Aggregate statistics over an intelligence database
#[derive(Debug, Clone)]
pub struct IntelStatistics {
    /// Total distinct URLs recorded
    pub total_pages: u64,

    /// Pages stored without an error
    pub succeeded: u64,

    /// Pages stored with an error (policy, transport, or dry-run)
    pub failed: u64,

    /// Total indicator sightings
    pub total_indicators: u64,

    /// Indicator counts grouped by type, most frequent first
    pub indicators_by_kind: Vec<(String, u64)>,

    /// Timestamp of the most recent fetch, if any pages exist
    pub latest_fetch: Option<String>,
}

/// Loads statistics from storage
pub fn load_statistics(store: &dyn Store) -> Result<IntelStatistics> {
    Ok(IntelStatistics {
        total_pages: store.count_pages()?,
        succeeded: store.count_succeeded_pages()?,
        failed: store.count_failed_pages()?,
        total_indicators: store.count_indicators()?,
        indicators_by_kind: store.count_indicators_by_kind()?,
        latest_fetch: store.latest_fetch()?,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &IntelStatistics) {
    println!("=== Intelligence Database ===\n");

    println!("Pages:");
    println!("  Total: {}", stats.total_pages);
    println!("  Succeeded: {}", stats.succeeded);
    println!("  Failed: {}", stats.failed);

    if let Some(latest) = &stats.latest_fetch {
        println!("  Latest fetch: {}", latest);
    }
    println!();

    println!("Indicators ({} total):", stats.total_indicators);
    for (kind, count) in &stats.indicators_by_kind {
        println!("  {}: {}", kind, count);
    }
}
