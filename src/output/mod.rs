//! Output module: database inspection and export
//!
//! The crawl itself only writes SQLite; these helpers serve the CLI's
//! `--stats` and `--export` modes against an existing database.

mod export;
mod stats;

pub use export::{export_database, ExportPaths};
pub use stats::{load_statistics, print_statistics, IntelStatistics};
