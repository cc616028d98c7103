//! Storage module for persisting crawl data
//!
//! Two tables: `pages` (one row per distinct visited URL, upsert semantics)
//! and `indicators` (append-only sightings). Both writes are durable before
//! the call returns.

mod schema;
mod sqlite;
mod traits;

pub use schema::{initialize_schema, SCHEMA_SQL};
pub use sqlite::SqliteStore;
pub use traits::{StorageError, StorageResult, Store};

use crate::indicators::IndicatorKind;
use serde::Serialize;

/// A page record as written by one visit
///
/// `status_code` is absent on transport failure, policy rejection, and
/// dry-run visits; `error` is present exactly when the visit failed.
#[derive(Debug, Clone, Copy)]
pub struct NewPage<'a> {
    pub url: &'a str,
    pub fetched_at: &'a str,
    pub status_code: Option<u16>,
    pub title: &'a str,
    pub excerpt: &'a str,
    pub error: Option<&'a str>,
}

/// A page row read back from the database
#[derive(Debug, Clone, Serialize)]
pub struct PageRow {
    #[serde(skip)]
    pub id: i64,
    pub url: String,
    pub fetched_at: String,
    pub status_code: Option<u16>,
    pub title: String,
    pub excerpt: String,
    pub error: Option<String>,
}

/// An indicator row read back from the database
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorRow {
    #[serde(skip)]
    pub id: i64,
    pub page_url: String,
    pub indicator: String,
    #[serde(rename = "type")]
    pub kind: IndicatorKind,
    pub found_at: String,
}
