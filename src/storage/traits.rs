//! Storage trait and error types

use crate::storage::{IndicatorRow, NewPage, PageRow};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for persistence backends
///
/// Both write operations commit before returning, so a crash mid-run leaves
/// every previously stored page and indicator durably recorded.
pub trait Store {
    /// Upserts a page record keyed on its URL
    ///
    /// Inserting an existing URL overwrites `fetched_at`, `status_code`,
    /// `title`, `excerpt`, and `error`; it never creates a duplicate row.
    fn save_page(&mut self, page: &NewPage<'_>) -> StorageResult<()>;

    /// Appends one indicator row per value, classifying each
    ///
    /// Pure append: no de-duplication across calls. An empty batch is a
    /// no-op and opens no transaction.
    fn append_indicators(
        &mut self,
        page_url: &str,
        values: &[String],
        found_at: &str,
    ) -> StorageResult<()>;

    /// Gets a page by URL
    fn get_page_by_url(&self, url: &str) -> StorageResult<Option<PageRow>>;

    /// Lists all pages, ordered by id
    fn list_pages(&self) -> StorageResult<Vec<PageRow>>;

    /// Lists all indicator rows, ordered by id
    fn list_indicators(&self) -> StorageResult<Vec<IndicatorRow>>;

    /// Total page count
    fn count_pages(&self) -> StorageResult<u64>;

    /// Pages with no error recorded
    fn count_succeeded_pages(&self) -> StorageResult<u64>;

    /// Pages with an error recorded
    fn count_failed_pages(&self) -> StorageResult<u64>;

    /// Total indicator row count
    fn count_indicators(&self) -> StorageResult<u64>;

    /// Indicator counts grouped by type, ordered by count descending
    fn count_indicators_by_kind(&self) -> StorageResult<Vec<(String, u64)>>;

    /// Timestamp of the most recent fetch, if any
    fn latest_fetch(&self) -> StorageResult<Option<String>>;
}
