//! SQLite storage implementation

use crate::indicators::IndicatorKind;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Store, StorageResult};
use crate::storage::{IndicatorRow, NewPage, PageRow};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database at the given path
    ///
    /// Creates parent directories as needed and applies the schema, which is
    /// idempotent across restarts.
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

fn row_to_page(row: &rusqlite::Row<'_>) -> rusqlite::Result<PageRow> {
    Ok(PageRow {
        id: row.get(0)?,
        url: row.get(1)?,
        fetched_at: row.get(2)?,
        status_code: row.get(3)?,
        title: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        excerpt: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        error: row.get(6)?,
    })
}

impl Store for SqliteStore {
    fn save_page(&mut self, page: &NewPage<'_>) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO pages(url, fetched_at, status_code, title, excerpt, error)
             VALUES(?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(url) DO UPDATE SET
               fetched_at = excluded.fetched_at,
               status_code = excluded.status_code,
               title = excluded.title,
               excerpt = excluded.excerpt,
               error = excluded.error",
            params![
                page.url,
                page.fetched_at,
                page.status_code,
                page.title,
                page.excerpt,
                page.error,
            ],
        )?;
        Ok(())
    }

    fn append_indicators(
        &mut self,
        page_url: &str,
        values: &[String],
        found_at: &str,
    ) -> StorageResult<()> {
        if values.is_empty() {
            return Ok(());
        }

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO indicators(page_url, indicator, type, found_at)
                 VALUES(?1, ?2, ?3, ?4)",
            )?;
            for value in values {
                let kind = IndicatorKind::classify(value);
                stmt.execute(params![page_url, value, kind.to_db_string(), found_at])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn get_page_by_url(&self, url: &str) -> StorageResult<Option<PageRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, url, fetched_at, status_code, title, excerpt, error
             FROM pages WHERE url = ?1",
        )?;

        let page = stmt.query_row(params![url], row_to_page).optional()?;
        Ok(page)
    }

    fn list_pages(&self) -> StorageResult<Vec<PageRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, url, fetched_at, status_code, title, excerpt, error
             FROM pages ORDER BY id",
        )?;

        let pages = stmt
            .query_map([], row_to_page)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pages)
    }

    fn list_indicators(&self) -> StorageResult<Vec<IndicatorRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, page_url, indicator, type, found_at
             FROM indicators ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(IndicatorRow {
                    id: row.get(0)?,
                    page_url: row.get(1)?,
                    indicator: row.get(2)?,
                    kind: IndicatorKind::from_db_string(&row.get::<_, String>(3)?)
                        .unwrap_or(IndicatorKind::Unknown),
                    found_at: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn count_pages(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_succeeded_pages(&self) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM pages WHERE error IS NULL",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn count_failed_pages(&self) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM pages WHERE error IS NOT NULL",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn count_indicators(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM indicators", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_indicators_by_kind(&self) -> StorageResult<Vec<(String, u64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT type, COUNT(*) as count FROM indicators
             GROUP BY type ORDER BY count DESC, type ASC",
        )?;

        let counts = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get::<_, i64>(1)? as u64)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(counts)
    }

    fn latest_fetch(&self) -> StorageResult<Option<String>> {
        let latest: Option<String> = self
            .conn
            .query_row("SELECT MAX(fetched_at) FROM pages", [], |row| row.get(0))?;
        Ok(latest)
    }
}
