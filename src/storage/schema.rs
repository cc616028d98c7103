//! Database schema definitions
//!
//! One row per distinct visited URL in `pages` (upsert keyed on `url`);
//! `indicators` is append-only with no uniqueness constraint, so repeated
//! sightings of the same value produce one timestamped row each.

/// SQL schema for the intelligence database
pub const SCHEMA_SQL: &str = r#"
-- One record per distinct visited URL
CREATE TABLE IF NOT EXISTS pages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL UNIQUE,
    fetched_at TEXT NOT NULL,
    status_code INTEGER,
    title TEXT,
    excerpt TEXT,
    error TEXT
);

-- One record per indicator sighting; page_url is a logical reference,
-- deliberately not a foreign key
CREATE TABLE IF NOT EXISTS indicators (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    page_url TEXT NOT NULL,
    indicator TEXT NOT NULL,
    type TEXT NOT NULL,
    found_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_indicators_page_url ON indicators(page_url);
"#;

/// Initializes the database schema
///
/// Idempotent; safe to call on every startup.
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_initializes() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(initialize_schema(&conn).is_ok());
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        assert!(initialize_schema(&conn).is_ok());
    }

    #[test]
    fn test_tables_exist_after_init() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        for table in ["pages", "indicators"] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Table {} should exist", table);
        }
    }
}
