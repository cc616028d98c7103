//! Database export for downstream tooling
//!
//! Writes the pages and indicators tables out as CSV files plus one combined
//! JSON document, so collected intelligence can be loaded into spreadsheets
//! or other analysis pipelines without touching SQLite.

use crate::storage::Store;
use crate::Result;
use std::path::{Path, PathBuf};

/// Paths of the files written by one export
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub pages_csv: PathBuf,
    pub indicators_csv: PathBuf,
    pub json: PathBuf,
}

/// Exports the database contents into `out_dir`
///
/// Creates the directory if needed and overwrites any previous export.
pub fn export_database(store: &dyn Store, out_dir: &Path) -> Result<ExportPaths> {
    std::fs::create_dir_all(out_dir)?;

    let pages = store.list_pages()?;
    let indicators = store.list_indicators()?;

    let pages_csv = out_dir.join("pages.csv");
    let mut writer = csv::Writer::from_path(&pages_csv)?;
    writer.write_record(["url", "fetched_at", "status_code", "title", "excerpt", "error"])?;
    for page in &pages {
        let status = page
            .status_code
            .map(|code| code.to_string())
            .unwrap_or_default();
        writer.write_record([
            page.url.as_str(),
            page.fetched_at.as_str(),
            status.as_str(),
            page.title.as_str(),
            page.excerpt.as_str(),
            page.error.as_deref().unwrap_or(""),
        ])?;
    }
    writer.flush()?;

    let indicators_csv = out_dir.join("indicators.csv");
    let mut writer = csv::Writer::from_path(&indicators_csv)?;
    writer.write_record(["page_url", "indicator", "type", "found_at"])?;
    for row in &indicators {
        writer.write_record([
            row.page_url.as_str(),
            row.indicator.as_str(),
            row.kind.to_db_string(),
            row.found_at.as_str(),
        ])?;
    }
    writer.flush()?;

    let json = out_dir.join("intel.json");
    let combined = serde_json::json!({
        "pages": pages,
        "indicators": indicators,
    });
    std::fs::write(&json, serde_json::to_string_pretty(&combined)?)?;

    tracing::info!(
        pages = pages.len(),
        indicators = indicators.len(),
        dir = %out_dir.display(),
        "Export complete"
    );

    Ok(ExportPaths {
        pages_csv,
        indicators_csv,
        json,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{NewPage, SqliteStore, Store};
    use tempfile::TempDir;

    fn seeded_store() -> SqliteStore {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .save_page(&NewPage {
                url: "https://example.org/a",
                fetched_at: "2026-01-01T00:00:00+00:00",
                status_code: Some(200),
                title: "Threat Feed",
                excerpt: "Contact admin@test.org, \"quoted\" text",
                error: None,
            })
            .unwrap();
        store
            .append_indicators(
                "https://example.org/a",
                &["admin@test.org".to_string()],
                "2026-01-01T00:00:00+00:00",
            )
            .unwrap();
        store
    }

    #[test]
    fn test_export_writes_all_files() {
        let store = seeded_store();
        let dir = TempDir::new().unwrap();

        let paths = export_database(&store, dir.path()).unwrap();

        assert!(paths.pages_csv.exists());
        assert!(paths.indicators_csv.exists());
        assert!(paths.json.exists());
    }

    #[test]
    fn test_csv_contents() {
        let store = seeded_store();
        let dir = TempDir::new().unwrap();

        let paths = export_database(&store, dir.path()).unwrap();

        let pages = std::fs::read_to_string(&paths.pages_csv).unwrap();
        assert!(pages.starts_with("url,fetched_at,status_code,title,excerpt,error"));
        assert!(pages.contains("https://example.org/a"));

        let indicators = std::fs::read_to_string(&paths.indicators_csv).unwrap();
        assert!(indicators.contains("admin@test.org,email"));
    }

    #[test]
    fn test_json_round_trips() {
        let store = seeded_store();
        let dir = TempDir::new().unwrap();

        let paths = export_database(&store, dir.path()).unwrap();

        let raw = std::fs::read_to_string(&paths.json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(value["pages"].as_array().unwrap().len(), 1);
        assert_eq!(value["pages"][0]["url"], "https://example.org/a");
        assert_eq!(value["pages"][0]["status_code"], 200);
        assert_eq!(value["indicators"][0]["type"], "email");
    }

    #[test]
    fn test_export_empty_database() {
        let store = SqliteStore::open_in_memory().unwrap();
        let dir = TempDir::new().unwrap();

        let paths = export_database(&store, dir.path()).unwrap();

        let pages = std::fs::read_to_string(&paths.pages_csv).unwrap();
        assert_eq!(pages.lines().count(), 1); // header only
    }
}
