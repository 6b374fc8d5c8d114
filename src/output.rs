//! Output formatting and persistence for aggregate tables and model artifacts.
//!
//! Supports CSV table writes, JSON file writes, and JSON logging.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Logs any serializable value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a slice of serializable rows as a CSV file with headers,
/// replacing any previous contents. Every run recomputes every table, so
/// there is no append mode.
pub fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV table");

    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes a serializable value as a pretty-printed JSON file.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    debug!(path = %path.display(), "Writing JSON file");

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    #[derive(Serialize)]
    struct Row {
        boro: String,
        shootings: u64,
    }

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    #[test]
    fn test_write_table_with_header() {
        let path = temp_path("shooting_trends_test_table.csv");
        let _ = fs::remove_file(&path);

        let rows = vec![
            Row {
                boro: "BRONX".to_string(),
                shootings: 3,
            },
            Row {
                boro: "QUEENS".to_string(),
                shootings: 5,
            },
        ];
        write_table(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "boro,shootings");
        assert_eq!(lines[2], "QUEENS,5");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_table_replaces_previous_contents() {
        let path = temp_path("shooting_trends_test_replace.csv");
        let _ = fs::remove_file(&path);

        let rows = vec![Row {
            boro: "A".to_string(),
            shootings: 1,
        }];
        write_table(&path, &rows).unwrap();
        write_table(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_json_roundtrip() {
        let path = temp_path("shooting_trends_test_summary.json");
        let _ = fs::remove_file(&path);

        let row = Row {
            boro: "BRONX".to_string(),
            shootings: 3,
        };
        write_json(&path, &row).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["shootings"], 3);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_print_json_does_not_panic() {
        let row = Row {
            boro: "BRONX".to_string(),
            shootings: 0,
        };
        print_json(&row).unwrap();
    }
}
