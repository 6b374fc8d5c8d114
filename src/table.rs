//! CSV parser for the incident dataset.
//!
//! Everything downstream works on a [`RawTable`]: the header row plus one
//! owned string cell per field. Types are derived later, per column, by the
//! stages that actually consume them.

use anyhow::{Context, Result};

/// An in-memory CSV table. One entry in `rows` per source record, each with
/// exactly `headers.len()` cells.
#[derive(Debug, Clone)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the column with the given header, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Mutable access for in-place cell rewrites (used by the cleaner).
    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<String>] {
        &mut self.rows
    }
}

/// Decodes a CSV document from raw bytes into a [`RawTable`].
///
/// # Errors
///
/// Returns an error if the bytes are not valid CSV (missing header row,
/// ragged records, invalid UTF-8).
pub fn parse_table(bytes: &[u8]) -> Result<RawTable> {
    let mut reader = csv::Reader::from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV header row")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("reading CSV record")?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_table() {
        let csv = b"A,B,C\n1,2,3\n4,5,6\n";
        let table = parse_table(csv).unwrap();

        assert_eq!(table.headers(), &["A", "B", "C"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[1], vec!["4", "5", "6"]);
    }

    #[test]
    fn test_parse_empty_body() {
        let csv = b"A,B\n";
        let table = parse_table(csv).unwrap();

        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_parse_quoted_cells() {
        let csv = b"BORO,LOCATION_DESC\nBRONX,\"MULTI DWELL - PUBLIC HOUS\"\n";
        let table = parse_table(csv).unwrap();

        assert_eq!(table.rows()[0][1], "MULTI DWELL - PUBLIC HOUS");
    }

    #[test]
    fn test_parse_ragged_rows_fails() {
        let csv = b"A,B,C\n1,2\n";
        assert!(parse_table(csv).is_err());
    }

    #[test]
    fn test_column_index() {
        let csv = b"OCCUR_DATE,BORO\n01/01/2020,QUEENS\n";
        let table = parse_table(csv).unwrap();

        assert_eq!(table.column_index("BORO"), Some(1));
        assert_eq!(table.column_index("PRECINCT"), None);
    }
}
