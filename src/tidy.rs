//! Column selection and calendar feature derivation.
//!
//! Projects the cleaned table down to the four analysis columns and derives
//! per-row calendar features: year, ordered month, and the half-hour bucket
//! used by the hourly aggregation and both model fits.

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate, Timelike};
use tracing::warn;

use crate::table::RawTable;

/// Source column → tidy name mapping, fixed by the dataset schema.
static SELECTED_COLUMNS: &[(&str, &str)] = &[
    ("OCCUR_DATE", "date"),
    ("OCCUR_TIME", "time"),
    ("BORO", "boro"),
    ("STATISTICAL_MURDER_FLAG", "murder"),
];

/// Month labels in calendar order; `month` is 1-based.
static MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn month_label(month: u32) -> &'static str {
    MONTH_LABELS[(month - 1) as usize]
}

/// Column indices of the four retained source columns.
#[derive(Debug, Clone, Copy)]
pub struct Selection {
    date: usize,
    time: usize,
    boro: usize,
    murder: usize,
}

/// One incident with its derived calendar features.
#[derive(Debug, Clone, PartialEq)]
pub struct TidyRecord {
    pub date: NaiveDate,
    pub boro: String,
    pub murder: bool,
    pub year: i32,
    /// Calendar month, 1..=12. Label via [`month_label`].
    pub month: u32,
    /// Half-hour bucket in {0.0, 0.5, 1.0, ..., 23.5}.
    pub hour: f64,
    pub minute: u32,
}

/// Resolves the four retained columns, failing deterministically if any is
/// absent from the input schema.
pub fn select_columns(table: &RawTable) -> Result<Selection> {
    let mut indices = [0usize; 4];
    for (slot, (source, renamed)) in indices.iter_mut().zip(SELECTED_COLUMNS.iter().copied()) {
        match table.column_index(source) {
            Some(i) => *slot = i,
            None => bail!("required column {source} (renamed to {renamed}) missing from input"),
        }
    }

    Ok(Selection {
        date: indices[0],
        time: indices[1],
        boro: indices[2],
        murder: indices[3],
    })
}

/// Parses an occurrence date in the dataset's `MM/DD/YYYY` format.
pub fn parse_occur_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%m/%d/%Y")
        .with_context(|| format!("invalid occurrence date {text:?}"))
}

/// Parses an occurrence time as `HH:MM:SS` (seconds optional), returning
/// integer hour and minute.
pub fn parse_occur_time(text: &str) -> Result<(u32, u32)> {
    let time = chrono::NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| chrono::NaiveTime::parse_from_str(text, "%H:%M"))
        .with_context(|| format!("invalid occurrence time {text:?}"))?;
    Ok((time.hour(), time.minute()))
}

/// Half-hour bucketing: minutes past the half hour push the bucket up by 0.5,
/// giving 48 possible values per day.
pub fn bucket_hour(hour: u32, minute: u32) -> f64 {
    if minute >= 30 {
        hour as f64 + 0.5
    } else {
        hour as f64
    }
}

/// Parses the statistical murder flag. The dataset uses `true`/`false`
/// (historically also `Y`/`N`), case-insensitive.
pub fn parse_murder_flag(text: &str) -> Result<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "y" => Ok(true),
        "false" | "n" => Ok(false),
        _ => bail!("invalid murder flag {text:?}"),
    }
}

/// Derivation result: the tidy records plus the number of rows dropped for
/// unparseable date, time, or flag values.
#[derive(Debug)]
pub struct Derived {
    pub records: Vec<TidyRecord>,
    pub skipped: usize,
}

/// Derives a [`TidyRecord`] per source row.
///
/// Rows that fail to parse are skipped and counted, with one WARN per row;
/// a handful of malformed rows should not abort a descriptive report.
pub fn derive_records(table: &RawTable, selection: Selection) -> Derived {
    let mut records = Vec::with_capacity(table.row_count());
    let mut skipped = 0;

    for row in table.rows() {
        match derive_row(row, selection) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(error = %e, "Skipping unparseable row");
                skipped += 1;
            }
        }
    }

    Derived { records, skipped }
}

fn derive_row(row: &[String], selection: Selection) -> Result<TidyRecord> {
    let date = parse_occur_date(&row[selection.date])?;
    let (hour, minute) = parse_occur_time(&row[selection.time])?;
    let murder = parse_murder_flag(&row[selection.murder])?;

    Ok(TidyRecord {
        date,
        boro: row[selection.boro].clone(),
        murder,
        year: date.year(),
        month: date.month(),
        hour: bucket_hour(hour, minute),
        minute,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::parse_table;

    fn sample_table() -> RawTable {
        let csv = b"INCIDENT_KEY,OCCUR_DATE,OCCUR_TIME,BORO,STATISTICAL_MURDER_FLAG\n\
            1,07/04/2021,14:45:00,BROOKLYN,true\n\
            2,12/31/2019,14:10:00,QUEENS,false\n\
            3,02/29/2020,00:05:00,BRONX,TRUE\n";
        parse_table(csv).unwrap()
    }

    #[test]
    fn test_select_columns() {
        let table = sample_table();
        let selection = select_columns(&table).unwrap();
        let derived = derive_records(&table, selection);

        assert_eq!(derived.records.len(), 3);
        assert_eq!(derived.records[0].boro, "BROOKLYN");
    }

    #[test]
    fn test_select_fails_on_missing_boro() {
        let csv = b"OCCUR_DATE,OCCUR_TIME,STATISTICAL_MURDER_FLAG\n01/01/2020,00:00:00,true\n";
        let table = parse_table(csv).unwrap();

        let err = select_columns(&table).unwrap_err();
        assert!(err.to_string().contains("BORO"));
    }

    #[test]
    fn test_hour_bucketing() {
        assert_eq!(bucket_hour(14, 45), 14.5);
        assert_eq!(bucket_hour(14, 10), 14.0);
        assert_eq!(bucket_hour(14, 30), 14.5);
        assert_eq!(bucket_hour(0, 0), 0.0);
        assert_eq!(bucket_hour(23, 59), 23.5);
    }

    #[test]
    fn test_hour_domain() {
        let table = sample_table();
        let selection = select_columns(&table).unwrap();
        let derived = derive_records(&table, selection);

        for record in &derived.records {
            let half_hours = record.hour * 2.0;
            assert_eq!(half_hours.fract(), 0.0);
            assert!((0.0..=47.0).contains(&half_hours));
        }
    }

    #[test]
    fn test_calendar_features() {
        let table = sample_table();
        let selection = select_columns(&table).unwrap();
        let derived = derive_records(&table, selection);

        let first = &derived.records[0];
        assert_eq!(first.year, 2021);
        assert_eq!(first.month, 7);
        assert_eq!(month_label(first.month), "Jul");
        assert_eq!(first.hour, 14.5);
        assert_eq!(first.minute, 45);
        assert!(first.murder);

        let second = &derived.records[1];
        assert_eq!(second.hour, 14.0);
        assert!(!second.murder);
    }

    #[test]
    fn test_murder_flag_variants() {
        assert!(parse_murder_flag("TRUE").unwrap());
        assert!(parse_murder_flag("Y").unwrap());
        assert!(!parse_murder_flag("n").unwrap());
        assert!(parse_murder_flag("maybe").is_err());
    }

    #[test]
    fn test_time_without_seconds() {
        assert_eq!(parse_occur_time("09:31").unwrap(), (9, 31));
    }

    #[test]
    fn test_malformed_rows_are_skipped_and_counted() {
        let csv = b"OCCUR_DATE,OCCUR_TIME,BORO,STATISTICAL_MURDER_FLAG\n\
            07/04/2021,14:45:00,BROOKLYN,true\n\
            not-a-date,14:45:00,BROOKLYN,true\n\
            07/04/2021,99:99:99,BROOKLYN,true\n";
        let table = parse_table(csv).unwrap();
        let selection = select_columns(&table).unwrap();
        let derived = derive_records(&table, selection);

        assert_eq!(derived.records.len(), 1);
        assert_eq!(derived.skipped, 2);
    }

    #[test]
    fn test_month_labels_ordered() {
        assert_eq!(month_label(1), "Jan");
        assert_eq!(month_label(12), "Dec");
    }
}
