//! Sentinel normalization for the raw incident table.
//!
//! The source data marks "unknown / not applicable" with a handful of
//! placeholder strings instead of leaving the cell empty. This pass rewrites
//! those placeholders to empty cells in the columns known to carry them, and
//! reports per-column null counts as a diagnostic.

use crate::table::RawTable;

/// Placeholder strings meaning "value unknown". Matched as exact strings;
/// the numeric-looking entries are mistyped location codes, not thresholds.
pub static SENTINELS: &[&str] = &["(null)", "UNKNOWN", "U", "1020", "224", "940", "NONE"];

/// Columns subject to sentinel scrubbing: the perpetrator fields plus the
/// location description. Enumerated statically; other columns are left alone.
pub static SCRUB_COLUMNS: &[&str] = &[
    "PERP_AGE_GROUP",
    "PERP_SEX",
    "PERP_RACE",
    "LOCATION_DESC",
];

/// The null marker written in place of a sentinel. The source CSV already
/// uses empty cells for genuinely absent values, so scrubbing collapses both
/// into one representation.
pub const NULL_MARKER: &str = "";

/// Rewrites sentinel cells to [`NULL_MARKER`] across [`SCRUB_COLUMNS`],
/// in place. Returns the number of cells rewritten. Idempotent: a second
/// pass over already-cleaned data rewrites nothing.
pub fn scrub_sentinels(table: &mut RawTable) -> usize {
    let targets: Vec<usize> = SCRUB_COLUMNS
        .iter()
        .filter_map(|name| table.column_index(name))
        .collect();

    let mut scrubbed = 0;
    for row in table.rows_mut() {
        for &col in &targets {
            if SENTINELS.contains(&row[col].as_str()) {
                row[col].clear();
                scrubbed += 1;
            }
        }
    }

    scrubbed
}

/// Per-column count of null (empty) cells, in header order. Informational
/// only; nothing downstream branches on it.
pub fn null_counts(table: &RawTable) -> Vec<(String, usize)> {
    table
        .headers()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let count = table.rows().iter().filter(|row| row[i].is_empty()).count();
            (name.clone(), count)
        })
        .collect()
}
