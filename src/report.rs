//! The report pipeline: clean, tidy, aggregate, and model one CSV snapshot.
//!
//! Runs once per invocation over an in-memory table with no state carried
//! between runs. The output boundary is the three aggregate tables plus the
//! two model artifacts, written as CSV/JSON under an output directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::aggregate::{self, BoroBucket, HourBucket, MonthBucket};
use crate::clean;
use crate::model::linear::{self, LinearFit};
use crate::model::lowess::{self, DEFAULT_FRACTION, LowessFit};
use crate::output;
use crate::table;
use crate::tidy;

/// The fixed NYC Open Data endpoint for the historic shooting incident CSV.
pub const DEFAULT_DATA_URL: &str =
    "https://data.cityofnewyork.us/api/views/833y-fsy8/rows.csv?accessType=DOWNLOAD";

/// One hour bucket with the linear model's fatality prediction.
#[derive(Debug, Serialize)]
pub struct LinearPoint {
    pub hour: f64,
    pub shootings: u64,
    pub murders: u64,
    pub predicted_murders: f64,
}

/// One hour bucket with the smoother's incident-volume prediction.
#[derive(Debug, Serialize)]
pub struct SmoothedPoint {
    pub hour: f64,
    pub shootings: u64,
    pub predicted_shootings: f64,
}

/// Headline numbers for the run, written as `fit_summary.json`.
#[derive(Debug, Serialize)]
pub struct FitSummary {
    pub total_incidents: u64,
    pub total_murders: u64,
    pub skipped_rows: usize,
    pub linear: LinearFit,
    pub smoother_fraction: f64,
}

/// Everything the pipeline produces for one snapshot.
#[derive(Debug)]
pub struct Report {
    pub by_boro: Vec<BoroBucket>,
    pub by_hour: Vec<HourBucket>,
    pub by_month: Vec<MonthBucket>,
    pub linear_fit: LinearFit,
    pub linear_points: Vec<LinearPoint>,
    pub smoother: LowessFit,
    pub smoothed_points: Vec<SmoothedPoint>,
    pub summary: FitSummary,
}

/// Runs the full pipeline over raw CSV bytes.
pub fn build_report(csv_bytes: &[u8]) -> Result<Report> {
    let mut raw = table::parse_table(csv_bytes).context("loading incident CSV")?;
    info!(rows = raw.row_count(), columns = raw.headers().len(), "Dataset loaded");

    let scrubbed = clean::scrub_sentinels(&mut raw);
    debug!(scrubbed, "Sentinel cells normalized");
    for (column, nulls) in clean::null_counts(&raw) {
        debug!(column = %column, nulls, "Null count");
    }

    let selection = tidy::select_columns(&raw)?;
    let derived = tidy::derive_records(&raw, selection);
    if derived.skipped > 0 {
        warn!(skipped = derived.skipped, "Dropped rows with unparseable date/time/flag");
    }
    if derived.records.is_empty() {
        bail!("no usable rows after cleaning and derivation");
    }

    let by_boro = aggregate::by_boro(&derived.records);
    let by_hour = aggregate::by_hour(&derived.records);
    let by_month = aggregate::by_month(&derived.records);

    // Both fits run over the hourly buckets, one point per distinct bucket.
    let murder_points: Vec<(f64, f64)> = by_hour
        .iter()
        .map(|b| (b.shootings as f64, b.murders as f64))
        .collect();
    let linear_fit = linear::fit_linear(&murder_points)
        .context("fitting murders ~ shootings over hour buckets")?;

    let volume_points: Vec<(f64, f64)> =
        by_hour.iter().map(|b| (b.hour, b.shootings as f64)).collect();
    let smoother = lowess::fit_lowess(&volume_points, DEFAULT_FRACTION)
        .context("fitting the shootings ~ hour smoother")?;

    let linear_points = by_hour
        .iter()
        .map(|b| LinearPoint {
            hour: b.hour,
            shootings: b.shootings,
            murders: b.murders,
            predicted_murders: linear_fit.predict(b.shootings as f64),
        })
        .collect();
    let smoothed_points: Vec<SmoothedPoint> = by_hour
        .iter()
        .map(|b| SmoothedPoint {
            hour: b.hour,
            shootings: b.shootings,
            predicted_shootings: smoother.predict(b.hour),
        })
        .collect();

    let total_incidents = derived.records.len() as u64;
    let total_murders = derived.records.iter().filter(|r| r.murder).count() as u64;
    info!(
        total_incidents,
        total_murders,
        r_squared = linear_fit.r_squared,
        "Pipeline complete"
    );

    let summary = FitSummary {
        total_incidents,
        total_murders,
        skipped_rows: derived.skipped,
        linear: linear_fit.clone(),
        smoother_fraction: smoother.fraction(),
    };

    Ok(Report {
        by_boro,
        by_hour,
        by_month,
        linear_fit,
        linear_points,
        smoother,
        smoothed_points,
        summary,
    })
}

/// Writes the report's tables and model artifacts under `dir`.
pub fn write_report(report: &Report, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    output::write_table(&dir.join("by_boro.csv"), &report.by_boro)?;
    output::write_table(&dir.join("by_hour.csv"), &report.by_hour)?;
    output::write_table(&dir.join("by_month.csv"), &report.by_month)?;
    output::write_table(&dir.join("linear_fit.csv"), &report.linear_points)?;
    output::write_table(&dir.join("smoother_fit.csv"), &report.smoothed_points)?;
    output::write_json(&dir.join("fit_summary.json"), &report.summary)?;

    info!(dir = %dir.display(), "Report artifacts written");
    Ok(())
}
