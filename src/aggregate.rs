//! Group-by summaries over the tidy incident records.
//!
//! Three independent passes: by borough, by half-hour bucket, by calendar
//! month. Each bucket carries the incident count and the fatal-incident
//! count. Only keys observed in the data produce buckets; there is no
//! zero-filling.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::tidy::{TidyRecord, month_label};

/// Incidents and fatalities for one borough.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoroBucket {
    pub boro: String,
    pub shootings: u64,
    pub murders: u64,
}

/// Incidents and fatalities for one half-hour bucket of the day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourBucket {
    pub hour: f64,
    pub shootings: u64,
    pub murders: u64,
}

/// Incidents and fatalities for one calendar month (across all years).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    pub month: &'static str,
    pub shootings: u64,
    pub murders: u64,
}

#[derive(Default, Clone, Copy)]
struct Counts {
    shootings: u64,
    murders: u64,
}

fn tally<K: Ord>(records: &[TidyRecord], key: impl Fn(&TidyRecord) -> K) -> BTreeMap<K, Counts> {
    let mut groups: BTreeMap<K, Counts> = BTreeMap::new();
    for record in records {
        let counts = groups.entry(key(record)).or_default();
        counts.shootings += 1;
        if record.murder {
            counts.murders += 1;
        }
    }
    groups
}

/// Groups by borough, alphabetical order.
pub fn by_boro(records: &[TidyRecord]) -> Vec<BoroBucket> {
    tally(records, |r| r.boro.clone())
        .into_iter()
        .map(|(boro, c)| BoroBucket {
            boro,
            shootings: c.shootings,
            murders: c.murders,
        })
        .collect()
}

/// Groups by half-hour bucket, ascending. Keys internally as half-hour
/// counts (0..=47) so the map ordering stays integral.
pub fn by_hour(records: &[TidyRecord]) -> Vec<HourBucket> {
    tally(records, |r| (r.hour * 2.0) as u32)
        .into_iter()
        .map(|(half_hours, c)| HourBucket {
            hour: half_hours as f64 / 2.0,
            shootings: c.shootings,
            murders: c.murders,
        })
        .collect()
}

/// Groups by calendar month, Jan through Dec.
pub fn by_month(records: &[TidyRecord]) -> Vec<MonthBucket> {
    tally(records, |r| r.month)
        .into_iter()
        .map(|(month, c)| MonthBucket {
            month: month_label(month),
            shootings: c.shootings,
            murders: c.murders,
        })
        .collect()
}
