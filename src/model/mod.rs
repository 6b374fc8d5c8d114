//! The two descriptive regression fits over the hourly aggregates.
//!
//! Both consume the hour buckets, not raw records: an ordinary least-squares
//! line relating fatalities to incident volume, and a lowess-style local
//! smoother capturing the bimodal shape of incident volume across the day.

pub mod linear;
pub mod lowess;
pub mod utility;
