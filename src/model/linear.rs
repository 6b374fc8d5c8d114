//! Ordinary least-squares simple linear regression.

use anyhow::{Result, bail};
use serde::Serialize;

use crate::model::utility::mean;

/// A fitted line `y = intercept + slope * x` with its coefficient of
/// determination over the fitting data.
#[derive(Debug, Clone, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fits `y = intercept + slope * x` by ordinary least squares.
///
/// # Errors
///
/// Fails with fewer than two points, or when all x values coincide (the
/// slope is undefined).
pub fn fit_linear(points: &[(f64, f64)]) -> Result<LinearFit> {
    if points.len() < 2 {
        bail!("linear fit requires at least two points, got {}", points.len());
    }

    let xs: Vec<f64> = points.iter().map(|(x, _)| *x).collect();
    let ys: Vec<f64> = points.iter().map(|(_, y)| *y).collect();
    let x_mean = mean(&xs);
    let y_mean = mean(&ys);

    let sxx: f64 = xs.iter().map(|x| (x - x_mean).powi(2)).sum();
    if sxx == 0.0 {
        bail!("linear fit is degenerate: all x values are identical");
    }
    let sxy: f64 = xs
        .iter()
        .zip(&ys)
        .map(|(x, y)| (x - x_mean) * (y - y_mean))
        .sum();

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    // R^2 = 1 - SS_res / SS_tot; a constant y series fits exactly.
    let ss_tot: f64 = ys.iter().map(|y| (y - y_mean).powi(2)).sum();
    let ss_res: f64 = points
        .iter()
        .map(|(x, y)| (y - (intercept + slope * x)).powi(2))
        .sum();
    let r_squared = if ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Ok(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}
