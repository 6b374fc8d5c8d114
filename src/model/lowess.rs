//! Locally weighted scatterplot smoothing (lowess).
//!
//! For each query point, the nearest `ceil(fraction * n)` observations (by
//! x-distance) are fit with a weighted degree-1 least-squares line under
//! tricube weights, and the line is evaluated at the query. No robustness
//! iterations are run; the smoother is descriptive only.

use anyhow::{Result, bail};

use crate::model::utility::weighted_mean;

/// Default span: the fraction of points entering each local fit.
pub const DEFAULT_FRACTION: f64 = 0.75;

/// A fitted lowess smoother. Holds the observation set; each prediction is a
/// fresh local fit around the query point.
#[derive(Debug, Clone)]
pub struct LowessFit {
    fraction: f64,
    /// Observations sorted by x.
    points: Vec<(f64, f64)>,
}

/// Builds a smoother over the given observations.
///
/// # Errors
///
/// Fails with fewer than three points or a fraction outside (0, 1].
pub fn fit_lowess(points: &[(f64, f64)], fraction: f64) -> Result<LowessFit> {
    if points.len() < 3 {
        bail!("lowess requires at least three points, got {}", points.len());
    }
    if !(fraction > 0.0 && fraction <= 1.0) {
        bail!("lowess fraction must lie in (0, 1], got {fraction}");
    }

    let mut points = points.to_vec();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    Ok(LowessFit { fraction, points })
}

impl LowessFit {
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Evaluates the smoother at `x` via one local weighted linear fit.
    pub fn predict(&self, x: f64) -> f64 {
        let n = self.points.len();
        let span = ((self.fraction * n as f64).ceil() as usize).clamp(2, n);

        // Nearest `span` observations by x-distance.
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            let da = (self.points[a].0 - x).abs();
            let db = (self.points[b].0 - x).abs();
            da.total_cmp(&db)
        });
        let window = &order[..span];

        let d_max = window
            .iter()
            .map(|&i| (self.points[i].0 - x).abs())
            .fold(0.0_f64, f64::max);

        let xs: Vec<f64> = window.iter().map(|&i| self.points[i].0).collect();
        let ys: Vec<f64> = window.iter().map(|&i| self.points[i].1).collect();
        let weights: Vec<f64> = xs.iter().map(|&xi| tricube((xi - x).abs(), d_max)).collect();

        local_linear(&xs, &ys, &weights, x)
    }
}

/// Tricube kernel: `(1 - (d / d_max)^3)^3`, 1.0 when the window has zero
/// width (all neighbors coincide with the query).
fn tricube(distance: f64, d_max: f64) -> f64 {
    if d_max == 0.0 {
        return 1.0;
    }
    let u = (distance / d_max).min(1.0);
    (1.0 - u.powi(3)).powi(3)
}

/// Weighted least-squares line through `(xs, ys)`, evaluated at `x`. Falls
/// back to the weighted mean when the window has no x-spread.
fn local_linear(xs: &[f64], ys: &[f64], weights: &[f64], x: f64) -> f64 {
    let x_bar = weighted_mean(xs, weights);
    let y_bar = weighted_mean(ys, weights);

    let sxx: f64 = xs
        .iter()
        .zip(weights)
        .map(|(xi, w)| w * (xi - x_bar).powi(2))
        .sum();
    if sxx < f64::EPSILON {
        return y_bar;
    }

    let sxy: f64 = xs
        .iter()
        .zip(ys)
        .zip(weights)
        .map(|((xi, yi), w)| w * (xi - x_bar) * (yi - y_bar))
        .sum();

    let slope = sxy / sxx;
    y_bar + slope * (x - x_bar)
}
