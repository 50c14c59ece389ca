//! Least-squares straight-line fit of a candidate's points with parameter
//! uncertainties.
//!
//! Points sharing an acquisition time are first collapsed into one
//! amplitude-weighted frequency, then `f = slope * t_acq + intercept` is
//! solved through the 2x2 normal equations. The covariance is
//! `s² (XᵀX)⁻¹` with `s² = χ² / (n - 2)`; when the residuals vanish (points
//! exactly aligned) an assigned per-bin frequency error stands in for `s`.

use crate::types::Point;
use nalgebra::{Matrix2, Vector2};
use serde::Serialize;

/// Residual sum below which the assigned error replaces the fitted scatter.
const CHI2_FLOOR: f64 = 0.1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
    pub slope_sigma: f64,
    pub intercept_sigma: f64,
    /// Slope–intercept covariance.
    pub covariance: f64,
    pub chi2: f64,
    /// Number of distinct acquisition times entering the fit.
    pub time_bins: usize,
}

impl LineFit {
    /// Propagated frequency uncertainty of the fitted line at `t_acq`.
    pub fn frequency_sigma_at(&self, t_acq: f64) -> f64 {
        let var = t_acq * t_acq * self.slope_sigma * self.slope_sigma
            + self.intercept_sigma * self.intercept_sigma
            + 2.0 * t_acq * self.covariance;
        var.max(0.0).sqrt()
    }
}

/// Fit `points`; `None` when fewer than two distinct times are present.
pub fn fit_points(points: &[Point], assigned_error: f64) -> Option<LineFit> {
    let bins = time_bins(points);
    if bins.len() < 2 {
        return None;
    }

    let n = bins.len() as f64;
    let (mut sx, mut sy, mut sxx, mut sxy) = (0.0, 0.0, 0.0, 0.0);
    for &(t, f) in &bins {
        sx += t;
        sy += f;
        sxx += t * t;
        sxy += t * f;
    }
    let normal = Matrix2::new(sxx, sx, sx, n);
    let inverse = normal.try_inverse()?;
    let params = inverse * Vector2::new(sxy, sy);
    let (slope, intercept) = (params[0], params[1]);
    if !(slope.is_finite() && intercept.is_finite()) {
        return None;
    }

    let chi2: f64 = bins
        .iter()
        .map(|&(t, f)| {
            let r = f - slope * t - intercept;
            r * r
        })
        .sum();

    let mut fit = LineFit {
        slope,
        intercept,
        chi2,
        time_bins: bins.len(),
        ..Default::default()
    };
    if bins.len() > 2 {
        let s2 = if chi2 < CHI2_FLOOR {
            assigned_error * assigned_error
        } else {
            chi2 / (n - 2.0)
        };
        let cov = inverse * s2;
        fit.slope_sigma = cov[(0, 0)].max(0.0).sqrt();
        fit.intercept_sigma = cov[(1, 1)].max(0.0).sqrt();
        fit.covariance = cov[(0, 1)];
    }
    Some(fit)
}

/// `(t_acq, weighted frequency)` per distinct acquisition time, ascending.
fn time_bins(points: &[Point]) -> Vec<(f64, f64)> {
    let mut sorted: Vec<&Point> = points.iter().collect();
    sorted.sort_by(|a, b| a.time_in_acq.total_cmp(&b.time_in_acq));

    let mut bins: Vec<(f64, f64)> = Vec::new();
    let mut i = 0;
    while i < sorted.len() {
        let t = sorted[i].time_in_acq;
        let (mut sum_pf, mut sum_p, mut sum_f, mut count) = (0.0, 0.0, 0.0, 0usize);
        while i < sorted.len() && sorted[i].time_in_acq == t {
            let p = sorted[i];
            if p.amplitude > 0.0 {
                sum_pf += p.frequency * p.amplitude;
                sum_p += p.amplitude;
            }
            sum_f += p.frequency;
            count += 1;
            i += 1;
        }
        let f = if sum_p > 0.0 {
            sum_pf / sum_p
        } else {
            sum_f / count as f64
        };
        bins.push((t, f));
    }
    bins
}
