use crate::error::{Error, Result};
use crate::lines::{FinalizeCriteria, SlopeEstimator, SlopeMethod};
use crate::spectrum::RefineOptions;
use crate::types::Statistic;
use serde::{Deserialize, Serialize};

/// Options of the sequential line-association engine.
///
/// Times are in seconds, frequencies in Hz and slopes in Hz/s.
/// `initial_frequency_acceptance` governs lines holding a single point,
/// whose slope is still the configured guess; unset means the regular
/// `frequency_acceptance`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderOptions {
    /// A line whose last point is older than this (run clock) is closed.
    pub time_gap_tolerance: f64,
    pub frequency_acceptance: f64,
    pub initial_frequency_acceptance: Option<f64>,
    /// Slope assumed for freshly seeded lines.
    pub initial_slope: f64,
    pub slope_method: SlopeMethod,
    /// Recent points considered by the weighted slope methods.
    pub n_slope_points: usize,
    pub min_points: usize,
    pub min_slope: f64,
    pub trimming_threshold: f64,
    pub trimming_statistic: Statistic,
    /// Let one point extend every line it matches instead of the first only.
    pub allow_multi_match: bool,
    /// Per-time-bin frequency error used by the track fit when the points are
    /// perfectly aligned.
    pub fit_assigned_error: f64,
    pub refine: RefineOptions,
}

impl Default for FinderOptions {
    fn default() -> Self {
        Self {
            time_gap_tolerance: 0.5e-3,
            frequency_acceptance: 56166.0528183,
            initial_frequency_acceptance: None,
            initial_slope: 3.0e8,
            slope_method: SlopeMethod::default(),
            n_slope_points: 10,
            min_points: 3,
            min_slope: 0.0,
            trimming_threshold: 6.0,
            trimming_statistic: Statistic::default(),
            allow_multi_match: true,
            fit_assigned_error: 0.0,
            refine: RefineOptions::default(),
        }
    }
}

impl FinderOptions {
    pub fn initial_acceptance(&self) -> f64 {
        self.initial_frequency_acceptance
            .unwrap_or(self.frequency_acceptance)
    }

    pub fn slope_estimator(&self) -> SlopeEstimator {
        SlopeEstimator::new(self.slope_method, self.initial_slope, self.n_slope_points)
    }

    pub fn finalize_criteria(&self) -> FinalizeCriteria {
        FinalizeCriteria {
            min_points: self.min_points,
            min_slope: self.min_slope,
            trimming_threshold: self.trimming_threshold,
            trimming_statistic: self.trimming_statistic,
        }
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("time_gap_tolerance", self.time_gap_tolerance)?;
        positive("frequency_acceptance", self.frequency_acceptance)?;
        if let Some(v) = self.initial_frequency_acceptance {
            positive("initial_frequency_acceptance", v)?;
        }
        if !self.initial_slope.is_finite() {
            return Err(Error::invalid("initial_slope", "must be finite"));
        }
        if self.n_slope_points == 0 {
            return Err(Error::invalid("n_slope_points", "must be at least 1"));
        }
        if self.min_slope.is_nan() {
            return Err(Error::invalid("min_slope", "must not be NaN"));
        }
        if self.trimming_threshold.is_nan() {
            return Err(Error::invalid("trimming_threshold", "must not be NaN"));
        }
        non_negative("fit_assigned_error", self.fit_assigned_error)?;
        self.refine.validate()
    }
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(
            field,
            format!("must be finite and positive, got {value}"),
        ))
    }
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(
            field,
            format!("must be finite and non-negative, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_and_fall_back_for_initial_acceptance() {
        let opts = FinderOptions::default();
        opts.validate().unwrap();
        assert_eq!(opts.initial_acceptance(), opts.frequency_acceptance);
        assert!(opts.allow_multi_match);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let opts: FinderOptions = serde_json::from_str(
            r#"{ "min_points": 5, "slope_method": "unweighted", "refine": { "search_radius": 3 } }"#,
        )
        .unwrap();
        assert_eq!(opts.min_points, 5);
        assert_eq!(opts.slope_method, SlopeMethod::Unweighted);
        assert_eq!(opts.refine.search_radius, 3);
        assert_eq!(opts.refine.line_power_radius, 4);
        assert_eq!(opts.trimming_threshold, 6.0);
    }

    #[test]
    fn unknown_slope_method_fails_to_parse() {
        let parsed: std::result::Result<FinderOptions, _> =
            serde_json::from_str(r#"{ "slope_method": "median" }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn out_of_range_values_are_reported() {
        let opts = FinderOptions {
            frequency_acceptance: -1.0,
            ..Default::default()
        };
        match opts.validate() {
            Err(Error::InvalidConfig { field, .. }) => assert_eq!(field, "frequency_acceptance"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
