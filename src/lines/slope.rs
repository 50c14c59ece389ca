use super::line::LineRef;
use serde::{Deserialize, Serialize};

/// How a line's slope is re-estimated after each insertion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlopeMethod {
    /// Ordinary least squares over every point's `(time_in_run, frequency)`.
    Unweighted,
    /// Neighborhood-amplitude weighted mean of slopes to the first point.
    #[default]
    #[serde(alias = "weighted-first-ref")]
    WeightedFirstPointRef,
    /// Neighborhood-amplitude weighted mean of slopes to the last point.
    #[serde(alias = "weighted-last-ref")]
    WeightedLastPointRef,
}

/// Slope strategy plus the knobs it needs, fixed at configuration time.
#[derive(Clone, Copy, Debug)]
pub struct SlopeEstimator {
    pub method: SlopeMethod,
    /// Slope reported by lines with fewer than two points (Hz/s).
    pub initial_slope: f64,
    /// Number of most recent points considered by the weighted methods.
    pub n_slope_points: usize,
}

impl SlopeEstimator {
    pub fn new(method: SlopeMethod, initial_slope: f64, n_slope_points: usize) -> Self {
        Self {
            method,
            initial_slope,
            n_slope_points,
        }
    }

    /// Slope of `line` under the configured method.
    pub fn estimate(&self, line: &LineRef) -> f64 {
        if line.point_count() <= 1 {
            return self.initial_slope;
        }
        match self.method {
            SlopeMethod::Unweighted => line
                .accumulator()
                .regression_slope()
                .unwrap_or(self.initial_slope),
            SlopeMethod::WeightedFirstPointRef => {
                self.weighted(line, line.start_time_in_acq(), line.start_frequency())
            }
            SlopeMethod::WeightedLastPointRef => {
                self.weighted(line, line.end_time_in_acq(), line.end_frequency())
            }
        }
    }

    /// Re-estimate and store the slope of `line`.
    pub fn update(&self, line: &mut LineRef) {
        let slope = self.estimate(line);
        line.set_slope(slope);
    }

    fn weighted(&self, line: &LineRef, ref_time: f64, ref_frequency: f64) -> f64 {
        let points = line.points();
        let window = self.n_slope_points.max(1).min(points.len());
        let recent = &points[points.len() - window..];

        let mut weighted = 0.0;
        let mut weight_sum = 0.0;
        let mut plain = 0.0;
        let mut eligible = 0usize;
        for p in recent {
            let dt = p.time_in_acq - ref_time;
            if p.frequency == ref_frequency || dt == 0.0 {
                continue;
            }
            let s = (p.frequency - ref_frequency) / dt;
            let w = p.neighborhood_amplitude;
            if w > 0.0 {
                weighted += s * w;
                weight_sum += w;
            }
            plain += s;
            eligible += 1;
        }

        if eligible == 0 {
            0.0
        } else if weight_sum > 0.0 {
            weighted / weight_sum
        } else {
            plain / eligible as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    fn point(t: f64, f: f64, w: f64) -> Point {
        Point {
            bin_in_slice: 0,
            frequency: f,
            time_in_acq: t,
            time_in_run: t,
            amplitude: 10.0,
            mean: 1.0,
            variance: 1.0,
            neighborhood_amplitude: w,
            acquisition_id: 0,
            component: 0,
        }
    }

    fn sweep(method: SlopeMethod, slope: f64, n: usize) -> (SlopeEstimator, LineRef) {
        let est = SlopeEstimator::new(method, 3.0e8, 10);
        let mut line = LineRef::new(point(0.0, 1.0e6, 5.0), est.initial_slope);
        for i in 1..n {
            let t = i as f64 * 1.0e-4;
            line.push(point(t, 1.0e6 + slope * t, 5.0));
            est.update(&mut line);
        }
        (est, line)
    }

    #[test]
    fn single_point_reports_initial_slope_for_every_method() {
        for method in [
            SlopeMethod::Unweighted,
            SlopeMethod::WeightedFirstPointRef,
            SlopeMethod::WeightedLastPointRef,
        ] {
            let est = SlopeEstimator::new(method, 3.0e8, 10);
            let line = LineRef::new(point(0.0, 1.0e6, 5.0), 0.0);
            assert_eq!(est.estimate(&line), 3.0e8, "{method:?}");
        }
    }

    #[test]
    fn every_method_recovers_a_straight_sweep() {
        for method in [
            SlopeMethod::Unweighted,
            SlopeMethod::WeightedFirstPointRef,
            SlopeMethod::WeightedLastPointRef,
        ] {
            let (_, line) = sweep(method, 1.0e8, 25);
            let rel = (line.slope() - 1.0e8).abs() / 1.0e8;
            assert!(rel < 1e-6, "{method:?} slope {}", line.slope());
        }
    }

    #[test]
    fn weighted_slope_is_zero_when_all_points_sit_at_reference() {
        let est = SlopeEstimator::new(SlopeMethod::WeightedFirstPointRef, 3.0e8, 10);
        let mut line = LineRef::new(point(0.0, 1.0e6, 5.0), 3.0e8);
        line.push(point(1.0e-4, 1.0e6, 5.0));
        line.push(point(2.0e-4, 1.0e6, 5.0));
        assert_eq!(est.estimate(&line), 0.0);
    }

    #[test]
    fn weighted_slope_favours_strong_points() {
        let est = SlopeEstimator::new(SlopeMethod::WeightedFirstPointRef, 0.0, 10);
        let mut line = LineRef::new(point(0.0, 0.0, 1.0), 0.0);
        line.push(point(1.0, 10.0, 3.0));
        line.push(point(1.0, 20.0, 1.0));
        // (10 * 3 + 20 * 1) / 4
        assert_eq!(est.estimate(&line), 12.5);
    }

    #[test]
    fn slope_method_parses_from_kebab_case_and_aliases() {
        let m: SlopeMethod = serde_json::from_str("\"weighted-last-ref\"").unwrap();
        assert_eq!(m, SlopeMethod::WeightedLastPointRef);
        let m: SlopeMethod = serde_json::from_str("\"weighted-first-point-ref\"").unwrap();
        assert_eq!(m, SlopeMethod::WeightedFirstPointRef);
        assert!(serde_json::from_str::<SlopeMethod>("\"bogus\"").is_err());
    }
}
