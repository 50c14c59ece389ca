//! Finalized track candidates.
//!
//! A [`Candidate`] is what a line becomes once it has passed trimming and
//! validation. It owns the line's points and carries the derived track
//! quantities used downstream by the merge engine and the quality cuts.

pub mod fit;

pub use fit::{fit_points, LineFit};

use crate::lines::LineRef;
use crate::types::{Point, Statistic};
use serde::{Deserialize, Serialize};

/// Monotonic candidate identifier, unique within one pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub u64);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub acquisition_id: u64,
    pub component: u32,
    pub start_time_in_run: f64,
    pub end_time_in_run: f64,
    pub start_time_in_acq: f64,
    pub end_time_in_acq: f64,
    pub start_frequency: f64,
    pub end_frequency: f64,
    /// Frequency drift (Hz/s).
    pub slope: f64,
    /// Frequency at `time_in_acq == 0` along the slope.
    pub intercept: f64,
    pub time_length: f64,
    pub frequency_width: f64,
    pub amplitude_sum: f64,
    pub snr_sum: f64,
    pub wide_snr_sum: f64,
    pub nup_sum: f64,
    pub wide_nup_sum: f64,
    pub slope_sigma: f64,
    pub intercept_sigma: f64,
    pub start_frequency_sigma: f64,
    pub end_frequency_sigma: f64,
    pub points: Vec<Point>,
}

impl Candidate {
    /// Build a candidate from an accepted line, attaching fit uncertainties.
    pub fn from_line(id: CandidateId, line: LineRef, assigned_error: f64) -> Self {
        let mut candidate = Self {
            id,
            acquisition_id: line.acquisition_id(),
            component: line.component(),
            start_time_in_run: line.start_time_in_run(),
            end_time_in_run: line.end_time_in_run(),
            start_time_in_acq: line.start_time_in_acq(),
            end_time_in_acq: line.end_time_in_acq(),
            start_frequency: line.start_frequency(),
            end_frequency: line.end_frequency(),
            slope: line.slope(),
            intercept: 0.0,
            time_length: 0.0,
            frequency_width: 0.0,
            amplitude_sum: line.amplitude_sum(),
            snr_sum: line.snr_sum(Statistic::Narrow),
            wide_snr_sum: line.snr_sum(Statistic::Wide),
            nup_sum: line.nup_sum(Statistic::Narrow),
            wide_nup_sum: line.nup_sum(Statistic::Wide),
            slope_sigma: 0.0,
            intercept_sigma: 0.0,
            start_frequency_sigma: 0.0,
            end_frequency_sigma: 0.0,
            points: line.into_points(),
        };
        candidate.refresh_derived();

        if let Some(fit) = fit_points(&candidate.points, assigned_error) {
            candidate.slope_sigma = fit.slope_sigma;
            candidate.intercept_sigma = fit.intercept_sigma;
            candidate.start_frequency_sigma = fit.frequency_sigma_at(candidate.start_time_in_acq);
            candidate.end_frequency_sigma = fit.frequency_sigma_at(candidate.end_time_in_acq);
        }
        candidate
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn snr_total(&self, statistic: Statistic) -> f64 {
        match statistic {
            Statistic::Narrow => self.snr_sum,
            Statistic::Wide => self.wide_snr_sum,
        }
    }

    pub fn nup_total(&self, statistic: Statistic) -> f64 {
        match statistic {
            Statistic::Narrow => self.nup_sum,
            Statistic::Wide => self.wide_nup_sum,
        }
    }

    /// Frequency along the candidate's slope at acquisition time `t_acq`.
    #[inline]
    pub fn frequency_at(&self, t_acq: f64) -> f64 {
        self.start_frequency + self.slope * (t_acq - self.start_time_in_acq)
    }

    /// Recompute length, width and intercept from bounds and slope.
    pub fn refresh_derived(&mut self) {
        self.time_length = self.end_time_in_run - self.start_time_in_run;
        self.frequency_width = (self.end_frequency - self.start_frequency).abs();
        self.intercept = self.start_frequency - self.slope * self.start_time_in_acq;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(t: f64, f: f64) -> Point {
        Point {
            bin_in_slice: 0,
            frequency: f,
            time_in_acq: t,
            time_in_run: 100.0 + t,
            amplitude: 8.0,
            mean: 2.0,
            variance: 4.0,
            neighborhood_amplitude: 12.0,
            acquisition_id: 7,
            component: 2,
        }
    }

    #[test]
    fn candidate_carries_line_aggregates() {
        let mut line = LineRef::new(point(1.0e-3, 1.0e6), 1.0e8);
        line.push(point(2.0e-3, 1.1e6));
        line.push(point(3.0e-3, 1.2e6));
        let c = Candidate::from_line(CandidateId(4), line, 0.0);

        assert_eq!(c.id, CandidateId(4));
        assert_eq!(c.point_count(), 3);
        assert_eq!(c.acquisition_id, 7);
        assert_eq!(c.component, 2);
        assert_eq!(c.snr_total(Statistic::Narrow), 12.0);
        assert_eq!(c.snr_total(Statistic::Wide), 18.0);
        assert_eq!(c.nup_total(Statistic::Narrow), 9.0);
        assert_eq!(c.amplitude_sum, 24.0);
        assert!((c.time_length - 2.0e-3).abs() < 1e-12);
        assert!((c.frequency_width - 2.0e5).abs() < 1e-6);
        assert!((c.intercept - 9.0e5).abs() < 1e-6);
        assert!((c.frequency_at(2.0e-3) - 1.1e6).abs() < 1e-6);
    }

    #[test]
    fn candidate_serializes_in_camel_case() {
        let line = LineRef::new(point(0.0, 1.0e6), 0.0);
        let c = Candidate::from_line(CandidateId(1), line, 0.0);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["id"], 1);
        assert!(json.get("startTimeInRun").is_some());
        assert!(json["points"][0].get("binInSlice").is_some());
    }
}
