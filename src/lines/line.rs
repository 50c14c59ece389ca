use super::accumulator::LineAccumulator;
use crate::types::{Point, Statistic};

/// In-progress line: time-ordered points plus running aggregates.
///
/// Start bounds come from the first point, end bounds from the last one.
/// Points are appended in slice order, so `end_time_in_run` never decreases.
#[derive(Clone, Debug)]
pub struct LineRef {
    points: Vec<Point>,
    start_time_in_run: f64,
    end_time_in_run: f64,
    start_time_in_acq: f64,
    end_time_in_acq: f64,
    start_frequency: f64,
    end_frequency: f64,
    slope: f64,
    acquisition_id: u64,
    component: u32,
    acc: LineAccumulator,
}

impl LineRef {
    /// Seed a line with its first point.
    pub fn new(point: Point, initial_slope: f64) -> Self {
        let mut line = Self {
            points: Vec::with_capacity(16),
            start_time_in_run: point.time_in_run,
            end_time_in_run: point.time_in_run,
            start_time_in_acq: point.time_in_acq,
            end_time_in_acq: point.time_in_acq,
            start_frequency: point.frequency,
            end_frequency: point.frequency,
            slope: initial_slope,
            acquisition_id: point.acquisition_id,
            component: point.component,
            acc: LineAccumulator::default(),
        };
        line.push(point);
        line
    }

    /// Append a point and refresh bounds and sums. The slope is left to the
    /// caller's estimator.
    pub fn push(&mut self, point: Point) {
        if self.points.is_empty() {
            self.start_time_in_run = point.time_in_run;
            self.start_time_in_acq = point.time_in_acq;
            self.start_frequency = point.frequency;
        }
        self.end_time_in_run = point.time_in_run;
        self.end_time_in_acq = point.time_in_acq;
        self.end_frequency = point.frequency;
        self.acc.push(&point);
        self.points.push(point);
    }

    /// Replace the point list, recomputing bounds and sums from scratch.
    pub(crate) fn rebuild(&mut self, points: Vec<Point>) {
        self.acc.reset();
        self.points = Vec::with_capacity(points.len());
        for p in points {
            self.push(p);
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub(crate) fn into_points(self) -> Vec<Point> {
        self.points
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn start_time_in_run(&self) -> f64 {
        self.start_time_in_run
    }

    pub fn end_time_in_run(&self) -> f64 {
        self.end_time_in_run
    }

    pub fn start_time_in_acq(&self) -> f64 {
        self.start_time_in_acq
    }

    pub fn end_time_in_acq(&self) -> f64 {
        self.end_time_in_acq
    }

    pub fn start_frequency(&self) -> f64 {
        self.start_frequency
    }

    pub fn end_frequency(&self) -> f64 {
        self.end_frequency
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub(crate) fn set_slope(&mut self, slope: f64) {
        self.slope = slope;
    }

    pub fn acquisition_id(&self) -> u64 {
        self.acquisition_id
    }

    pub fn component(&self) -> u32 {
        self.component
    }

    pub fn amplitude_sum(&self) -> f64 {
        self.acc.amplitude_sum
    }

    pub fn snr_sum(&self, statistic: Statistic) -> f64 {
        match statistic {
            Statistic::Narrow => self.acc.snr_sum,
            Statistic::Wide => self.acc.wide_snr_sum,
        }
    }

    pub fn nup_sum(&self, statistic: Statistic) -> f64 {
        match statistic {
            Statistic::Narrow => self.acc.nup_sum,
            Statistic::Wide => self.acc.wide_nup_sum,
        }
    }

    pub(crate) fn accumulator(&self) -> &LineAccumulator {
        &self.acc
    }

    /// Frequency expected at `time_in_acq` when extrapolating from the last point.
    #[inline]
    pub fn predicted_frequency(&self, time_in_acq: f64) -> f64 {
        self.end_frequency + self.slope * (time_in_acq - self.end_time_in_acq)
    }
}
