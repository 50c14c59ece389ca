use super::options::FinderOptions;
use super::sink::CandidateSink;
use crate::candidate::{Candidate, CandidateId};
use crate::diagnostics::FinderStats;
use crate::error::Result;
use crate::lines::{
    finalize_line, FinalizeCriteria, Finalized, LineRef, LineRegistry, SlopeEstimator,
};
use crate::spectrum::{refine_point, Spectrum};
use crate::types::{InputPoint, Point, SliceHeader};
use log::{debug, info, warn};
use std::cmp::Ordering;

/// Streaming line-association engine.
///
/// Feed slices in time order through [`process_slice`](Self::process_slice);
/// finalized candidates are delivered to the sink as soon as their line
/// expires. Call [`end_acquisition`](Self::end_acquisition) after the last
/// slice (a slice flagged `is_new_acquisition` does the same implicitly).
#[derive(Debug)]
pub struct SequentialTrackFinder {
    options: FinderOptions,
    slope: SlopeEstimator,
    criteria: FinalizeCriteria,
    registry: LineRegistry,
    next_id: u64,
    stats: FinderStats,
}

impl SequentialTrackFinder {
    pub fn new(options: FinderOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            slope: options.slope_estimator(),
            criteria: options.finalize_criteria(),
            options,
            registry: LineRegistry::new(),
            next_id: 0,
            stats: FinderStats::default(),
        })
    }

    pub fn options(&self) -> &FinderOptions {
        &self.options
    }

    pub fn stats(&self) -> &FinderStats {
        &self.stats
    }

    /// Lines still waiting for more points.
    pub fn active_lines(&self) -> &LineRegistry {
        &self.registry
    }

    /// Ingest one slice. With a spectrum every point is refined against it
    /// (and the spectrum is consumed as a mask); without one the points are
    /// only filtered by the configured band.
    pub fn process_slice<S: CandidateSink + ?Sized>(
        &mut self,
        header: &SliceHeader,
        inputs: &[InputPoint],
        spectrum: Option<&mut Spectrum>,
        sink: &mut S,
    ) {
        if header.is_new_acquisition {
            self.end_acquisition(sink);
        }
        self.stats.slices += 1;
        self.stats.points_seen += inputs.len();

        let mut points: Vec<Point> = inputs
            .iter()
            .map(|input| Point::from_input(input, header))
            .collect();
        points.sort_by(|a, b| match b.amplitude.total_cmp(&a.amplitude) {
            Ordering::Equal => a.bin_in_slice.cmp(&b.bin_in_slice),
            other => other,
        });

        let survivors = match spectrum {
            Some(spectrum) => self.refine_all(points, spectrum),
            None => self.filter_band(points),
        };

        for point in survivors {
            self.associate(point, sink);
        }
        self.registry.compact();
    }

    /// Close every remaining line of the current acquisition.
    pub fn end_acquisition<S: CandidateSink + ?Sized>(&mut self, sink: &mut S) {
        let lines = self.registry.drain_all();
        if lines.is_empty() {
            return;
        }
        info!(
            "SequentialTrackFinder::end_acquisition flushing {} lines",
            lines.len()
        );
        self.stats.acquisitions_flushed += 1;
        for line in lines {
            self.close_line(line, sink);
        }
    }

    fn refine_all(&mut self, points: Vec<Point>, spectrum: &mut Spectrum) -> Vec<Point> {
        if !(spectrum.bin_width > 0.0) {
            warn!(
                "SequentialTrackFinder::process_slice non-positive bin width {}",
                spectrum.bin_width
            );
        }
        let range = self.options.refine.bin_range(spectrum);
        let mut survivors = Vec::with_capacity(points.len());
        for mut point in points {
            if point.is_spent() {
                self.stats.invalid_points += 1;
                continue;
            }
            if refine_point(&mut point, spectrum, range, &self.options.refine).is_refined() {
                survivors.push(point);
            } else {
                self.stats.invalid_points += 1;
            }
        }
        survivors
    }

    fn filter_band(&mut self, points: Vec<Point>) -> Vec<Point> {
        let refine = &self.options.refine;
        let before = points.len();
        let survivors: Vec<Point> = points
            .into_iter()
            .filter(|p| !p.is_spent() && refine.accepts(p.bin_in_slice, p.frequency))
            .collect();
        self.stats.invalid_points += before - survivors.len();
        survivors
    }

    fn associate<S: CandidateSink + ?Sized>(&mut self, point: Point, sink: &mut S) {
        let tolerance = self.options.time_gap_tolerance;
        let multi = self.options.allow_multi_match;
        let mut matched = false;

        let mut pos = 0;
        while let Some(id) = self.registry.id_at(pos) {
            pos += 1;
            let (expired, matches) = match self.registry.get(id) {
                Some(line) => (
                    line.end_time_in_run() < point.time_in_run - tolerance,
                    self.matches(line, &point),
                ),
                None => continue,
            };

            if expired {
                if let Some(line) = self.registry.remove(id) {
                    debug!(
                        "SequentialTrackFinder::associate line {:?} expired at t={:.6}",
                        id, point.time_in_run
                    );
                    self.close_line(line, sink);
                }
                continue;
            }
            if matched && !multi {
                continue;
            }
            if matches {
                if let Some(line) = self.registry.get_mut(id) {
                    line.push(point);
                    self.slope.update(line);
                    matched = true;
                }
            }
        }

        if !matched {
            let id = self
                .registry
                .insert(LineRef::new(point, self.options.initial_slope));
            self.stats.lines_created += 1;
            debug!(
                "SequentialTrackFinder::associate new line {:?} f={:.1} t={:.6}",
                id, point.frequency, point.time_in_run
            );
        }
    }

    fn matches(&self, line: &LineRef, point: &Point) -> bool {
        if line.component() != point.component || line.acquisition_id() != point.acquisition_id {
            return false;
        }
        if !(point.time_in_acq > line.end_time_in_acq()) {
            return false;
        }
        let acceptance = if line.point_count() == 1 {
            self.options.initial_acceptance()
        } else {
            self.options.frequency_acceptance
        };
        let predicted = line.predicted_frequency(point.time_in_acq);
        (point.frequency - predicted).abs() < acceptance
    }

    fn close_line<S: CandidateSink + ?Sized>(&mut self, line: LineRef, sink: &mut S) {
        match finalize_line(line, &self.criteria, &self.slope) {
            Finalized::Accepted(line) => {
                let id = CandidateId(self.next_id);
                self.next_id += 1;
                let candidate = Candidate::from_line(id, line, self.options.fit_assigned_error);
                debug!(
                    "SequentialTrackFinder::close_line candidate {} points={} slope={:.3e}",
                    id.0,
                    candidate.point_count(),
                    candidate.slope
                );
                self.stats.candidates_emitted += 1;
                sink.deliver(candidate);
            }
            Finalized::Discarded(reason) => {
                debug!("SequentialTrackFinder::close_line discarded: {reason:?}");
                self.stats.lines_discarded += 1;
            }
        }
    }
}
