//! End-to-end wiring: finder → per-acquisition merge → quality cuts → sink.

use crate::candidate::Candidate;
use crate::cuts::{CutOptions, CutSet};
use crate::diagnostics::PipelineReport;
use crate::error::Result;
use crate::finder::{CandidateSink, FinderOptions, SequentialTrackFinder};
use crate::merge::{MergeEngine, MergeOptions};
use crate::spectrum::Spectrum;
use crate::types::{InputPoint, SliceHeader};
use log::info;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Every tunable of a run, set once before streaming.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    pub finder: FinderOptions,
    pub merge: MergeOptions,
    pub cuts: CutOptions,
}

impl PipelineParams {
    pub fn validate(&self) -> Result<()> {
        self.finder.validate()?;
        self.merge.validate()?;
        self.cuts.validate()
    }
}

/// Streaming pipeline over one or more acquisitions.
///
/// Candidates emitted by the finder are held back until their acquisition
/// ends, then merged as one batch, cut and delivered. With merging disabled
/// they go through the cuts and out as soon as the finder emits them.
#[derive(Debug)]
pub struct TrackPipeline {
    finder: SequentialTrackFinder,
    merger: MergeEngine,
    cuts: CutSet,
    pending: Vec<Candidate>,
    report: PipelineReport,
}

impl TrackPipeline {
    pub fn new(params: PipelineParams) -> Result<Self> {
        params.validate()?;
        let cuts = CutSet::from_options(&params.cuts);
        Ok(Self {
            finder: SequentialTrackFinder::new(params.finder)?,
            merger: MergeEngine::new(params.merge),
            cuts,
            pending: Vec::new(),
            report: PipelineReport::default(),
        })
    }

    pub fn finder(&self) -> &SequentialTrackFinder {
        &self.finder
    }

    /// Add a custom cut after the configured ones.
    pub fn cuts_mut(&mut self) -> &mut CutSet {
        &mut self.cuts
    }

    pub fn process_slice<S: CandidateSink + ?Sized>(
        &mut self,
        header: &SliceHeader,
        points: &[InputPoint],
        spectrum: Option<&mut Spectrum>,
        sink: &mut S,
    ) {
        if header.is_new_acquisition {
            self.end_acquisition(sink);
        }
        let start = Instant::now();
        self.finder
            .process_slice(header, points, spectrum, &mut self.pending);
        self.report
            .timings
            .add("finder", start.elapsed().as_secs_f64() * 1000.0);

        if !self.merger.options().enabled && !self.pending.is_empty() {
            let batch = std::mem::take(&mut self.pending);
            self.cut_and_deliver(batch, sink);
        }
    }

    /// Flush the finder, merge the acquisition's candidates, cut, deliver.
    pub fn end_acquisition<S: CandidateSink + ?Sized>(&mut self, sink: &mut S) {
        let start = Instant::now();
        self.finder.end_acquisition(&mut self.pending);
        self.report
            .timings
            .add("finder", start.elapsed().as_secs_f64() * 1000.0);

        let batch = std::mem::take(&mut self.pending);
        if batch.is_empty() {
            return;
        }

        let start = Instant::now();
        let (merged, merge_report) = self.merger.run(batch);
        self.report.merge.absorb(&merge_report);
        self.report
            .timings
            .add("merge", start.elapsed().as_secs_f64() * 1000.0);

        self.cut_and_deliver(merged, sink);
    }

    /// Snapshot of the counters gathered so far.
    pub fn report(&self) -> PipelineReport {
        let mut report = self.report.clone();
        report.finder = self.finder.stats().clone();
        report
    }

    fn cut_and_deliver<S: CandidateSink + ?Sized>(&mut self, batch: Vec<Candidate>, sink: &mut S) {
        let start = Instant::now();
        let survivors = self.cuts.apply(batch, &mut self.report.cuts);
        self.report
            .timings
            .add("cuts", start.elapsed().as_secs_f64() * 1000.0);

        info!(
            "TrackPipeline delivering {} candidates",
            survivors.len()
        );
        self.report.delivered += survivors.len();
        for candidate in survivors {
            sink.deliver(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuts::SumCutOptions;

    fn header(i: usize) -> SliceHeader {
        SliceHeader {
            time_in_acq: i as f64 * 1.0e-4,
            time_in_run: i as f64 * 1.0e-4,
            slice_length: 1.0e-4,
            acquisition_id: 0,
            component: 0,
            is_new_acquisition: i == 0,
        }
    }

    fn on_track(i: usize) -> InputPoint {
        let t = (i as f64 + 0.5) * 1.0e-4;
        InputPoint {
            bin: i,
            frequency: 5.0e7 + 1.0e8 * t,
            amplitude: 20.0,
            mean: 1.0,
            variance: 1.0,
            neighborhood_amplitude: 20.0,
        }
    }

    fn params() -> PipelineParams {
        let mut params = PipelineParams::default();
        params.finder.initial_slope = 1.0e8;
        params
    }

    #[test]
    fn gap_fragments_are_merged_at_acquisition_end() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut pipeline = TrackPipeline::new(params()).unwrap();
        let mut out: Vec<Candidate> = Vec::new();
        for i in (0..10).chain(20..30) {
            pipeline.process_slice(&header(i), &[on_track(i)], None, &mut out);
        }
        assert!(out.is_empty(), "nothing leaves before the acquisition ends");
        pipeline.end_acquisition(&mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].point_count(), 20);
        let report = pipeline.report();
        assert_eq!(report.finder.candidates_emitted, 2);
        assert_eq!(report.merge.merges, 1);
        assert_eq!(report.delivered, 1);
        assert!(report.timings.stage_ms("merge").is_some());
    }

    #[test]
    fn disabled_merge_streams_candidates_through_cuts() {
        let mut p = params();
        p.merge.enabled = false;
        p.cuts.snr = SumCutOptions {
            enabled: true,
            min_total: 150.0,
            ..Default::default()
        };
        let mut pipeline = TrackPipeline::new(p).unwrap();
        let mut out: Vec<Candidate> = Vec::new();
        for i in (0..10).chain(20..30) {
            pipeline.process_slice(&header(i), &[on_track(i)], None, &mut out);
        }
        // The first fragment expired when the gap closed; 10 points * SNR 20.
        assert_eq!(out.len(), 1);
        pipeline.end_acquisition(&mut out);
        assert_eq!(out.len(), 2);

        let mut strict = params();
        strict.merge.enabled = false;
        strict.cuts.snr = SumCutOptions {
            enabled: true,
            min_total: 250.0,
            ..Default::default()
        };
        let mut pipeline = TrackPipeline::new(strict).unwrap();
        let mut out: Vec<Candidate> = Vec::new();
        for i in (0..10).chain(20..30) {
            pipeline.process_slice(&header(i), &[on_track(i)], None, &mut out);
        }
        pipeline.end_acquisition(&mut out);
        assert!(out.is_empty());
        assert_eq!(pipeline.report().cuts.rejected("snr"), 2);
    }

    #[test]
    fn invalid_params_fail_construction() {
        let mut p = params();
        p.merge.max_track_width = 0.0;
        assert!(TrackPipeline::new(p).is_err());
    }
}
