use super::combine::merge_pair;
use super::options::MergeOptions;
use super::predicates::should_merge;
use crate::candidate::Candidate;
use crate::diagnostics::MergeReport;
use log::{debug, info};
use std::time::Instant;

/// Greedy fixed-point merger over one batch of candidates.
#[derive(Clone, Debug)]
pub struct MergeEngine {
    options: MergeOptions,
}

impl MergeEngine {
    pub fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Merge until no pair matches. Pairs are scanned in ascending id order;
    /// the first match found is fused into the lower index and the scan
    /// restarts.
    pub fn run(&self, mut candidates: Vec<Candidate>) -> (Vec<Candidate>, MergeReport) {
        let start = Instant::now();
        let mut report = MergeReport {
            input: candidates.len(),
            ..Default::default()
        };
        if !self.options.enabled {
            report.output = candidates.len();
            return (candidates, report);
        }

        candidates.sort_by_key(|c| c.id);
        loop {
            report.passes += 1;
            let Some((i, j)) = self.find_pair(&candidates) else {
                break;
            };
            debug!(
                "MergeEngine::run merging {} and {}",
                candidates[i].id.0, candidates[j].id.0
            );
            let merged = merge_pair(&candidates[i], &candidates[j]);
            candidates[i] = merged;
            candidates.remove(j);
            report.merges += 1;
        }

        report.output = candidates.len();
        report.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        info!(
            "MergeEngine::run {} -> {} candidates in {} passes",
            report.input, report.output, report.passes
        );
        (candidates, report)
    }

    fn find_pair(&self, candidates: &[Candidate]) -> Option<(usize, usize)> {
        for i in 0..candidates.len() {
            for j in (i + 1)..candidates.len() {
                if should_merge(&candidates[i], &candidates[j], &self.options) {
                    return Some((i, j));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::CandidateId;
    use crate::lines::LineRef;
    use crate::merge::MergeMode;
    use crate::types::Point;

    fn sweep(id: u64, t0: f64, n: usize, f0: f64, slope: f64) -> Candidate {
        let point = |t: f64| Point {
            bin_in_slice: 0,
            frequency: f0 + slope * (t - t0),
            time_in_acq: t,
            time_in_run: t,
            amplitude: 10.0,
            mean: 1.0,
            variance: 1.0,
            neighborhood_amplitude: 10.0,
            acquisition_id: 0,
            component: 0,
        };
        let mut line = LineRef::new(point(t0), slope);
        for i in 1..n {
            line.push(point(t0 + i as f64 * 1.0e-4));
        }
        Candidate::from_line(CandidateId(id), line, 0.0)
    }

    #[test]
    fn chain_of_fragments_collapses_to_one() {
        let slope = 1.0e8;
        let a = sweep(0, 0.0, 10, 1.0e6, slope);
        let b = sweep(1, 2.0e-3, 10, 1.0e6 + slope * 2.0e-3, slope);
        let c = sweep(2, 4.0e-3, 10, 1.0e6 + slope * 4.0e-3, slope);
        let stray = sweep(3, 1.0e-3, 10, 9.0e6, slope);

        let engine = MergeEngine::new(MergeOptions::default());
        let (out, report) = engine.run(vec![c, stray, b, a]);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, CandidateId(0));
        assert_eq!(out[0].point_count(), 30);
        assert_eq!(out[1].id, CandidateId(3));
        assert_eq!(report.merges, 2);
        assert_eq!(report.passes, 3);
        assert_eq!(report.input, 4);
        assert_eq!(report.output, 2);
    }

    #[test]
    fn disabled_engine_passes_batch_through() {
        let a = sweep(0, 0.0, 10, 1.0e6, 1.0e8);
        let b = sweep(1, 1.0e-3, 10, 1.1e6, 1.0e8);
        let engine = MergeEngine::new(MergeOptions {
            enabled: false,
            ..Default::default()
        });
        let (out, report) = engine.run(vec![a, b]);
        assert_eq!(out.len(), 2);
        assert_eq!(report.merges, 0);
    }

    #[test]
    fn overlap_mode_fuses_parallel_duplicates() {
        let a = sweep(0, 0.0, 20, 1.0e6, 1.0e8);
        let b = sweep(1, 5.0e-4, 10, 1.05e6 + 2.0e4, 1.0e8);
        let engine = MergeEngine::new(MergeOptions {
            mode: MergeMode::Overlap,
            ..Default::default()
        });
        let (out, _) = engine.run(vec![b, a]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, CandidateId(0));
        assert_eq!(out[0].point_count(), 30);
    }
}
