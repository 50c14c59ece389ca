use serde::Serialize;
use std::collections::BTreeMap;

/// Counters maintained by the sequential finder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinderStats {
    pub slices: usize,
    pub points_seen: usize,
    /// Points dropped before association (out of band, masked, no power).
    pub invalid_points: usize,
    pub lines_created: usize,
    pub candidates_emitted: usize,
    pub lines_discarded: usize,
    pub acquisitions_flushed: usize,
}

/// Outcome of one merge run.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeReport {
    pub input: usize,
    pub output: usize,
    pub merges: usize,
    pub passes: usize,
    pub elapsed_ms: f64,
}

impl MergeReport {
    /// Fold another run's counts into this one.
    pub fn absorb(&mut self, other: &MergeReport) {
        self.input += other.input;
        self.output += other.output;
        self.merges += other.merges;
        self.passes += other.passes;
        self.elapsed_ms += other.elapsed_ms;
    }
}

/// Rejection tallies of the quality cuts.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CutReport {
    pub evaluated: usize,
    pub survivors: usize,
    /// Candidates rejected per cut; one candidate may count for several cuts.
    pub rejected_by: BTreeMap<String, usize>,
}

impl CutReport {
    pub fn record_rejection(&mut self, cut: &str) {
        *self.rejected_by.entry(cut.to_string()).or_default() += 1;
    }

    pub fn rejected(&self, cut: &str) -> usize {
        self.rejected_by.get(cut).copied().unwrap_or(0)
    }
}
