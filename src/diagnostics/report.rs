use super::{CutReport, FinderStats, MergeReport, TimingBreakdown};
use serde::Serialize;

/// Summary of a pipeline run, written next to the tracks by the CLI.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub finder: FinderStats,
    pub merge: MergeReport,
    pub cuts: CutReport,
    /// Candidates handed to the sink.
    pub delivered: usize,
    pub timings: TimingBreakdown,
}
