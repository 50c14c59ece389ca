//! Serializable run diagnostics.
//!
//! The finder, merge engine and cut set each keep a small counter struct;
//! [`PipelineReport`] bundles them with a per-stage timing breakdown.

pub mod report;
pub mod stages;
pub mod timing;

pub use report::PipelineReport;
pub use stages::{CutReport, FinderStats, MergeReport};
pub use timing::{StageTiming, TimingBreakdown};
