#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod candidate;
pub mod config;
pub mod cuts;
pub mod diagnostics;
pub mod error;
pub mod finder;
pub mod io;
pub mod merge;
pub mod pipeline;
pub mod types;

// Building blocks of the finder; public for tools and tests.
pub mod lines;
pub mod spectrum;

// --- High-level re-exports -------------------------------------------------

pub use crate::candidate::{Candidate, CandidateId};
pub use crate::error::{Error, Result};
pub use crate::finder::{CandidateSink, FinderOptions, FnSink, SequentialTrackFinder};
pub use crate::pipeline::{PipelineParams, TrackPipeline};
pub use crate::types::{InputPoint, Point, SliceHeader, Statistic};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use track_finder::prelude::*;
///
/// # fn main() -> track_finder::Result<()> {
/// let mut pipeline = TrackPipeline::new(PipelineParams::default())?;
/// let mut tracks: Vec<Candidate> = Vec::new();
///
/// let header = SliceHeader {
///     slice_length: 1.0e-4,
///     is_new_acquisition: true,
///     ..Default::default()
/// };
/// let points = [InputPoint { bin: 10, frequency: 1.05e5, amplitude: 30.0, ..Default::default() }];
/// pipeline.process_slice(&header, &points, None, &mut tracks);
/// pipeline.end_acquisition(&mut tracks);
/// println!("tracks={}", tracks.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::spectrum::Spectrum;
    pub use crate::{
        Candidate, InputPoint, PipelineParams, SliceHeader, Statistic, TrackPipeline,
    };
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    // Stage runners.
    pub use crate::cuts::{CutSet, QualityCut};
    pub use crate::lines::{finalize_line, LineRegistry, SlopeEstimator};
    pub use crate::merge::{merge_pair, MergeEngine};
    pub use crate::spectrum::refine_point;

    // Structured diagnostics types.
    pub use crate::diagnostics::{
        CutReport, FinderStats, MergeReport, PipelineReport, StageTiming, TimingBreakdown,
    };
}
