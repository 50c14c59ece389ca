//! Post-hoc fusion of fragmented candidates.
//!
//! The finder closes a line as soon as it misses `time_gap_tolerance`, so a
//! single track interrupted by a short fade comes out as several
//! candidates; multi-matching can also leave parallel duplicates. The
//! [`MergeEngine`] collects one acquisition's candidates and fuses pairs
//! until none match.
//!
//! Modules
//! - `options` – merge mode and geometric tolerances.
//! - `predicates` – extrapolation and overlap/crossing matches.
//! - `combine` – symmetric pairwise merge.
//! - `engine` – deterministic fixed-point driver.

mod combine;
mod engine;
mod options;
mod predicates;

pub use combine::merge_pair;
pub use engine::MergeEngine;
pub use options::{MergeMode, MergeOptions};
pub use predicates::{extrapolation_match, overlap_match, should_merge};
