//! Sequential track finder.
//!
//! Points arrive slice by slice. Within a slice they are visited from the
//! strongest to the weakest; each one is optionally refined against the
//! slice spectrum and then compared with every active line in start-time
//! order. A line whose last point is older than `time_gap_tolerance` is
//! closed on the spot; a line whose extrapolated frequency lies within
//! `frequency_acceptance` of the point absorbs it. Points nobody claims seed
//! new lines.
//!
//! Modules
//! - `options` – association, slope and trimming parameters.
//! - `engine` – the `SequentialTrackFinder` state machine.
//! - `sink` – destinations for finalized candidates.

mod engine;
mod options;
mod sink;

pub use engine::SequentialTrackFinder;
pub use options::FinderOptions;
pub(crate) use options::{non_negative, positive};
pub use sink::{CandidateSink, FnSink};
