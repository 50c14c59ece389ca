//! Line candidates under construction.
//!
//! A [`LineRef`] grows one point per matching slice while it sits in the
//! [`LineRegistry`]. After every insertion the [`SlopeEstimator`] refreshes
//! its slope, which in turn drives the frequency prediction used to match
//! the next slice. Once a line expires (or the acquisition ends) it is
//! removed from the registry and handed to [`finalize_line`], which trims
//! weak boundary points and validates what is left.
//!
//! Modules
//! - `accumulator` – running regression and statistic sums.
//! - `line` – the `LineRef` type.
//! - `slope` – slope strategies.
//! - `registry` – arena of active lines ordered by start time.
//! - `finalize` – trimming and acceptance.

mod accumulator;
mod finalize;
mod line;
mod registry;
mod slope;

pub use finalize::{finalize_line, DiscardReason, FinalizeCriteria, Finalized};
pub use line::LineRef;
pub use registry::{LineId, LineRegistry};
pub use slope::{SlopeEstimator, SlopeMethod};
