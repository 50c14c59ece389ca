use super::line::LineRef;
use super::slope::SlopeEstimator;
use crate::types::Statistic;
use log::debug;

/// Acceptance criteria applied when a line leaves the registry.
#[derive(Clone, Copy, Debug)]
pub struct FinalizeCriteria {
    pub min_points: usize,
    pub min_slope: f64,
    /// Boundary points with a per-point SNR below this are trimmed.
    pub trimming_threshold: f64,
    pub trimming_statistic: Statistic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscardReason {
    TooFewPoints,
    SlopeBelowMinimum,
}

#[derive(Debug)]
pub enum Finalized {
    Accepted(LineRef),
    Discarded(DiscardReason),
}

/// Trim weak boundary points, recompute the line and validate it.
pub fn finalize_line(
    mut line: LineRef,
    criteria: &FinalizeCriteria,
    slope: &SlopeEstimator,
) -> Finalized {
    let before = line.point_count();
    let (lo, hi) = trim_bounds(&line, criteria);
    if lo > 0 || hi < before {
        let kept = line.points()[lo..hi].to_vec();
        line.rebuild(kept);
        debug!(
            "finalize_line trimmed {} -> {} points",
            before,
            line.point_count()
        );
    }
    slope.update(&mut line);

    if line.point_count() < criteria.min_points {
        return Finalized::Discarded(DiscardReason::TooFewPoints);
    }
    if !(line.slope() >= criteria.min_slope) {
        return Finalized::Discarded(DiscardReason::SlopeBelowMinimum);
    }
    Finalized::Accepted(line)
}

/// Half-open index range of the points that survive trimming.
fn trim_bounds(line: &LineRef, criteria: &FinalizeCriteria) -> (usize, usize) {
    let points = line.points();
    let floor = criteria.min_points.max(1);
    let threshold = criteria.trimming_threshold;
    let snr = |i: usize| points[i].snr_of(criteria.trimming_statistic);

    let mut lo = 0;
    let mut hi = points.len();
    while hi - lo > floor {
        if snr(lo) < threshold {
            lo += 1;
        } else if snr(hi - 1) < threshold {
            hi -= 1;
        } else {
            break;
        }
    }
    (lo, hi)
}
