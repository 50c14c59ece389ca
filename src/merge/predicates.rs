use super::options::{MergeMode, MergeOptions};
use crate::candidate::Candidate;

/// True if `a` and `b` should be fused under `options`. Symmetric in its
/// candidate arguments.
pub fn should_merge(a: &Candidate, b: &Candidate, options: &MergeOptions) -> bool {
    if a.component != b.component || a.acquisition_id != b.acquisition_id {
        return false;
    }
    match options.mode {
        MergeMode::Extrapolation => extrapolation_match(a, b, options),
        MergeMode::Overlap => overlap_match(a, b, options),
    }
}

/// The earlier candidate (by start, then id) ends before the later one
/// starts, within the gap tolerance, and both extrapolations land within
/// the frequency acceptance of the other's boundary. The two trajectories
/// must also lie within `max_track_width` of each other at the middle of
/// the gap.
pub fn extrapolation_match(a: &Candidate, b: &Candidate, options: &MergeOptions) -> bool {
    let (early, late) = chronological(a, b);
    let gap = late.start_time_in_run - early.end_time_in_run;
    if !(gap >= 0.0 && gap <= options.time_gap_tolerance) {
        return false;
    }

    let dt = late.start_time_in_acq - early.end_time_in_acq;
    let forward = early.end_frequency + early.slope * dt;
    let backward = late.start_frequency - late.slope * dt;
    let separation = ((early.end_frequency + 0.5 * early.slope * dt)
        - (late.start_frequency - 0.5 * late.slope * dt))
        .abs();
    (forward - late.start_frequency).abs() <= options.frequency_acceptance
        && (backward - early.end_frequency).abs() <= options.frequency_acceptance
        && separation <= options.max_track_width
}

/// Time ranges intersect and the candidates either stay within
/// `max_track_width` of each other at both ends of the overlap or swap
/// sides inside it.
pub fn overlap_match(a: &Candidate, b: &Candidate, options: &MergeOptions) -> bool {
    let from = a.start_time_in_acq.max(b.start_time_in_acq);
    let to = a.end_time_in_acq.min(b.end_time_in_acq);
    if !(from <= to) {
        return false;
    }

    let d_from = a.frequency_at(from) - b.frequency_at(from);
    let d_to = a.frequency_at(to) - b.frequency_at(to);
    let width = options.max_track_width;
    let side_by_side = d_from.abs() <= width && d_to.abs() <= width;
    let crossing = d_from * d_to < 0.0;
    side_by_side || crossing
}

fn chronological<'a>(a: &'a Candidate, b: &'a Candidate) -> (&'a Candidate, &'a Candidate) {
    let a_first = a.start_time_in_run < b.start_time_in_run
        || (a.start_time_in_run == b.start_time_in_run && a.id <= b.id);
    if a_first {
        (a, b)
    } else {
        (b, a)
    }
}
