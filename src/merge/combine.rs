use crate::candidate::Candidate;
use std::cmp::Ordering;

/// Fuse two candidates into one carrying the lower id.
///
/// The result does not depend on argument order: boundaries come from
/// whichever side starts earliest / ends latest (the lower id on ties),
/// aggregates are summed, uncertainties are added in quadrature and the
/// slope is re-derived from the new boundaries.
pub fn merge_pair(a: &Candidate, b: &Candidate) -> Candidate {
    let (lo, hi) = if a.id <= b.id { (a, b) } else { (b, a) };

    let first = if hi.start_time_in_run < lo.start_time_in_run {
        hi
    } else {
        lo
    };
    let last = if hi.end_time_in_run > lo.end_time_in_run {
        hi
    } else {
        lo
    };

    let mut merged = Candidate {
        id: lo.id,
        acquisition_id: lo.acquisition_id,
        component: lo.component,
        start_time_in_run: first.start_time_in_run,
        start_time_in_acq: first.start_time_in_acq,
        start_frequency: first.start_frequency,
        start_frequency_sigma: first.start_frequency_sigma,
        end_time_in_run: last.end_time_in_run,
        end_time_in_acq: last.end_time_in_acq,
        end_frequency: last.end_frequency,
        end_frequency_sigma: last.end_frequency_sigma,
        slope: lo.slope,
        intercept: 0.0,
        time_length: 0.0,
        frequency_width: 0.0,
        amplitude_sum: lo.amplitude_sum + hi.amplitude_sum,
        snr_sum: lo.snr_sum + hi.snr_sum,
        wide_snr_sum: lo.wide_snr_sum + hi.wide_snr_sum,
        nup_sum: lo.nup_sum + hi.nup_sum,
        wide_nup_sum: lo.wide_nup_sum + hi.wide_nup_sum,
        slope_sigma: lo.slope_sigma.hypot(hi.slope_sigma),
        intercept_sigma: lo.intercept_sigma.hypot(hi.intercept_sigma),
        points: union_points(lo, hi),
    };

    let dt = merged.end_time_in_acq - merged.start_time_in_acq;
    if dt > 0.0 {
        merged.slope = (merged.end_frequency - merged.start_frequency) / dt;
    }
    merged.refresh_derived();
    merged
}

fn union_points(lo: &Candidate, hi: &Candidate) -> Vec<crate::types::Point> {
    let mut points = Vec::with_capacity(lo.points.len() + hi.points.len());
    points.extend_from_slice(&lo.points);
    points.extend_from_slice(&hi.points);
    points.sort_by(|p, q| match p.time_in_run.total_cmp(&q.time_in_run) {
        Ordering::Equal => p.frequency.total_cmp(&q.frequency),
        other => other,
    });
    points.dedup();
    points
}
