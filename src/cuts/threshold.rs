use super::options::{AverageBy, DensityCutOptions, SumCutOptions};
use super::QualityCut;
use crate::candidate::Candidate;

/// Rate of `total` over the candidate's length or point count. A candidate
/// without time extent has an unbounded rate.
fn average(total: f64, candidate: &Candidate, by: AverageBy) -> f64 {
    match by {
        AverageBy::Time if candidate.time_length > 0.0 => total / candidate.time_length,
        AverageBy::Time => f64::INFINITY,
        AverageBy::Points => total / candidate.point_count().max(1) as f64,
    }
}

fn below_thresholds(total: f64, candidate: &Candidate, options: &SumCutOptions) -> bool {
    total < options.min_total || average(total, candidate, options.average_by) < options.min_average
}

/// Rejects candidates with too little summed SNR.
#[derive(Clone, Debug)]
pub struct SnrCut {
    pub options: SumCutOptions,
}

impl QualityCut for SnrCut {
    fn name(&self) -> &'static str {
        "snr"
    }

    fn is_cut(&self, candidate: &Candidate) -> bool {
        let total = candidate.snr_total(self.options.statistic);
        below_thresholds(total, candidate, &self.options)
    }
}

/// Rejects candidates with too little summed normalized residual power.
#[derive(Clone, Debug)]
pub struct NupCut {
    pub options: SumCutOptions,
}

impl QualityCut for NupCut {
    fn name(&self) -> &'static str {
        "nup"
    }

    fn is_cut(&self, candidate: &Candidate) -> bool {
        let total = candidate.nup_total(self.options.statistic);
        below_thresholds(total, candidate, &self.options)
    }
}

/// Rejects candidates with too little summed line power.
#[derive(Clone, Debug)]
pub struct PowerCut {
    pub options: SumCutOptions,
}

impl QualityCut for PowerCut {
    fn name(&self) -> &'static str {
        "power"
    }

    fn is_cut(&self, candidate: &Candidate) -> bool {
        below_thresholds(candidate.amplitude_sum, candidate, &self.options)
    }
}

/// Rejects sparse candidates: too few points per second.
#[derive(Clone, Debug)]
pub struct DensityCut {
    pub options: DensityCutOptions,
}

impl QualityCut for DensityCut {
    fn name(&self) -> &'static str {
        "density"
    }

    fn is_cut(&self, candidate: &Candidate) -> bool {
        let density = average(candidate.point_count() as f64, candidate, AverageBy::Time);
        density < self.options.min_density
    }
}
