//! Quality cuts over finalized candidates.
//!
//! Each cut is a pure predicate over a candidate's aggregates. Cuts are
//! independent: a candidate survives a [`CutSet`] only if no cut in it
//! reports `is_cut`. Adding a cut can therefore only remove survivors.

mod options;
mod threshold;

pub use options::{AverageBy, CutOptions, DensityCutOptions, SumCutOptions};
pub use threshold::{DensityCut, NupCut, PowerCut, SnrCut};

use crate::candidate::Candidate;
use crate::diagnostics::CutReport;
use log::debug;
use serde::Serialize;

pub trait QualityCut {
    fn name(&self) -> &'static str;

    /// True when the candidate must be excluded.
    fn is_cut(&self, candidate: &Candidate) -> bool;

    fn evaluate(&self, candidate: &Candidate) -> CutResult {
        CutResult {
            name: self.name(),
            is_cut: self.is_cut(candidate),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CutResult {
    pub name: &'static str,
    pub is_cut: bool,
}

/// Ordered collection of cuts applied together.
#[derive(Default)]
pub struct CutSet {
    cuts: Vec<Box<dyn QualityCut>>,
}

impl CutSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the enabled cuts from configuration.
    pub fn from_options(options: &CutOptions) -> Self {
        let mut set = Self::new();
        if options.snr.enabled {
            set.push(SnrCut {
                options: options.snr.clone(),
            });
        }
        if options.nup.enabled {
            set.push(NupCut {
                options: options.nup.clone(),
            });
        }
        if options.power.enabled {
            set.push(PowerCut {
                options: options.power.clone(),
            });
        }
        if options.density.enabled {
            set.push(DensityCut {
                options: options.density.clone(),
            });
        }
        set
    }

    pub fn push(&mut self, cut: impl QualityCut + 'static) {
        self.cuts.push(Box::new(cut));
    }

    pub fn len(&self) -> usize {
        self.cuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.cuts.iter().map(|c| c.name()).collect()
    }

    pub fn evaluate(&self, candidate: &Candidate) -> Vec<CutResult> {
        self.cuts.iter().map(|c| c.evaluate(candidate)).collect()
    }

    pub fn passes(&self, candidate: &Candidate) -> bool {
        self.cuts.iter().all(|c| !c.is_cut(candidate))
    }

    /// Keep the survivors of `candidates`, tallying rejections per cut.
    pub fn apply(&self, candidates: Vec<Candidate>, report: &mut CutReport) -> Vec<Candidate> {
        let mut survivors = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            report.evaluated += 1;
            let results = self.evaluate(&candidate);
            let mut rejected = false;
            for result in results.iter().filter(|r| r.is_cut) {
                report.record_rejection(result.name);
                rejected = true;
            }
            if rejected {
                debug!(
                    "CutSet::apply candidate {} rejected by {:?}",
                    candidate.id.0,
                    results
                        .iter()
                        .filter(|r| r.is_cut)
                        .map(|r| r.name)
                        .collect::<Vec<_>>()
                );
            } else {
                survivors.push(candidate);
            }
        }
        report.survivors += survivors.len();
        survivors
    }
}

impl std::fmt::Debug for CutSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CutSet").field("cuts", &self.names()).finish()
    }
}
