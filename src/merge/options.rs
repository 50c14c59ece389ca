use crate::error::Result;
use crate::finder::{non_negative, positive};
use serde::{Deserialize, Serialize};

/// Geometric criterion deciding whether two candidates belong together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeMode {
    /// Disjoint fragments whose extrapolations meet across a short gap.
    #[default]
    Extrapolation,
    /// Fragments overlapping in time that run side by side or cross.
    Overlap,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    pub enabled: bool,
    pub mode: MergeMode,
    /// Largest gap (s) between an earlier candidate's end and a later one's start.
    pub time_gap_tolerance: f64,
    /// Allowed miss (Hz) of an extrapolation at the other candidate's boundary.
    pub frequency_acceptance: f64,
    /// Largest frequency separation (Hz) of candidates treated as one track.
    pub max_track_width: f64,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: MergeMode::default(),
            time_gap_tolerance: 5.0e-3,
            frequency_acceptance: 185.0e3,
            max_track_width: 185.0e3,
        }
    }
}

impl MergeOptions {
    pub fn validate(&self) -> Result<()> {
        non_negative("merge.time_gap_tolerance", self.time_gap_tolerance)?;
        positive("merge.frequency_acceptance", self.frequency_acceptance)?;
        positive("merge.max_track_width", self.max_track_width)
    }
}
