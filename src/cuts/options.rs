use crate::error::{Error, Result};
use crate::types::Statistic;
use serde::{Deserialize, Serialize};

/// Normalization used for "average" thresholds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AverageBy {
    /// Per second of track length.
    #[default]
    Time,
    /// Per point.
    #[serde(alias = "bin")]
    Points,
}

/// Total/average thresholds over one summed statistic.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SumCutOptions {
    pub enabled: bool,
    /// Narrow or wide variant of the statistic; ignored by the power cut.
    pub statistic: Statistic,
    pub min_total: f64,
    pub min_average: f64,
    pub average_by: AverageBy,
}

impl Default for SumCutOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            statistic: Statistic::default(),
            min_total: 0.0,
            min_average: 0.0,
            average_by: AverageBy::default(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityCutOptions {
    pub enabled: bool,
    /// Minimum points per second of track length.
    pub min_density: f64,
}

/// Every quality cut the pipeline can apply. Disabled cuts are not built.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CutOptions {
    pub snr: SumCutOptions,
    pub nup: SumCutOptions,
    pub power: SumCutOptions,
    pub density: DensityCutOptions,
}

impl CutOptions {
    pub fn validate(&self) -> Result<()> {
        for (name, cut) in [("snr", &self.snr), ("nup", &self.nup), ("power", &self.power)] {
            if cut.min_total.is_nan() || cut.min_average.is_nan() {
                return Err(Error::invalid(
                    "cuts",
                    format!("{name} thresholds must not be NaN"),
                ));
            }
        }
        if self.density.min_density.is_nan() {
            return Err(Error::invalid("cuts", "density threshold must not be NaN"));
        }
        Ok(())
    }
}
