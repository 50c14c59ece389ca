use super::{BinRange, Spectrum};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Largest accepted half-width (bins) for any refinement window.
pub const MAX_BIN_RADIUS: usize = 1 << 16;

/// Parameters controlling per-point frequency refinement and the band of bins
/// a slice's points are accepted from.
///
/// The band is either given directly as `min_bin`/`max_bin` or derived from
/// `min_frequency`/`max_frequency` and the slice's bin width. Unset bounds
/// fall back to the full spectrum.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineOptions {
    /// Half-width (bins) of the centroid window.
    pub search_radius: usize,
    /// Centroid iteration stops once the bin shift is at most this value.
    pub converge_delta: f64,
    /// Upper bound on centroid iterations.
    pub max_iterations: usize,
    /// Half-width (bins) summed into the point's line power.
    pub line_power_radius: usize,
    /// Half-width (bins) zeroed around a refined point.
    pub min_freq_bin_distance: usize,
    pub min_bin: Option<usize>,
    pub max_bin: Option<usize>,
    pub min_frequency: Option<f64>,
    pub max_frequency: Option<f64>,
}

impl Default for RefineOptions {
    fn default() -> Self {
        Self {
            search_radius: 6,
            converge_delta: 1.5,
            max_iterations: 10,
            line_power_radius: 4,
            min_freq_bin_distance: 10,
            min_bin: None,
            max_bin: None,
            min_frequency: None,
            max_frequency: None,
        }
    }
}

impl RefineOptions {
    /// Resolve the accepted bin band for a concrete spectrum.
    pub fn bin_range(&self, spectrum: &Spectrum) -> BinRange {
        let last = spectrum.len().saturating_sub(1);
        let min = self
            .min_bin
            .or_else(|| self.min_frequency.map(|f| spectrum.bin_of(f)))
            .unwrap_or(0);
        let max = self
            .max_bin
            .or_else(|| self.max_frequency.map(|f| spectrum.bin_of(f)))
            .unwrap_or(last)
            .min(last);
        BinRange::new(min, max)
    }

    /// Band check used when no spectrum accompanies the slice.
    pub fn accepts(&self, bin: usize, frequency: f64) -> bool {
        if self.min_bin.is_some_and(|min| bin < min) {
            return false;
        }
        if self.max_bin.is_some_and(|max| bin > max) {
            return false;
        }
        if self.min_frequency.is_some_and(|min| frequency < min) {
            return false;
        }
        if self.max_frequency.is_some_and(|max| frequency > max) {
            return false;
        }
        true
    }

    pub fn validate(&self) -> Result<()> {
        if self.search_radius == 0 {
            return Err(Error::invalid("search_radius", "must be at least 1"));
        }
        if !(self.converge_delta.is_finite() && self.converge_delta >= 0.0) {
            return Err(Error::invalid(
                "converge_delta",
                format!("must be finite and non-negative, got {}", self.converge_delta),
            ));
        }
        if self.max_iterations == 0 {
            return Err(Error::invalid("max_iterations", "must be at least 1"));
        }
        for (field, radius) in [
            ("search_radius", self.search_radius),
            ("line_power_radius", self.line_power_radius),
            ("min_freq_bin_distance", self.min_freq_bin_distance),
        ] {
            if radius > MAX_BIN_RADIUS {
                return Err(Error::invalid(
                    field,
                    format!("must be at most {MAX_BIN_RADIUS} bins, got {radius}"),
                ));
            }
        }
        if let (Some(min), Some(max)) = (self.min_bin, self.max_bin) {
            if min > max {
                return Err(Error::invalid(
                    "min_bin",
                    format!("min_bin {min} exceeds max_bin {max}"),
                ));
            }
            // A centroid window needs 2r + 1 bins strictly inside the band.
            if max - min < 2 * self.search_radius + 2 {
                return Err(Error::invalid(
                    "search_radius",
                    format!(
                        "window of {} bins does not fit in band {min}..={max}",
                        2 * self.search_radius + 1
                    ),
                ));
            }
        }
        if let (Some(min), Some(max)) = (self.min_frequency, self.max_frequency) {
            if !(min <= max) {
                return Err(Error::invalid(
                    "min_frequency",
                    format!("min_frequency {min} exceeds max_frequency {max}"),
                ));
            }
        }
        Ok(())
    }
}
