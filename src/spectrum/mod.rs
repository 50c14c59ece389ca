//! Power spectrum of one slice and the frequency refiner that consumes it.
//!
//! The refiner treats the spectrum as a scratch buffer: every refined point
//! zeroes the bins it claimed so that weaker neighbors discriminated from the
//! same peak cannot be refined onto it again. A [`Spectrum`] therefore must
//! not outlive the slice it was computed for; the finder only ever borrows it
//! mutably for the duration of that slice.
//!
//! Modules
//! - `options` – refinement knobs and the allowed bin/frequency band.
//! - `refine` – centroid iteration, line power and masking.

mod options;
mod refine;

pub use options::{RefineOptions, MAX_BIN_RADIUS};
pub use refine::{refine_point, Refinement, RefineFailure};

use serde::{Deserialize, Serialize};

/// Owned power spectrum with uniform bin width.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spectrum {
    /// Width of one frequency bin (Hz).
    pub bin_width: f64,
    /// Power per bin.
    pub values: Vec<f64>,
}

impl Spectrum {
    pub fn new(bin_width: f64, values: Vec<f64>) -> Self {
        Self { bin_width, values }
    }

    /// Zero-filled spectrum with `bins` entries.
    pub fn zeros(bin_width: f64, bins: usize) -> Self {
        Self::new(bin_width, vec![0.0; bins])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn get(&self, bin: usize) -> f64 {
        self.values[bin]
    }

    #[inline]
    pub fn set(&mut self, bin: usize, value: f64) {
        self.values[bin] = value;
    }

    /// Centre frequency of a (fractional) bin position.
    #[inline]
    pub fn frequency_at(&self, bin: f64) -> f64 {
        self.bin_width * (bin + 0.5)
    }

    /// Bin containing `frequency`, saturating at zero.
    pub fn bin_of(&self, frequency: f64) -> usize {
        if self.bin_width > 0.0 && frequency > 0.0 {
            (frequency / self.bin_width).floor() as usize
        } else {
            0
        }
    }
}

/// Inclusive bin interval a slice's points may occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinRange {
    pub min: usize,
    pub max: usize,
}

impl BinRange {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, bin: usize) -> bool {
        bin >= self.min && bin <= self.max
    }

    /// True if `[bin - radius, bin + radius]` lies strictly inside the range.
    #[inline]
    pub fn holds_window(&self, bin: usize, radius: usize) -> bool {
        bin > self.min.saturating_add(radius) && bin.saturating_add(radius) < self.max
    }

    /// True if `bin` lies strictly inside the range (edges excluded).
    #[inline]
    pub fn interior(&self, bin: usize) -> bool {
        bin > self.min && bin < self.max
    }
}
