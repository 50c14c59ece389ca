//! Point-level data flowing through the finder.
//!
//! A discriminator hands the finder [`InputPoint`]s grouped per slice together
//! with a [`SliceHeader`]. Once a point is attached to its slice time it
//! becomes a [`Point`], the unit stored in lines and candidates.

use serde::{Deserialize, Serialize};

/// Time and bookkeeping attached to one spectral slice.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SliceHeader {
    /// Start of the slice on the acquisition clock (seconds).
    pub time_in_acq: f64,
    /// Start of the slice on the run clock (seconds).
    pub time_in_run: f64,
    /// Duration covered by the slice (seconds).
    pub slice_length: f64,
    pub acquisition_id: u64,
    pub component: u32,
    /// First slice of a new acquisition; flushes every active line first.
    pub is_new_acquisition: bool,
}

impl SliceHeader {
    /// Acquisition-clock time assigned to the slice's points (slice midpoint).
    pub fn point_time_in_acq(&self) -> f64 {
        self.time_in_acq + 0.5 * self.slice_length
    }

    /// Run-clock time assigned to the slice's points (slice midpoint).
    pub fn point_time_in_run(&self) -> f64 {
        self.time_in_run + 0.5 * self.slice_length
    }
}

/// Discriminated spectrum bin as delivered by the peak discriminator.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputPoint {
    pub bin: usize,
    pub frequency: f64,
    pub amplitude: f64,
    /// Local noise mean around the bin.
    pub mean: f64,
    /// Local noise variance around the bin.
    pub variance: f64,
    /// Power summed over the bin's neighborhood.
    pub neighborhood_amplitude: f64,
}

/// Which amplitude a statistic is computed from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Statistic {
    /// Exact-bin (or refined line-power) amplitude.
    Narrow,
    /// Neighborhood-summed amplitude.
    #[default]
    Wide,
}

/// A point bound to its slice, as stored in lines and candidates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub bin_in_slice: usize,
    pub frequency: f64,
    pub time_in_acq: f64,
    pub time_in_run: f64,
    /// Zero marks a spent or invalid point.
    pub amplitude: f64,
    pub mean: f64,
    pub variance: f64,
    pub neighborhood_amplitude: f64,
    pub acquisition_id: u64,
    pub component: u32,
}

impl Point {
    pub fn from_input(input: &InputPoint, header: &SliceHeader) -> Self {
        Self {
            bin_in_slice: input.bin,
            frequency: input.frequency,
            time_in_acq: header.point_time_in_acq(),
            time_in_run: header.point_time_in_run(),
            amplitude: input.amplitude,
            mean: input.mean,
            variance: input.variance,
            neighborhood_amplitude: input.neighborhood_amplitude,
            acquisition_id: header.acquisition_id,
            component: header.component,
        }
    }

    #[inline]
    pub fn is_spent(&self) -> bool {
        self.amplitude == 0.0
    }

    /// Amplitude over local noise mean.
    pub fn snr(&self) -> f64 {
        ratio(self.amplitude, self.mean)
    }

    pub fn wide_snr(&self) -> f64 {
        ratio(self.neighborhood_amplitude, self.mean)
    }

    /// Normalized residual power: excess over the noise mean in units of the
    /// noise standard deviation.
    pub fn nup(&self) -> f64 {
        residual(self.amplitude, self.mean, self.variance)
    }

    pub fn wide_nup(&self) -> f64 {
        residual(self.neighborhood_amplitude, self.mean, self.variance)
    }

    pub fn snr_of(&self, statistic: Statistic) -> f64 {
        match statistic {
            Statistic::Narrow => self.snr(),
            Statistic::Wide => self.wide_snr(),
        }
    }
}

#[inline]
fn ratio(amplitude: f64, mean: f64) -> f64 {
    if mean > 0.0 {
        amplitude / mean
    } else {
        0.0
    }
}

#[inline]
fn residual(amplitude: f64, mean: f64, variance: f64) -> f64 {
    if variance > 0.0 {
        (amplitude - mean) / variance.sqrt()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(amplitude: f64, neighborhood: f64) -> Point {
        Point {
            bin_in_slice: 10,
            frequency: 1.0e6,
            time_in_acq: 0.0,
            time_in_run: 0.0,
            amplitude,
            mean: 2.0,
            variance: 4.0,
            neighborhood_amplitude: neighborhood,
            acquisition_id: 0,
            component: 0,
        }
    }

    #[test]
    fn point_statistics_follow_noise_model() {
        let p = point(10.0, 20.0);
        assert_eq!(p.snr(), 5.0);
        assert_eq!(p.wide_snr(), 10.0);
        assert_eq!(p.nup(), 4.0);
        assert_eq!(p.wide_nup(), 9.0);
        assert_eq!(p.snr_of(Statistic::Narrow), 5.0);
        assert_eq!(p.snr_of(Statistic::Wide), 10.0);
    }

    #[test]
    fn degenerate_noise_yields_zero_statistics() {
        let mut p = point(10.0, 20.0);
        p.mean = 0.0;
        p.variance = 0.0;
        assert_eq!(p.snr(), 0.0);
        assert_eq!(p.nup(), 0.0);
    }

    #[test]
    fn header_assigns_slice_midpoint() {
        let header = SliceHeader {
            time_in_acq: 1.0,
            time_in_run: 11.0,
            slice_length: 0.5,
            ..Default::default()
        };
        let input = InputPoint {
            bin: 3,
            frequency: 42.0,
            amplitude: 1.0,
            ..Default::default()
        };
        let p = Point::from_input(&input, &header);
        assert_eq!(p.time_in_acq, 1.25);
        assert_eq!(p.time_in_run, 11.25);
        assert_eq!(p.bin_in_slice, 3);
    }
}
