//! Synthetic slice streams: a linear frequency sweep plus scattered noise
//! detections, with or without a backing power spectrum.

use track_finder::spectrum::Spectrum;
use track_finder::{InputPoint, SliceHeader};

/// One generated slice, ready for `process_slice`.
pub struct SyntheticSlice {
    pub header: SliceHeader,
    pub points: Vec<InputPoint>,
    pub spectrum: Option<Spectrum>,
}

#[derive(Clone, Debug)]
pub struct Sweep {
    pub slice_length: f64,
    /// Frequency at acquisition time zero (Hz).
    pub start_frequency: f64,
    /// Hz/s.
    pub slope: f64,
    /// SNR of the on-track detections (noise mean is 1).
    pub snr: f64,
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            slice_length: 1.0e-4,
            start_frequency: 20.0e6,
            slope: 1.0e8,
            snr: 20.0,
        }
    }
}

impl Sweep {
    pub fn frequency_at(&self, t_acq: f64) -> f64 {
        self.start_frequency + self.slope * t_acq
    }

    pub fn header(&self, slice: usize) -> SliceHeader {
        SliceHeader {
            time_in_acq: slice as f64 * self.slice_length,
            time_in_run: 100.0 + slice as f64 * self.slice_length,
            slice_length: self.slice_length,
            acquisition_id: 0,
            component: 0,
            is_new_acquisition: slice == 0,
        }
    }

    pub fn track_point(&self, slice: usize) -> InputPoint {
        let t = self.header(slice).point_time_in_acq();
        detection(self.frequency_at(t), self.snr)
    }
}

pub fn detection(frequency: f64, snr: f64) -> InputPoint {
    InputPoint {
        bin: (frequency / 1.0e3) as usize,
        frequency,
        amplitude: snr,
        mean: 1.0,
        variance: 1.0,
        neighborhood_amplitude: snr,
    }
}

/// Deterministic linear congruential generator; enough for test noise.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1))
    }

    pub fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Poisson draw by multiplication of uniforms.
    pub fn poisson(&mut self, mean: f64) -> usize {
        let limit = (-mean).exp();
        let mut k = 0;
        let mut p = self.next_f64();
        while p > limit {
            k += 1;
            p *= self.next_f64();
        }
        k
    }
}

/// Sparse stream: the sweep's detection in `slices` plus a Poisson number of
/// noise detections per slice. Noise sits on a 2 MHz grid 10 MHz or more
/// above the track, arranged so that no two noise points in consecutive
/// slices share a frequency.
pub fn sparse_sweep_with_noise(
    sweep: &Sweep,
    slices: impl IntoIterator<Item = usize>,
    noise_mean: f64,
    seed: u64,
) -> Vec<SyntheticSlice> {
    let mut rng = Lcg::new(seed);
    slices
        .into_iter()
        .map(|i| {
            let mut points = vec![sweep.track_point(i)];
            let n_noise = rng.poisson(noise_mean).min(5);
            for k in 0..n_noise {
                let slot = (k * 7 + i * 13) % 50;
                let f = sweep.start_frequency + 10.0e6 + slot as f64 * 2.0e6;
                let snr = 1.0 + 4.0 * rng.next_f64();
                points.push(detection(f, snr));
            }
            SyntheticSlice {
                header: sweep.header(i),
                points,
                spectrum: None,
            }
        })
        .collect()
}

/// Dense stream: every slice carries a spectrum with a three-bin peak on the
/// track over a unit noise floor. The discriminator reports both the peak
/// bin and its upper neighbor, so refinement must suppress the duplicate.
pub fn dense_sweep(
    bin_width: f64,
    bins: usize,
    first_bin: usize,
    slices: usize,
    peak: f64,
) -> Vec<SyntheticSlice> {
    let slice_length = 1.0e-4;
    (0..slices)
        .map(|i| {
            let centre = first_bin + i;
            let mut values = vec![1.0; bins];
            values[centre - 1] = 0.5 * peak;
            values[centre] = peak;
            values[centre + 1] = 0.5 * peak;
            let spectrum = Spectrum::new(bin_width, values);

            let point = |bin: usize, amplitude: f64| InputPoint {
                bin,
                frequency: spectrum.frequency_at(bin as f64),
                amplitude,
                mean: 1.0,
                variance: 1.0,
                neighborhood_amplitude: 2.0 * peak,
            };
            let points = vec![point(centre, peak), point(centre + 1, 0.5 * peak)];
            SyntheticSlice {
                header: SliceHeader {
                    time_in_acq: i as f64 * slice_length,
                    time_in_run: i as f64 * slice_length,
                    slice_length,
                    acquisition_id: 0,
                    component: 0,
                    is_new_acquisition: i == 0,
                },
                points,
                spectrum: Some(spectrum),
            }
        })
        .collect()
}
