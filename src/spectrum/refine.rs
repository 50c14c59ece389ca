use super::{BinRange, RefineOptions, Spectrum};
use crate::types::Point;
use log::debug;

/// Outcome of refining a single point against its slice spectrum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refinement {
    Refined,
    Invalid(RefineFailure),
}

impl Refinement {
    pub fn is_refined(&self) -> bool {
        matches!(self, Refinement::Refined)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefineFailure {
    /// The point's bin was already claimed by a stronger point.
    Masked,
    /// The point's bin lies outside the accepted band.
    OutOfBand,
    /// The centroid window would cross the band or spectrum edges.
    WindowAtEdge,
    /// The centroid window carries no power.
    NoSupport,
    /// The noise-subtracted line power is not positive.
    NoLinePower,
}

/// Move `point` onto the power-weighted centroid of its peak, replace its
/// amplitude by the noise-subtracted line power and zero the claimed bins.
///
/// On failure the point's amplitude is set to zero and the caller must skip
/// it. Masking happens for every point whose centroid converged, including
/// ones rejected for lack of line power, so the neighborhood is never
/// revisited within the slice.
pub fn refine_point(
    point: &mut Point,
    spectrum: &mut Spectrum,
    range: BinRange,
    options: &RefineOptions,
) -> Refinement {
    match refine_inner(point, spectrum, range, options) {
        Ok(()) => Refinement::Refined,
        Err(failure) => {
            debug!(
                "refine_point bin={} t={:.6} failed: {:?}",
                point.bin_in_slice, point.time_in_run, failure
            );
            point.amplitude = 0.0;
            Refinement::Invalid(failure)
        }
    }
}

fn refine_inner(
    point: &mut Point,
    spectrum: &mut Spectrum,
    range: BinRange,
    options: &RefineOptions,
) -> Result<(), RefineFailure> {
    let start_bin = point.bin_in_slice;
    if start_bin >= spectrum.len() || !range.contains(start_bin) {
        return Err(RefineFailure::OutOfBand);
    }
    if spectrum.get(start_bin) == 0.0 {
        return Err(RefineFailure::Masked);
    }

    let (bin, centroid) = converge_centroid(spectrum, range, start_bin, options)?;

    let radius = options.line_power_radius;
    let power = if range.holds_window(bin, radius) {
        let mut sum = 0.0;
        for b in (bin - radius)..=(bin + radius) {
            sum += spectrum.get(b);
            spectrum.set(b, 0.0);
        }
        sum - (2 * radius + 1) as f64 * point.mean
    } else {
        let value = spectrum.get(bin);
        spectrum.set(bin, 0.0);
        value
    };

    // Margin is clipped to the interior of the band.
    let margin = options.min_freq_bin_distance;
    let lo = bin.saturating_sub(margin).max(range.min.saturating_add(1));
    let hi = bin.saturating_add(margin).min(range.max.saturating_sub(1));
    for b in lo..=hi {
        spectrum.set(b, 0.0);
    }

    if !(power > 0.0) {
        return Err(RefineFailure::NoLinePower);
    }

    point.bin_in_slice = bin;
    point.frequency = spectrum.frequency_at(centroid);
    point.amplitude = power;
    Ok(())
}

/// Iterate the power-weighted centroid until the bin shift drops to
/// `converge_delta` or the iteration budget runs out.
fn converge_centroid(
    spectrum: &Spectrum,
    range: BinRange,
    start_bin: usize,
    options: &RefineOptions,
) -> Result<(usize, f64), RefineFailure> {
    let radius = options.search_radius;
    let mut bin = start_bin;
    let mut centroid = start_bin as f64;

    for _ in 0..options.max_iterations.max(1) {
        if !range.holds_window(bin, radius) {
            return Err(RefineFailure::WindowAtEdge);
        }
        let mut weighted = 0.0;
        let mut weight_sum = 0.0;
        for b in (bin - radius)..=(bin + radius) {
            let value = spectrum.get(b);
            weighted += b as f64 * value;
            weight_sum += value;
        }
        if !(weight_sum > 0.0) {
            return Err(RefineFailure::NoSupport);
        }
        centroid = weighted / weight_sum;
        let next = centroid.round() as usize;
        let shift = next.abs_diff(bin) as f64;
        bin = next;
        if shift <= options.converge_delta {
            break;
        }
    }
    // The last step may land anywhere; its window was never checked.
    if !range.holds_window(bin, radius) {
        return Err(RefineFailure::WindowAtEdge);
    }
    Ok((bin, centroid))
}
