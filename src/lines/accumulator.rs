use crate::types::Point;

/// Running sums over a line's points.
///
/// Regression sums are taken over `(time_in_run, frequency)` relative to the
/// first pushed point; absolute run times and carrier frequencies are large
/// enough that the textbook sums would cancel catastrophically.
#[derive(Clone, Debug, Default)]
pub(crate) struct LineAccumulator {
    origin_x: f64,
    origin_y: f64,
    pub count: usize,
    pub sum_x: f64,
    pub sum_y: f64,
    pub sum_xy: f64,
    pub sum_xx: f64,
    pub amplitude_sum: f64,
    pub snr_sum: f64,
    pub wide_snr_sum: f64,
    pub nup_sum: f64,
    pub wide_nup_sum: f64,
}

impl LineAccumulator {
    pub(crate) fn push(&mut self, point: &Point) {
        if self.count == 0 {
            self.origin_x = point.time_in_run;
            self.origin_y = point.frequency;
        }
        let x = point.time_in_run - self.origin_x;
        let y = point.frequency - self.origin_y;
        self.count += 1;
        self.sum_x += x;
        self.sum_y += y;
        self.sum_xy += x * y;
        self.sum_xx += x * x;

        self.amplitude_sum += point.amplitude;
        self.snr_sum += point.snr();
        self.wide_snr_sum += point.wide_snr();
        self.nup_sum += point.nup();
        self.wide_nup_sum += point.wide_nup();
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Least-squares slope of frequency over run time, if defined.
    pub(crate) fn regression_slope(&self) -> Option<f64> {
        if self.count < 2 {
            return None;
        }
        let n = self.count as f64;
        let denom = n * self.sum_xx - self.sum_x * self.sum_x;
        // Relative to the scale of the time sums, so tiny spacings still fit.
        if !(denom > f64::EPSILON * n * self.sum_xx) {
            return None;
        }
        let slope = (n * self.sum_xy - self.sum_x * self.sum_y) / denom;
        slope.is_finite().then_some(slope)
    }
}
