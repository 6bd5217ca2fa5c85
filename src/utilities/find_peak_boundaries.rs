use crate::utilities::structs::PeakBounds;
use crate::utilities::utilities::percent_change;

#[derive(Clone, Copy, Debug)]
pub struct BoundaryOptions {
    /// Percent change from the peak value below which the left walk keeps
    /// stepping out.
    pub percent_drop_min_left: f64,
    /// Same gate for the right walk.
    pub percent_drop_min_right: f64,
    /// Local percent-change floor for the left local-minimum walk.
    pub rate_of_change_left: f64,
    /// Local percent-change floor for the right local-minimum walk; this is
    /// the per-channel knob (FRET 0.3, Rhod 0.6).
    pub fall_percent: f64,
}

impl Default for BoundaryOptions {
    fn default() -> Self {
        Self {
            percent_drop_min_left: 10.0,
            percent_drop_min_right: 10.0,
            rate_of_change_left: 1.0,
            fall_percent: 0.3,
        }
    }
}

/// Find the left/right base index bounding each detected peak.
///
/// Each walk first steps outward while the sample stays within
/// `percent_drop_min_*` percent of the PEAK value. Once the change exceeds
/// the gate the fall is found, and the walk continues to the local minimum:
/// it keeps stepping while the signal still decreases outward and the local
/// percent change stays above the rate floor. Walks never cross the
/// neighbouring peak's index (or the trace edge for the outermost peaks).
pub fn find_peak_boundaries(
    y: &[f32],
    peaks: &[usize],
    options: Option<BoundaryOptions>,
) -> Vec<PeakBounds> {
    let o = options.unwrap_or_default();
    let n = y.len();
    let mut out = Vec::with_capacity(peaks.len());
    if n == 0 {
        return out;
    }

    for (k, &peak) in peaks.iter().enumerate() {
        let left_bound = if k > 0 { peaks[k - 1] } else { 0 };
        let right_bound = if k + 1 < peaks.len() {
            peaks[k + 1]
        } else {
            n - 1
        };

        let left = walk_left(y, peak, left_bound, &o);
        let right = walk_right(y, peak, right_bound, &o);
        out.push(PeakBounds { peak, left, right });
    }

    out
}

fn walk_left(y: &[f32], peak: usize, left_bound: usize, o: &BoundaryOptions) -> usize {
    let peak_value = y[peak] as f64;
    let mut base = peak;
    let mut fall_found = false;

    while base > left_bound && !fall_found {
        if percent_change(y[base - 1] as f64, peak_value) <= o.percent_drop_min_left {
            base -= 1;
        } else {
            fall_found = true;
            while base > left_bound
                && y[base - 1] < y[base]
                && percent_change(y[base - 1] as f64, y[base] as f64) > o.rate_of_change_left
            {
                base -= 1;
            }
        }
    }

    base
}

fn walk_right(y: &[f32], peak: usize, right_bound: usize, o: &BoundaryOptions) -> usize {
    let peak_value = y[peak] as f64;
    let mut base = peak;
    let mut fall_found = false;

    while base < right_bound && !fall_found {
        if percent_change(y[base + 1] as f64, peak_value) <= o.percent_drop_min_right {
            base += 1;
        } else {
            fall_found = true;
            while base < right_bound
                && y[base + 1] < y[base]
                && percent_change(y[base] as f64, y[base + 1] as f64) > o.fall_percent
            {
                base += 1;
            }
        }
    }

    base
}
