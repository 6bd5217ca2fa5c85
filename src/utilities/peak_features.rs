use crate::utilities::structs::{PeakBounds, PeakFeatures, Trace};
use crate::utilities::utilities::{simpson_integral, slope_between};

/// Compute the reported kinetic features for one bounded transient.
///
/// Area Under Curve is the Simpson integral between the bases minus the
/// chord trapezoid spanned by them (baseline-corrected), absolute value.
pub fn peak_features(column: &str, trace: &Trace, bounds: &PeakBounds) -> PeakFeatures {
    let t = &trace.time;
    let y = &trace.signal;
    let (l, p, r) = (bounds.left, bounds.peak, bounds.right);

    let y_l = y[l] as f64;
    let y_p = y[p] as f64;
    let y_r = y[r] as f64;

    let raw_area = simpson_integral(&t[l..=r], &y[l..=r]);
    let chord = 0.5 * (t[r] - t[l]) * (y_l + y_r);

    PeakFeatures {
        column: column.to_string(),
        peak_time: t[p],
        peak_value: y_p,
        amplitude: y_p - y_l,
        time_to_peak: t[p] - t[l],
        rise_rate: slope_between((t[l], y_l), (t[p], y_p)),
        decay_rate: slope_between((t[p], y_p), (t[r], y_r)),
        time_after_peak: t[r],
        duration: t[r] - t[l],
        percent_change: if y_l == 0.0 {
            f64::INFINITY
        } else {
            ((y_r - y_l).abs() / y_l) * 100.0
        },
        area: (raw_area - chord).abs(),
    }
}
