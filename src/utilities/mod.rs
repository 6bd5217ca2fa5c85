pub mod detect_peaks;

pub mod find_peak_boundaries;

pub mod peak_features;

pub mod slope;
pub use slope::{gradient, mean_rise_gradient};

pub mod smooth;
pub use smooth::boxcar_smooth;

pub mod structs;

pub mod utilities;
pub use utilities::{percent_change, simpson_integral, slope_between, trapezoid_integral};
