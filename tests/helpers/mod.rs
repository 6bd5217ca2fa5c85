// tests/helpers.rs
use fluorkin::io::table::{ChannelTable, TraceColumn};
use fluorkin::utilities::structs::Trace;

/// Get one Gaussian value at x (bell curve). `base` lifts the whole curve.
#[inline]
pub fn gaussian_value(x: f64, mu: f64, sigma: f64, amp: f64, base: f64) -> f64 {
    base + amp * (-0.5 * ((x - mu) / sigma).powi(2)).exp()
}

/// Build a signal made of one or more Gaussians, plus a constant `base` and
/// optional small fake `noise`. Returns f32 values the way the table reader
/// stores them.
pub fn gaussian_mixture_f32(
    xs: &[f64],
    peaks: &[(f64, f64, f64)],
    base: f64,
    noise: f64,
) -> Vec<f32> {
    xs.iter()
        .map(|&x| {
            let mut y = base;
            for &(mu, sigma, amp) in peaks {
                y += gaussian_value(x, mu, sigma, amp, 0.0);
            }
            if noise > 0.0 {
                let z = ((x * 137.13).sin() + (x * 73.7).cos()) * 0.5;
                y += z * noise;
            }
            y as f32
        })
        .collect()
}

/// Make an even grid from start to end with n points (inclusive).
pub fn make_grid(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![start];
    }
    (0..n)
        .map(|i| start + (end - start) * (i as f64) / ((n - 1) as f64))
        .collect()
}

/// Same as `make_grid`, named like NumPy for familiarity.
#[allow(dead_code)]
pub fn linspace(from: f64, to: f64, n: usize) -> Vec<f64> {
    make_grid(from, to, n)
}

/// Check two numbers are close within a simple absolute tolerance.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Build a `Trace` from time and signal vectors.
#[allow(dead_code)]
pub fn trace(time: Vec<f64>, signal: Vec<f32>) -> Trace {
    Trace { time, signal }
}

/// Build a one-label trace column.
#[allow(dead_code)]
pub fn trace_column(label: &str, time: Vec<f64>, signal: Vec<f32>) -> TraceColumn {
    TraceColumn {
        label: label.to_string(),
        trace: Trace { time, signal },
    }
}

/// Assemble an in-memory channel table from prebuilt columns.
#[allow(dead_code)]
pub fn channel_table(columns: Vec<TraceColumn>) -> ChannelTable {
    ChannelTable {
        time_label: "Time (Min)".to_string(),
        columns,
    }
}

/// Temp-file path unique to one test, cleaned up by the caller.
#[allow(dead_code)]
pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("fluorkin_test_{}_{}", std::process::id(), name))
}
