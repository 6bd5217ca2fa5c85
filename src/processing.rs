use std::io::{BufRead, Write};

use rayon::prelude::*;
use serde::Serialize;

use crate::config::{ChannelConfig, Config};
use crate::errors::{FluorkinError, Result};
use crate::io::table::{ChannelTable, TraceColumn};
use crate::qa::QaTrace;
use crate::utilities::detect_peaks::detect_peaks;
use crate::utilities::find_peak_boundaries::find_peak_boundaries;
use crate::utilities::peak_features::peak_features;
use crate::utilities::slope::mean_rise_gradient;
use crate::utilities::smooth::boxcar_smooth;
use crate::utilities::structs::PeakFeatures;
use crate::utilities::utilities::slope_between;

/// Run the automatic pipeline over every column of one channel table:
/// detect, bound, featurize. Columns are independent, so they run in
/// parallel; results keep column order, and each column reports at most
/// `max_peaks` transients.
pub fn analyze_channel(
    channel: &ChannelConfig,
    table: &ChannelTable,
    config: &Config,
) -> (Vec<PeakFeatures>, Vec<QaTrace>) {
    let per_column: Vec<(Vec<PeakFeatures>, QaTrace)> = table
        .columns
        .par_iter()
        .map(|col| analyze_column(&channel.name, col, config, channel.fall_percent))
        .collect();

    let mut features = Vec::new();
    let mut qa = Vec::with_capacity(per_column.len());
    for (f, q) in per_column {
        features.extend(f);
        qa.push(q);
    }
    (features, qa)
}

fn analyze_column(
    channel: &str,
    col: &TraceColumn,
    config: &Config,
    fall_percent: f64,
) -> (Vec<PeakFeatures>, QaTrace) {
    let trace = &col.trace;
    let peaks = detect_peaks(&trace.signal, Some(config.prominence_options()));
    let bounds = find_peak_boundaries(
        &trace.signal,
        &peaks,
        Some(config.boundary_options(fall_percent)),
    );
    log::info!(
        "{}: column {} -> {} peak(s)",
        channel,
        col.label,
        peaks.len()
    );

    let features = bounds
        .iter()
        .take(config.detection.max_peaks)
        .map(|b| peak_features(&col.label, trace, b))
        .collect();

    let qa = QaTrace {
        channel: channel.to_string(),
        column: col.label.clone(),
        time: trace.time.clone(),
        signal: trace.signal.clone(),
        peaks,
        bounds: bounds.iter().map(|b| (b.left, b.right)).collect(),
    };

    (features, qa)
}

/// One row of the manual-selection report.
#[derive(Clone, Debug, Serialize)]
pub struct SlopeRow {
    pub column: String,
    pub peak_value: f64,
    pub peak_time: f64,
    pub rise_rate: f64,
    pub decay_rate: f64,
    pub mean_rise_gradient: f64,
}

/// Manual-selection workflow: for each column the operator is shown a short
/// smoothed preview and asked for the peak's sample index; rates come from
/// the trace endpoints and the mean gradient before the peak.
pub fn slope_channel<R: BufRead, W: Write>(
    table: &ChannelTable,
    config: &Config,
    input: &mut R,
    output: &mut W,
) -> Result<Vec<SlopeRow>> {
    let mut rows = Vec::with_capacity(table.columns.len());

    for col in &table.columns {
        let trace = &col.trace;
        let n = trace.len();
        if n < 2 {
            log::warn!("column {}: too short for slope analysis, skipping", col.label);
            continue;
        }

        let smoothed = boxcar_smooth(&trace.signal, config.slope.smoothing_span);
        writeln!(output, "Analyzing {}...", col.label).map_err(io_err)?;
        write_preview(output, &trace.time, &smoothed)?;
        write!(output, "Time index of peak? ").map_err(io_err)?;
        output.flush().map_err(io_err)?;

        let mut line = String::new();
        input.read_line(&mut line).map_err(io_err)?;
        let idx: usize = line.trim().parse()?;
        if idx >= n {
            return Err(FluorkinError::PeakIndexOutOfRange {
                column: col.label.clone(),
                index: idx,
                len: n,
            });
        }

        let t0 = trace.time[0];
        let t_last = trace.time[n - 1];
        let t_peak = trace.time[idx];
        let y0 = trace.signal[0] as f64;
        let y_last = trace.signal[n - 1] as f64;
        let y_peak = trace.signal[idx] as f64;

        rows.push(SlopeRow {
            column: col.label.clone(),
            peak_value: y_peak,
            peak_time: t_peak,
            rise_rate: slope_between((t0, y0), (t_peak, y_peak)),
            decay_rate: slope_between((t_peak, y_peak), (t_last, y_last)),
            mean_rise_gradient: mean_rise_gradient(&trace.signal, &trace.time, idx),
        });
    }

    Ok(rows)
}

// A terse stand-in for the plot window: a handful of evenly spaced
// (time, smoothed value) pairs with their sample indices.
fn write_preview<W: Write>(output: &mut W, time: &[f64], smoothed: &[f32]) -> Result<()> {
    let n = smoothed.len();
    let shown = 12usize.min(n);
    let step = n.div_ceil(shown).max(1);
    for i in (0..n).step_by(step) {
        writeln!(output, "  [{:>4}] t={:<8.3} y={:.4}", i, time[i], smoothed[i]).map_err(io_err)?;
    }
    Ok(())
}

fn io_err(e: std::io::Error) -> FluorkinError {
    FluorkinError::Io {
        source: e,
        path: None,
    }
}
