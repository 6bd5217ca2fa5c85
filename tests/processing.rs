mod helpers;
use helpers::{approx_eq, channel_table, gaussian_mixture_f32, make_grid, trace_column};

use std::io::Cursor;

use fluorkin::config::{ChannelConfig, Config};
use fluorkin::errors::FluorkinError;
use fluorkin::processing::{analyze_channel, slope_channel};

fn fret_channel() -> ChannelConfig {
    ChannelConfig {
        name: "Fret".to_string(),
        fall_percent: 0.3,
    }
}

#[test]
fn analyze_channel_reports_columns_in_order() {
    let xs = make_grid(0.0, 10.0, 401);
    let two = gaussian_mixture_f32(&xs, &[(3.0, 0.4, 0.5), (7.0, 0.4, 0.4)], 1.0, 0.0);
    let one = gaussian_mixture_f32(&xs, &[(5.0, 0.4, 0.4)], 1.0, 0.0);
    let table = channel_table(vec![
        trace_column("ROI 1", xs.clone(), two),
        trace_column("ROI 2", xs.clone(), one),
    ]);

    let config = Config::default();
    let (features, qa) = analyze_channel(&fret_channel(), &table, &config);

    assert_eq!(features.len(), 3);
    assert_eq!(features[0].column, "ROI 1");
    assert_eq!(features[1].column, "ROI 1");
    assert_eq!(features[2].column, "ROI 2");
    // peaks inside a column come out in time order
    assert!(features[0].peak_time < features[1].peak_time);
    assert!(approx_eq(features[0].peak_time, 3.0, 1e-9));
    assert!(approx_eq(features[2].peak_time, 5.0, 1e-9));

    assert_eq!(qa.len(), 2);
    assert_eq!(qa[0].peaks.len(), 2);
    assert_eq!(qa[0].bounds.len(), 2);
    assert_eq!(qa[1].channel, "Fret");
}

#[test]
fn analyze_channel_feature_values_are_sane() {
    let xs = make_grid(0.0, 10.0, 401);
    let ys = gaussian_mixture_f32(&xs, &[(5.0, 0.4, 0.5)], 1.0, 0.0);
    let table = channel_table(vec![trace_column("ROI 1", xs, ys)]);

    let config = Config::default();
    let (features, _) = analyze_channel(&fret_channel(), &table, &config);

    assert_eq!(features.len(), 1);
    let f = &features[0];
    assert!(approx_eq(f.peak_value, 1.5, 1e-4));
    // the left base sits where the tail flattens below the walk gates, so
    // the amplitude recovers most of the 0.5 bump
    assert!(f.amplitude > 0.3 && f.amplitude < 0.5);
    assert!(f.duration > 1.0 && f.duration < 3.0);
    assert!(f.rise_rate > 0.0);
    assert!(f.decay_rate < 0.0);
    assert!(f.area > 0.0);
    assert!(f.time_to_peak > 0.0);
    assert!(approx_eq(f.time_after_peak, f.peak_time + (f.duration - f.time_to_peak), 1e-9));
}

#[test]
fn max_peaks_caps_each_column() {
    let xs = make_grid(0.0, 10.0, 401);
    let ys = gaussian_mixture_f32(&xs, &[(3.0, 0.4, 0.5), (7.0, 0.4, 0.4)], 1.0, 0.0);
    let table = channel_table(vec![trace_column("ROI 1", xs, ys)]);

    let mut config = Config::default();
    config.detection.max_peaks = 1;
    let (features, qa) = analyze_channel(&fret_channel(), &table, &config);

    assert_eq!(features.len(), 1);
    assert!(approx_eq(features[0].peak_time, 3.0, 1e-9));
    // the QA dump still carries every detection
    assert_eq!(qa[0].peaks.len(), 2);
}

#[test]
fn slope_channel_computes_endpoint_rates() {
    let table = channel_table(vec![trace_column(
        "ROI 1",
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![1.0, 1.2, 1.5, 2.0, 1.6],
    )]);
    let config = Config::default();

    let mut input = Cursor::new(b"3\n".to_vec());
    let mut output = Vec::new();
    let rows = slope_channel(&table, &config, &mut input, &mut output).unwrap();

    assert_eq!(rows.len(), 1);
    let r = &rows[0];
    assert_eq!(r.column, "ROI 1");
    assert!(approx_eq(r.peak_value, 2.0, 1e-6));
    assert!(approx_eq(r.peak_time, 3.0, 1e-12));
    assert!(approx_eq(r.rise_rate, 1.0 / 3.0, 1e-6));
    assert!(approx_eq(r.decay_rate, -0.4, 1e-6));
    // mean of the gradient over the three samples before the peak
    assert!(approx_eq(r.mean_rise_gradient, 0.25, 1e-6));

    let prompt = String::from_utf8(output).unwrap();
    assert!(prompt.contains("Analyzing ROI 1..."));
    assert!(prompt.contains("Time index of peak?"));
}

#[test]
fn slope_channel_rejects_out_of_range_index() {
    let table = channel_table(vec![trace_column(
        "ROI 1",
        vec![0.0, 1.0, 2.0],
        vec![1.0, 2.0, 1.0],
    )]);
    let config = Config::default();

    let mut input = Cursor::new(b"99\n".to_vec());
    let mut output = Vec::new();
    let err = slope_channel(&table, &config, &mut input, &mut output).unwrap_err();
    assert!(matches!(err, FluorkinError::PeakIndexOutOfRange { .. }));
}

#[test]
fn slope_channel_rejects_garbage_input() {
    let table = channel_table(vec![trace_column(
        "ROI 1",
        vec![0.0, 1.0, 2.0],
        vec![1.0, 2.0, 1.0],
    )]);
    let config = Config::default();

    let mut input = Cursor::new(b"not a number\n".to_vec());
    let mut output = Vec::new();
    let err = slope_channel(&table, &config, &mut input, &mut output).unwrap_err();
    assert!(matches!(err, FluorkinError::ParseError { .. }));
}
