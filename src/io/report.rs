use std::path::{Path, PathBuf};

use crate::errors::{Result, TableError};
use crate::processing::SlopeRow;
use crate::utilities::structs::PeakFeatures;

pub const COLUMN_NO: &str = "Column No";
pub const TIME_OF_PEAK: &str = "Time of peak occurrence";

/// Measurement rows of the analyze report, in output order. The layout is
/// transposed: one row per measurement, one column per reported peak.
pub const MEASUREMENTS: [&str; 11] = [
    COLUMN_NO,
    TIME_OF_PEAK,
    "Peak Values",
    "Amplitude of Peak",
    "Time to Peak",
    "Rate of Rise",
    "Rate of Decay",
    "Time after Peak",
    "Duration of Peak",
    "% Change from baseline",
    "Area Under Curve",
];

/// Measurement rows of the manual-selection (slope) report.
pub const SLOPE_MEASUREMENTS: [&str; 6] = [
    "Column",
    "Peak Value",
    "Time of Peak (Min)",
    "Rate of Rise",
    "Rate of Decay",
    "Mean Rise Gradient",
];

pub fn write_report(path: &Path, features: &[PeakFeatures]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for name in MEASUREMENTS {
        let mut row: Vec<String> = Vec::with_capacity(features.len() + 1);
        row.push(name.to_string());
        for p in features {
            row.push(match name {
                COLUMN_NO => p.column.clone(),
                TIME_OF_PEAK => p.peak_time.to_string(),
                "Peak Values" => p.peak_value.to_string(),
                "Amplitude of Peak" => p.amplitude.to_string(),
                "Time to Peak" => p.time_to_peak.to_string(),
                "Rate of Rise" => p.rise_rate.to_string(),
                "Rate of Decay" => p.decay_rate.to_string(),
                "Time after Peak" => p.time_after_peak.to_string(),
                "Duration of Peak" => p.duration.to_string(),
                "% Change from baseline" => p.percent_change.to_string(),
                "Area Under Curve" => p.area.to_string(),
                _ => String::new(),
            });
        }
        wtr.write_record(&row)?;
    }
    wtr.flush().map_err(|e| crate::errors::FluorkinError::Io {
        source: e,
        path: Some(path.to_path_buf()),
    })?;
    Ok(())
}

pub fn write_slope_report(path: &Path, rows: &[SlopeRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for name in SLOPE_MEASUREMENTS {
        let mut row: Vec<String> = Vec::with_capacity(rows.len() + 1);
        row.push(name.to_string());
        for r in rows {
            row.push(match name {
                "Column" => r.column.clone(),
                "Peak Value" => r.peak_value.to_string(),
                "Time of Peak (Min)" => r.peak_time.to_string(),
                "Rate of Rise" => r.rise_rate.to_string(),
                "Rate of Decay" => r.decay_rate.to_string(),
                "Mean Rise Gradient" => r.mean_rise_gradient.to_string(),
                _ => String::new(),
            });
        }
        wtr.write_record(&row)?;
    }
    wtr.flush().map_err(|e| crate::errors::FluorkinError::Io {
        source: e,
        path: Some(path.to_path_buf()),
    })?;
    Ok(())
}

/// A report read back for field extraction. Rows keep the written order;
/// values are the raw cells after the measurement-name column.
#[derive(Clone, Debug)]
pub struct Report {
    pub path: PathBuf,
    pub rows: Vec<(String, Vec<String>)>,
}

impl Report {
    pub fn row(&self, name: &str) -> Option<&[String]> {
        self.rows
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }
}

pub fn read_report(path: &Path) -> Result<Report> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let mut it = rec.iter();
        let name = it.next().unwrap_or("").trim().to_string();
        let values: Vec<String> = it.map(|s| s.trim().to_string()).collect();
        rows.push((name, values));
    }
    if rows.is_empty() {
        return Err(TableError::EmptyTable {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(Report {
        path: path.to_path_buf(),
        rows,
    })
}

/// Collect one measurement's values grouped by source column, keeping the
/// first-appearance column order. Peaks whose time cell is empty are
/// skipped, as are empty field cells.
pub fn extract_field(report: &Report, field: &str) -> Result<Vec<(String, Vec<f64>)>> {
    let col_no = report.row(COLUMN_NO).ok_or_else(|| TableError::MissingRow {
        path: report.path.clone(),
        row: COLUMN_NO.to_string(),
    })?;
    let peak_time = report
        .row(TIME_OF_PEAK)
        .ok_or_else(|| TableError::MissingRow {
            path: report.path.clone(),
            row: TIME_OF_PEAK.to_string(),
        })?;
    let values = report.row(field).ok_or_else(|| TableError::MissingRow {
        path: report.path.clone(),
        row: field.to_string(),
    })?;

    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    for (j, label) in col_no.iter().enumerate() {
        if label.is_empty() {
            continue;
        }
        if peak_time.get(j).map(String::as_str).unwrap_or("").is_empty() {
            continue;
        }
        let cell = values.get(j).map(String::as_str).unwrap_or("");
        if cell.is_empty() {
            continue;
        }
        let v: f64 = cell.parse()?;
        match groups.iter_mut().find(|(l, _)| l == label) {
            Some((_, vs)) => vs.push(v),
            None => groups.push((label.clone(), vec![v])),
        }
    }
    Ok(groups)
}

/// Write an extracted field as one row per source column, values in peak
/// order.
pub fn write_field_table(path: &Path, groups: &[(String, Vec<f64>)]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_path(path)?;
    for (label, values) in groups {
        let mut row: Vec<String> = Vec::with_capacity(values.len() + 1);
        row.push(label.clone());
        for v in values {
            row.push(v.to_string());
        }
        wtr.write_record(&row)?;
    }
    wtr.flush().map_err(|e| crate::errors::FluorkinError::Io {
        source: e,
        path: Some(path.to_path_buf()),
    })?;
    Ok(())
}
