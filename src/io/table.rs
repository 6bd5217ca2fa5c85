use std::path::Path;

use crate::errors::{Result, TableError};
use crate::utilities::structs::Trace;

/// One labelled trace column of a channel table.
#[derive(Clone, Debug)]
pub struct TraceColumn {
    pub label: String,
    pub trace: Trace,
}

/// A parsed channel sheet: the shared time axis label plus one trimmed trace
/// per region of interest.
#[derive(Clone, Debug, Default)]
pub struct ChannelTable {
    pub time_label: String,
    pub columns: Vec<TraceColumn>,
}

/// Read a channel table. The first column is the time axis; every other
/// column is one ROI trace. A trace ends at its first empty (or NaN) cell,
/// so columns shorter than the time axis keep their own length.
pub fn read_channel_table(path: &Path) -> Result<ChannelTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut records = rdr.records();
    let header = match records.next() {
        Some(rec) => rec?,
        None => {
            return Err(TableError::EmptyTable {
                path: path.to_path_buf(),
            }
            .into());
        }
    };
    if header.len() < 2 {
        return Err(TableError::MissingTimeColumn {
            path: path.to_path_buf(),
        }
        .into());
    }

    let time_label = header[0].trim().to_string();
    let labels: Vec<String> = header
        .iter()
        .skip(1)
        .map(|s| s.trim().to_string())
        .collect();

    let mut time = Vec::<f64>::new();
    let mut raw: Vec<Vec<Option<f32>>> = vec![Vec::new(); labels.len()];

    for (row_idx, rec) in records.enumerate() {
        let rec = rec?;
        let row = row_idx + 2; // 1-based, after the header
        let time_cell = rec.get(0).map(str::trim).unwrap_or("");
        if time_cell.is_empty() {
            break;
        }
        let t: f64 = time_cell
            .parse()
            .map_err(|_| TableError::NonNumericCell {
                path: path.to_path_buf(),
                column: time_label.clone(),
                row,
                cell: time_cell.to_string(),
            })?;
        time.push(t);

        for (c, col) in raw.iter_mut().enumerate() {
            let cell = rec.get(c + 1).map(str::trim).unwrap_or("");
            if cell.is_empty() {
                col.push(None);
                continue;
            }
            let v: f32 = cell.parse().map_err(|_| TableError::NonNumericCell {
                path: path.to_path_buf(),
                column: labels[c].clone(),
                row,
                cell: cell.to_string(),
            })?;
            col.push(if v.is_nan() { None } else { Some(v) });
        }
    }

    if time.is_empty() {
        return Err(TableError::EmptyTable {
            path: path.to_path_buf(),
        }
        .into());
    }

    let mut columns = Vec::with_capacity(labels.len());
    for (label, cells) in labels.into_iter().zip(raw) {
        let len = cells.iter().position(Option::is_none).unwrap_or(cells.len());
        if len == 0 {
            log::warn!("{}: column {:?} has no usable samples, skipping", path.display(), label);
            continue;
        }
        let signal: Vec<f32> = cells[..len].iter().copied().flatten().collect();
        columns.push(TraceColumn {
            label,
            trace: Trace {
                time: time[..len].to_vec(),
                signal,
            },
        });
    }

    Ok(ChannelTable { time_label, columns })
}
