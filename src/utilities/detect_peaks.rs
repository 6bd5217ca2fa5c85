#[derive(Clone, Copy, Debug)]
pub struct ProminenceOptions {
    pub prominence: f64,
}

impl Default for ProminenceOptions {
    fn default() -> Self {
        Self { prominence: 0.08 }
    }
}

/// Find local maxima whose prominence clears the configured threshold.
///
/// Candidates are strict local maxima; a flat-topped plateau contributes the
/// left-middle sample of the plateau. Prominence is measured against the
/// higher of the two lowest points reachable before the signal exceeds the
/// candidate again (or the trace edge).
pub fn detect_peaks(y: &[f32], options: Option<ProminenceOptions>) -> Vec<usize> {
    let o = options.unwrap_or_default();
    let candidates = local_maxima(y);
    if candidates.is_empty() {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|&i| prominence(y, i) >= o.prominence)
        .collect()
}

/// Prominence of a single sample index, edge-bounded.
pub fn prominence(y: &[f32], peak: usize) -> f64 {
    let n = y.len();
    if n == 0 || peak >= n {
        return 0.0;
    }
    let py = y[peak];

    let mut left_min = py;
    let mut i = peak;
    loop {
        if y[i] > py {
            break;
        }
        if y[i] < left_min {
            left_min = y[i];
        }
        if i == 0 {
            break;
        }
        i -= 1;
    }

    let mut right_min = py;
    let mut j = peak;
    while j < n {
        if y[j] > py {
            break;
        }
        if y[j] < right_min {
            right_min = y[j];
        }
        j += 1;
    }

    (py as f64) - (left_min.max(right_min) as f64)
}

fn local_maxima(y: &[f32]) -> Vec<usize> {
    let n = y.len();
    let mut out = Vec::new();
    if n < 3 {
        return out;
    }
    let mut i = 1usize;
    while i < n - 1 {
        if y[i - 1] < y[i] {
            // scan ahead over a possible plateau
            let mut ahead = i + 1;
            while ahead < n - 1 && y[ahead] == y[i] {
                ahead += 1;
            }
            if y[ahead] < y[i] {
                let left_edge = i;
                let right_edge = ahead - 1;
                out.push((left_edge + right_edge) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }
    out
}
