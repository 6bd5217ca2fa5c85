use serde::Serialize;

/// One trimmed trace: sample times in minutes plus the signal values.
#[derive(Clone, Debug, Default)]
pub struct Trace {
    pub time: Vec<f64>,
    pub signal: Vec<f32>,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.signal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signal.is_empty()
    }
}

/// Left/right base indices bounding one detected peak.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeakBounds {
    pub peak: usize,
    pub left: usize,
    pub right: usize,
}

/// Kinetic features of one transient, as reported per output column.
#[derive(Clone, Debug, Serialize)]
pub struct PeakFeatures {
    pub column: String,
    pub peak_time: f64,
    pub peak_value: f64,
    pub amplitude: f64,
    pub time_to_peak: f64,
    pub rise_rate: f64,
    pub decay_rate: f64,
    pub time_after_peak: f64,
    pub duration: f64,
    pub percent_change: f64,
    pub area: f64,
}
