use serde::{Deserialize, Serialize};

use crate::errors::{FluorkinError, Result};
use crate::utilities::detect_peaks::ProminenceOptions;
use crate::utilities::find_peak_boundaries::BoundaryOptions;

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct DetectionConfig {
    pub prominence: f64,
    /// At most this many peaks are reported per trace column.
    pub max_peaks: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            prominence: 0.08,
            max_peaks: 6,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct BoundaryConfig {
    pub percent_drop_min_left: f64,
    pub percent_drop_min_right: f64,
    pub rate_of_change_left: f64,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            percent_drop_min_left: 10.0,
            percent_drop_min_right: 10.0,
            rate_of_change_left: 1.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChannelConfig {
    pub name: String,
    /// Right-walk local percent-change floor for this channel.
    pub fall_percent: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct SlopeConfig {
    /// Boxcar span used to smooth the preview values in manual mode.
    pub smoothing_span: usize,
}

impl Default for SlopeConfig {
    fn default() -> Self {
        Self { smoothing_span: 10 }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// File name (inside the output directory) for the QA trace dump.
    /// Absent means no dump.
    pub qa_traces_json: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub detection: DetectionConfig,
    pub boundaries: BoundaryConfig,
    pub channels: Vec<ChannelConfig>,
    pub slope: SlopeConfig,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detection: DetectionConfig::default(),
            boundaries: BoundaryConfig::default(),
            channels: vec![
                ChannelConfig {
                    name: "Fret".to_string(),
                    fall_percent: 0.3,
                },
                ChannelConfig {
                    name: "Rhod".to_string(),
                    fall_percent: 0.6,
                },
            ],
            slope: SlopeConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml(path: &std::path::Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path).map_err(|e| FluorkinError::Io {
            source: e,
            path: Some(path.to_path_buf()),
        })?;
        let config: Config = toml::from_str(&config_str)?;
        Ok(config)
    }

    pub fn prominence_options(&self) -> ProminenceOptions {
        ProminenceOptions {
            prominence: self.detection.prominence,
        }
    }

    pub fn boundary_options(&self, fall_percent: f64) -> BoundaryOptions {
        BoundaryOptions {
            percent_drop_min_left: self.boundaries.percent_drop_min_left,
            percent_drop_min_right: self.boundaries.percent_drop_min_right,
            rate_of_change_left: self.boundaries.rate_of_change_left,
            fall_percent,
        }
    }
}
