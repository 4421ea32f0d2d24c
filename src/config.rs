//! Tunable constants of the measuring tool.
//!
//! Defaults reproduce the stock look; a JSON override can be stored in
//! `localStorage` under [`CONFIG_STORAGE_KEY`]. Fields missing from the stored
//! JSON keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::MAX_DECIMALS;
use crate::util::{clog, cwarn};

pub const CONFIG_STORAGE_KEY: &str = "mm_config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Preferred capture width; the browser may pick another.
    pub ideal_width: u32,
    /// Preferred capture height; the browser may pick another.
    pub ideal_height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            ideal_width: 1280,
            ideal_height: 720,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill: String,
    pub outline: String,
    pub outline_width: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 5.0,
            fill: "red".to_string(),
            outline: "white".to_string(),
            outline_width: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: "rgba(0, 255, 0, 0.8)".to_string(),
            width: 3.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub font: String,
    pub color: String,
    /// Drawn this far above the segment midpoint.
    pub offset_y: f64,
    pub decimals: usize,
    pub suffix: String,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font: "16px Arial".to_string(),
            color: "white".to_string(),
            offset_y: 10.0,
            decimals: 1,
            suffix: "px".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    pub camera: CameraConfig,
    /// Delay between a completed measurement and the overlay reset.
    pub reset_delay_ms: u32,
    pub readout_decimals: usize,
    pub marker: MarkerStyle,
    pub line: LineStyle,
    pub label: LabelStyle,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            reset_delay_ms: 2000,
            readout_decimals: 2,
            marker: MarkerStyle::default(),
            line: LineStyle::default(),
            label: LabelStyle::default(),
        }
    }
}

impl MeasureConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(raw)?;
        Ok(cfg.clamped())
    }

    /// Caps stored precisions at [`MAX_DECIMALS`].
    pub fn clamped(mut self) -> Self {
        self.readout_decimals = self.readout_decimals.min(MAX_DECIMALS);
        self.label.decimals = self.label.decimals.min(MAX_DECIMALS);
        self
    }

    /// Reads the stored override, falling back to defaults when there is none
    /// or it cannot be parsed.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(CONFIG_STORAGE_KEY).ok().flatten());
        match raw {
            Some(raw) => match Self::from_json(&raw) {
                Ok(cfg) => {
                    clog(&format!("loaded {} override", CONFIG_STORAGE_KEY));
                    cfg
                }
                Err(e) => {
                    cwarn(&format!("ignoring {}: {}", CONFIG_STORAGE_KEY, e));
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}
