//! Editor tuning knobs, loadable from a JSON file.

use crate::input::DEFAULT_DRAG_THRESHOLD;
use crate::interaction::{CORNER_THRESHOLD, INDICATOR_HALF_SIZE};
use crate::storage::DEFAULT_CONFIG_FILE;
use crate::transform::{
    CoordinateTransformer, DEFAULT_SCALE, DEFAULT_ZOOM, TransformState, ZOOM_STEP,
};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Editor settings. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Base render zoom for a freshly opened document.
    #[serde(default = "default_zoom")]
    pub default_zoom: f64,
    #[serde(default = "default_scale")]
    pub default_scale: f64,
    /// Multiplier applied by one zoom step.
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
    /// Per-axis corner grab distance in viewport pixels.
    #[serde(default = "default_corner_threshold")]
    pub corner_threshold: f64,
    /// Pointer travel before a press becomes a drag.
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f64,
    /// Half size of corner indicator squares.
    #[serde(default = "default_indicator_size")]
    pub indicator_size: f64,
    /// File name used when saving a region configuration.
    #[serde(default = "default_config_file")]
    pub config_file: String,
}

fn default_zoom() -> f64 {
    DEFAULT_ZOOM
}

fn default_scale() -> f64 {
    DEFAULT_SCALE
}

fn default_zoom_step() -> f64 {
    ZOOM_STEP
}

fn default_corner_threshold() -> f64 {
    CORNER_THRESHOLD
}

fn default_drag_threshold() -> f64 {
    DEFAULT_DRAG_THRESHOLD
}

fn default_indicator_size() -> f64 {
    INDICATOR_HALF_SIZE
}

fn default_config_file() -> String {
    DEFAULT_CONFIG_FILE.to_string()
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_zoom: default_zoom(),
            default_scale: default_scale(),
            zoom_step: default_zoom_step(),
            corner_threshold: default_corner_threshold(),
            drag_threshold: default_drag_threshold(),
            indicator_size: default_indicator_size(),
            config_file: default_config_file(),
        }
    }
}

impl EditorSettings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Transformer for a freshly opened document.
    pub fn transformer(&self) -> CoordinateTransformer {
        CoordinateTransformer::with_state(TransformState::new(
            self.default_zoom,
            self.default_scale,
            Vec2::ZERO,
        ))
        .with_zoom_step(self.zoom_step)
    }

    /// Where the region configuration of `dir` is saved.
    pub fn config_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.config_file)
    }

    /// Read settings from `path`, falling back to defaults if the file is
    /// missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Using default settings, cannot read {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings, invalid {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
