//! Editor tunables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Thresholds and factors used by the interaction state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Page units a pointer must travel before a press becomes a drag.
    pub dead_zone: f64,
    /// Snap tolerance in screen units.
    pub snap_distance: f64,
    /// Drags faster than this skip snapping.
    pub snap_speed_threshold: f64,
    /// Zoom increment for zoom in/out.
    pub zoom_step: f64,
    /// Number of angle segments rotation snaps to.
    pub rotation_segments: u32,
    /// Screen padding left around content by zoom-to-fit.
    pub fit_padding: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            dead_zone: 3.0,
            snap_distance: 5.0,
            snap_speed_threshold: 5.0,
            zoom_step: 0.25,
            rotation_segments: 24,
            fit_padding: 128.0,
            min_zoom: 0.1,
            max_zoom: 5.0,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let non_negative = [
            ("dead_zone", self.dead_zone),
            ("snap_distance", self.snap_distance),
            ("snap_speed_threshold", self.snap_speed_threshold),
            ("fit_padding", self.fit_padding),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(invalid(field, format!("must be non-negative, got {value}")));
            }
        }
        if self.zoom_step.is_nan() || self.zoom_step <= 0.0 {
            return Err(invalid("zoom_step", format!("must be positive, got {}", self.zoom_step)));
        }
        if self.min_zoom.is_nan() || self.min_zoom <= 0.0 {
            return Err(invalid("min_zoom", format!("must be positive, got {}", self.min_zoom)));
        }
        if self.max_zoom.is_nan() || self.min_zoom > self.max_zoom {
            return Err(invalid(
                "max_zoom",
                format!("must be at least min_zoom ({}), got {}", self.min_zoom, self.max_zoom),
            ));
        }
        if self.rotation_segments == 0 {
            return Err(invalid("rotation_segments", "must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
