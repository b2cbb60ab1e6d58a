//! Render configuration — every numeric knob the layout uses, passed
//! explicitly into each component call.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Pixels per second of chart time at scroll scale 1.0
    pub height_factor: f64,
    /// Width of the note track in pixels
    pub track_width: f64,
    /// Vertical margin, split evenly above and below the track
    pub height_extra: f64,
    /// Horizontal margin, split evenly left and right of the track
    pub width_extra: f64,
    /// Lateral compression applied to note positions around the centre
    pub width_scale: f64,
    /// Height of one output page in pixels
    pub page_height: u32,
    pub min_time_scale: f64,
    pub max_time_scale: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            height_factor: 300.0,
            track_width: 450.0,
            height_extra: 100.0,
            width_extra: 150.0,
            width_scale: 0.9,
            page_height: 3000,
            min_time_scale: 0.5,
            max_time_scale: 2.0,
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ChartError {
    ChartError::InvalidConfig {
        field,
        reason: reason.into(),
    }
}

impl RenderConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ChartError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if !positive(self.height_factor) {
            return Err(invalid("height_factor", format!("must be positive, got {}", self.height_factor)));
        }
        if !positive(self.track_width) {
            return Err(invalid("track_width", format!("must be positive, got {}", self.track_width)));
        }
        if !non_negative(self.height_extra) {
            return Err(invalid("height_extra", "must not be negative"));
        }
        if !non_negative(self.width_extra) {
            return Err(invalid("width_extra", "must not be negative"));
        }
        if !positive(self.width_scale) || self.width_scale > 1.0 {
            return Err(invalid("width_scale", format!("must be in (0, 1], got {}", self.width_scale)));
        }
        if !positive(self.min_time_scale) {
            return Err(invalid("min_time_scale", "must be positive"));
        }
        if !positive(self.max_time_scale) || self.max_time_scale < self.min_time_scale {
            return Err(invalid(
                "max_time_scale",
                format!("must be >= min_time_scale ({})", self.min_time_scale),
            ));
        }
        if self.page_height == 0 {
            return Err(invalid("page_height", "must be at least 1"));
        }
        Ok(())
    }

    /// Pull a lateral position toward the centre of the track.
    pub fn compress_position(&self, position: f64) -> f64 {
        position - (position - 0.5) * (1.0 - self.width_scale)
    }

    /// Clamp a scroll-speed multiplier into the configured bounds.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.max(self.min_time_scale).min(self.max_time_scale)
    }
}

/// Finite and strictly above zero; NaN fails.
fn positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

fn non_negative(x: f64) -> bool {
    x.is_finite() && x >= 0.0
}
