//! Session configuration.
//!
//! Every field has a default, so a config file only needs to name the values
//! it overrides.

use crate::layers::Rgba;
use crate::tools::StyleState;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Line cap used for layer strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// Background grid appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Distance between grid lines in surface units.
    pub step: f64,
    pub color: Rgba,
    pub line_width: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            step: 20.0,
            color: Rgba::opaque(0xcc, 0xcc, 0xcc),
            line_width: 0.5,
        }
    }
}

/// Configuration for one drawing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Intrinsic surface width in pixels. Fixed for the session.
    pub surface_width: f64,
    /// Intrinsic surface height in pixels. Fixed for the session.
    pub surface_height: f64,
    /// Stroke width for layer outlines and pen strokes.
    pub line_width: f64,
    pub line_cap: LineCap,
    pub grid: GridConfig,
    /// Initial style state.
    pub style: StyleState,
    /// Show the grid when the session starts.
    pub show_grid: bool,
    /// File name used when exporting the surface.
    pub export_file_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            surface_width: 500.0,
            surface_height: 500.0,
            line_width: 5.0,
            line_cap: LineCap::Round,
            grid: GridConfig::default(),
            style: StyleState::default(),
            show_grid: false,
            export_file_name: "canvas.png".to_string(),
        }
    }
}

impl SessionConfig {
    /// Intrinsic surface size.
    pub fn surface_size(&self) -> Size {
        Size::new(self.surface_width, self.surface_height)
    }

    /// Where an export lands inside `dir`.
    pub fn export_path(&self, dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(&self.export_file_name)
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded session config from {}", path.display());
        Ok(config)
    }

    /// Check that sizes are positive and finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
            }
        };
        positive("surface_width", self.surface_width)?;
        positive("surface_height", self.surface_height)?;
        positive("line_width", self.line_width)?;
        positive("grid.step", self.grid.step)?;
        positive("grid.line_width", self.grid.line_width)?;
        positive("style.font_size", self.style.font_size)?;
        if self.export_file_name.trim().is_empty() {
            return Err(ConfigError::Invalid("export_file_name must not be empty".into()));
        }
        Ok(())
    }
}
