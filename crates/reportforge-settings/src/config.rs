//! Configuration and settings management for ReportForge
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Grid settings (size, snapping, visibility)
//! - View preferences (rulers, zoom limits and step)
//! - Editing defaults (paste offset, history depth, band height)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsResult};

/// Grid settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Grid spacing in page units
    pub size: u32,
    /// Quantize gesture coordinates to the grid
    pub snap_to_grid: bool,
    /// Draw the grid on the canvas
    pub show_grid: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: 10,
            snap_to_grid: false,
            show_grid: true,
        }
    }
}

/// View preference settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub show_rulers: bool,
    /// Zoom factor applied to a fresh designer
    pub default_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Increment used by zoom in/out
    pub zoom_step: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            show_rulers: true,
            default_zoom: 1.0,
            min_zoom: 0.2,
            max_zoom: 4.0,
            zoom_step: 0.1,
        }
    }
}

/// Editing defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditingSettings {
    /// Offset applied to both axes when pasting
    pub paste_offset: i32,
    /// Maximum number of undo steps kept
    pub history_depth: usize,
    /// Height given to newly created bands
    pub default_band_height: i32,
    /// Number of entries kept in the recent files list
    pub recent_files_count: usize,
}

impl Default for EditingSettings {
    fn default() -> Self {
        Self {
            paste_offset: 10,
            history_depth: 100,
            default_band_height: 50,
            recent_files_count: 10,
        }
    }
}

/// Complete designer configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DesignerConfig {
    pub grid: GridSettings,
    pub view: ViewSettings,
    pub editing: EditingSettings,
    /// Recent files list, most recent first
    pub recent_files: Vec<PathBuf>,
}

impl DesignerConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Self::format_of(path)? {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded designer config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Self::format_of(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    fn format_of(path: &Path) -> Result<ConfigFormat, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.size == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "grid.size".to_string(),
                value: self.grid.size.to_string(),
            });
        }

        for (key, value) in [
            ("view.min_zoom", self.view.min_zoom),
            ("view.max_zoom", self.view.max_zoom),
            ("view.zoom_step", self.view.zoom_step),
            ("view.default_zoom", self.view.default_zoom),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::ValueOutOfRange {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }

        if self.view.min_zoom > self.view.max_zoom {
            return Err(ConfigError::Inconsistent(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.view.min_zoom, self.view.max_zoom
            )));
        }

        if self.editing.history_depth == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "editing.history_depth".to_string(),
                value: "0".to_string(),
            });
        }

        if self.editing.default_band_height < 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "editing.default_band_height".to_string(),
                value: self.editing.default_band_height.to_string(),
            });
        }

        Ok(())
    }

    /// Clamp a zoom factor into the configured range
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.view.min_zoom, self.view.max_zoom)
    }

    /// Add file to recent files list
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|f| f != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(self.editing.recent_files_count);
    }
}

#[derive(Debug, Clone, Copy)]
enum ConfigFormat {
    Json,
    Toml,
}
