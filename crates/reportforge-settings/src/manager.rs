//! Settings manager
//!
//! Resolves the platform config directory and loads/saves the designer
//! configuration there.

use std::path::{Path, PathBuf};

use crate::config::DesignerConfig;
use crate::error::{SettingsError, SettingsResult};

const APP_DIR: &str = "reportforge";
const CONFIG_FILE: &str = "designer.toml";

/// Owns the active configuration and where it is stored
#[derive(Debug, Clone)]
pub struct SettingsManager {
    config: DesignerConfig,
    path: PathBuf,
}

impl SettingsManager {
    /// Manager backed by the default platform location
    pub fn new() -> SettingsResult<Self> {
        Ok(Self::with_path(Self::default_config_path()?))
    }

    /// Manager backed by an explicit file, starting from defaults
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config: DesignerConfig::default(),
            path: path.into(),
        }
    }

    /// `<config dir>/reportforge/designer.toml`
    pub fn default_config_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config or home directory".to_string())
            })?;
        Ok(dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Create the directory holding the config file
    pub fn ensure_config_dir(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
        }
        Ok(())
    }

    /// Load the stored config, keeping defaults when no file exists yet
    pub fn load(&mut self) -> SettingsResult<&DesignerConfig> {
        if self.path.exists() {
            self.config = DesignerConfig::load_from_file(&self.path)?;
        } else {
            tracing::info!(
                "No designer config at {}, using defaults",
                self.path.display()
            );
        }
        Ok(&self.config)
    }

    /// Persist the active config
    pub fn save(&self) -> SettingsResult<()> {
        self.ensure_config_dir()?;
        self.config
            .save_to_file(&self.path)
            .map_err(|e| SettingsError::SaveError(e.to_string()))
    }

    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut DesignerConfig {
        &mut self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
