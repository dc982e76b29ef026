//! ReportForge Settings Crate
//!
//! Handles designer configuration and settings persistence.

pub mod config;
pub mod error;
pub mod manager;

pub use config::{DesignerConfig, EditingSettings, GridSettings, ViewSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use manager::SettingsManager;
