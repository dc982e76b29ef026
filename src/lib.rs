//! # ReportForge
//!
//! Interactive document core for a visual report-layout designer.
//!
//! ## Architecture
//!
//! ReportForge is organized as a workspace with multiple crates:
//!
//! 1. **reportforge-core** - Error taxonomy, element ids, event bus, user-visible log
//! 2. **reportforge-settings** - Designer configuration (grid, zoom, editing defaults)
//! 3. **reportforge-designer** - Design tree, commands, history, selection, gestures
//! 4. **reportforge** - Facade crate and headless demo binary
//!
//! ## Features
//!
//! - **Reactive Design Tree**: Every write is applied and announced in one step
//! - **Undo/Redo**: Structural and property edits are reversible commands
//! - **Pointer Gestures**: Move, 8-handle resize, grid snapping, cross-band drops
//! - **Clipboard and Grouping**: Copy/cut/paste elements, wrap into frames
//! - **Preview**: Off-thread rendering of the current design

pub use reportforge_core as core;
pub use reportforge_designer as designer;
pub use reportforge_settings as settings;

pub use reportforge_core::{
    CodecError, ElementId, Error, EventBus, EventFilter, EventLog, GestureError, LogEntry,
    LogLevel, ModelError, RenderError, Result, SubscriptionId,
};

pub use reportforge_designer::{
    BandType, Command, ContainerRef, Design, DesignModel, DesignerState, Element, ElementKind,
    GestureMode, Geometry, Handle, HistoryManager, ModelEvent, ModelEventCategory, NodeRef,
    Point, SelectionController, ViewMode,
};

pub use reportforge_settings::{DesignerConfig, SettingsManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
/// - JSON lines instead when `REPORTFORGE_LOG_JSON` is set
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if std::env::var_os("REPORTFORGE_LOG_JSON").is_some() {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
