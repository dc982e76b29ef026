//! Designer state manager for UI integration.
//!
//! Owns the document and everything that edits it, and is the single entry
//! point a UI talks to. Split into submodules by concern:
//! - `file_io`: new/open/save and the window title
//! - `bands`: adding and removing bands
//! - `elements`: palette drops, grouping, deletion, clipboard
//! - `gestures`: pointer press/drag/release
//! - `view`: zoom, pan, grid, view mode, query text and preview

mod bands;
mod elements;
mod file_io;
mod gestures;
mod view;

pub use view::ViewMode;

use std::path::PathBuf;
use std::sync::Arc;

use reportforge_core::{EventFilter, EventLog, Listener, Result, SubscriptionId};
use reportforge_settings::DesignerConfig;

use crate::commands::Command;
use crate::document::{DesignModel, ModelEvent};
use crate::history::{HistoryManager, HistoryState};
use crate::interaction::InteractionController;
use crate::model::{Design, NodeRef};
use crate::preview::{OutlineRenderer, PageImage, PreviewRunner, ReportRenderer};
use crate::selection::SelectionController;
use crate::serialization::{DesignCodec, JsonDesignCodec};
use crate::viewport::Viewport;

/// Designer state for UI integration
pub struct DesignerState {
    model: DesignModel,
    history: HistoryManager,
    selection: SelectionController,
    interaction: InteractionController,
    viewport: Viewport,
    config: DesignerConfig,
    codec: Box<dyn DesignCodec>,
    preview: PreviewRunner,
    log: EventLog,
    clipboard: Option<String>,
    view_mode: ViewMode,
    source_text: String,
    last_preview: Option<PageImage>,
    pub current_file_path: Option<PathBuf>,
    pub is_modified: bool,
}

impl DesignerState {
    /// Creates a designer with the bundled JSON codec and outline renderer.
    pub fn new(config: DesignerConfig) -> Self {
        Self::with_collaborators(
            config,
            Box::new(JsonDesignCodec::new()),
            Arc::new(OutlineRenderer::new()),
        )
    }

    pub fn with_collaborators(
        config: DesignerConfig,
        codec: Box<dyn DesignCodec>,
        renderer: Arc<dyn ReportRenderer>,
    ) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                tracing::warn!("Invalid designer config ({}), using defaults", e);
                DesignerConfig::default()
            }
        };

        let mut viewport = Viewport::new(config.view.min_zoom, config.view.max_zoom);
        viewport.set_zoom(config.view.default_zoom);

        let mut selection = SelectionController::new();
        selection.select(NodeRef::Design);

        Self {
            model: DesignModel::new(Design::new_blank(config.editing.default_band_height)),
            history: HistoryManager::new(config.editing.history_depth),
            selection,
            interaction: InteractionController::new(),
            viewport,
            codec,
            preview: PreviewRunner::new(renderer),
            log: EventLog::new(),
            clipboard: None,
            view_mode: ViewMode::default(),
            source_text: String::new(),
            last_preview: None,
            current_file_path: None,
            is_modified: false,
            config,
        }
    }

    pub fn model(&self) -> &DesignModel {
        &self.model
    }

    pub fn design(&self) -> &Design {
        self.model.design()
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn selected(&self) -> Option<NodeRef> {
        self.selection.selected()
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    /// User-visible log list
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Last copied snippet, in codec text form
    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    /// Subscribes to model change events.
    pub fn subscribe<F>(&mut self, filter: EventFilter<ModelEvent>, handler: F) -> SubscriptionId
    where
        F: Fn(&ModelEvent) + 'static,
    {
        self.model.subscribe(filter, handler)
    }

    /// Subscribes to changes of one node.
    pub fn subscribe_node<F>(&mut self, node: NodeRef, handler: F) -> SubscriptionId
    where
        F: Fn(&ModelEvent) + 'static,
    {
        self.model.subscribe_node(node, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.model.unsubscribe(id)
    }

    pub fn on_selection_changed(&mut self, listener: Listener<Option<NodeRef>>) {
        self.selection.on_selection_changed(listener);
    }

    pub fn on_history_changed(&mut self, listener: Listener<HistoryState>) {
        self.history.on_state_changed(listener);
    }

    /// Runs a command through the history so it can be undone.
    pub fn execute_command(&mut self, command: Box<dyn Command>) {
        self.history.execute(command, &mut self.model);
        self.selection.retain_valid(&self.model);
        self.mark_modified();
    }

    pub fn undo(&mut self) -> bool {
        if !self.history.undo(&mut self.model) {
            return false;
        }
        self.selection.retain_valid(&self.model);
        self.mark_modified();
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.history.redo(&mut self.model) {
            return false;
        }
        self.selection.retain_valid(&self.model);
        self.mark_modified();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Selects a node of the current document.
    pub fn select(&mut self, node: NodeRef) -> Result<bool> {
        self.model.check(node)?;
        Ok(self.selection.select(node))
    }

    pub fn clear_selection(&mut self) -> bool {
        self.selection.clear()
    }

    /// Grid size to snap to, when snapping is on
    pub(crate) fn snap_grid(&self) -> Option<u32> {
        self.config.grid.snap_to_grid.then_some(self.config.grid.size)
    }

    /// Records an operation that could not run.
    pub(crate) fn skip(&mut self, message: &str, detail: impl Into<String>) {
        let detail = detail.into();
        tracing::warn!("{}: {}", message, detail);
        self.log.warning(message, detail);
    }

    pub(crate) fn record_error(&mut self, message: &str, err: &dyn std::error::Error) {
        tracing::error!("{}: {}", message, err);
        self.log.error(message, err);
    }
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new(DesignerConfig::default())
    }
}

impl std::fmt::Debug for DesignerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesignerState")
            .field("design", &self.model.design().name)
            .field("selected", &self.selection.selected())
            .field("history", &self.history)
            .field("view_mode", &self.view_mode)
            .field("current_file_path", &self.current_file_path)
            .field("is_modified", &self.is_modified)
            .finish()
    }
}
