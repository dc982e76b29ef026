//! File I/O operations (save, load, new) for designer state.

use std::path::Path;

use anyhow::Context;
use reportforge_core::{ModelError, Result};

use super::{DesignerState, ViewMode};
use crate::interaction::InteractionController;
use crate::model::{Design, NodeRef};

impl DesignerState {
    /// Create new design (clear all).
    pub fn new_design(&mut self) {
        let design = Design::new_blank(self.config.editing.default_band_height);
        if let Err(e) = self.install(design) {
            self.record_error("Failed to create design", &e);
            return;
        }
        self.current_file_path = None;
        self.is_modified = false;
    }

    /// Replace the document with one parsed from `source`.
    ///
    /// On failure the current document, selection and history are left as
    /// they were and the error is added to the log list.
    pub fn open_str(&mut self, source: &str) -> Result<()> {
        self.load_document(source)?;
        self.current_file_path = None;
        self.is_modified = false;
        Ok(())
    }

    /// Load design from file.
    pub fn open_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                self.record_error("Failed to read design file", &e);
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        self.load_document(&source)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        self.current_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        self.config.add_recent_file(path.to_path_buf());
        Ok(())
    }

    /// Serialize the current design through the codec.
    pub fn save_to_string(&mut self) -> Result<String> {
        match self.codec.save(self.model.design()) {
            Ok(text) => Ok(text),
            Err(e) => {
                self.record_error("Failed to save design", &e);
                Err(e.into())
            }
        }
    }

    /// Save design to file.
    pub fn save_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let text = self.save_to_string().context("Failed to serialize design")?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!("Saved design to {}", path.display());
        self.current_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        self.config.add_recent_file(path.to_path_buf());
        Ok(())
    }

    /// Mark design as modified.
    pub fn mark_modified(&mut self) {
        self.is_modified = true;
    }

    /// Get display name for the design.
    pub fn display_name(&self) -> String {
        let design_name = self.model.design().name.as_str();
        let name = if let Some(path) = &self.current_file_path {
            path.file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(design_name)
        } else {
            design_name
        };

        if self.is_modified {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }

    /// Parse and install a document without touching the file path.
    pub(super) fn load_document(&mut self, source: &str) -> Result<()> {
        let design = match self.codec.load(source) {
            Ok(design) => design,
            Err(e) => {
                self.record_error("Failed to open design", &e);
                return Err(e.into());
            }
        };
        if let Err(e) = self.install(design) {
            self.record_error("Failed to open design", &e);
            return Err(e.into());
        }
        Ok(())
    }

    fn install(&mut self, design: Design) -> std::result::Result<(), ModelError> {
        self.model.replace_design(design)?;
        if self.interaction.is_active() {
            tracing::debug!("Abandoning live gesture on document replace");
        }
        self.interaction = InteractionController::new();
        self.history.clear();
        self.selection.select(NodeRef::Design);
        if self.view_mode == ViewMode::Source {
            self.refresh_source();
        }
        Ok(())
    }
}
