//! Zoom, grid, view mode, query text and preview for designer state.

use reportforge_core::Result;

use super::DesignerState;
use crate::commands::ChangePropertyCommand;
use crate::model::MarginSide;
use crate::preview::PageImage;

/// Which face of the document the editor shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Design,
    /// Serialized text of the design
    Source,
    /// Rendered page
    Preview,
}

impl DesignerState {
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Switches view. Entering Source serializes the design; entering
    /// Preview starts a render.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> Result<()> {
        if mode == self.view_mode {
            return Ok(());
        }
        match mode {
            ViewMode::Source => self.source_text = self.save_to_string()?,
            ViewMode::Preview => {
                self.request_preview()?;
            }
            ViewMode::Design => {}
        }
        tracing::debug!("View mode {:?} -> {:?}", self.view_mode, mode);
        self.view_mode = mode;
        Ok(())
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Replaces the design with the parsed source text.
    ///
    /// A parse failure leaves the design untouched. Success clears history
    /// like any other document replacement.
    pub fn apply_source_text(&mut self, text: &str) -> Result<()> {
        self.load_document(text)?;
        self.source_text = text.to_string();
        self.mark_modified();
        Ok(())
    }

    pub(crate) fn refresh_source(&mut self) {
        match self.codec.save(self.model.design()) {
            Ok(text) => self.source_text = text,
            Err(e) => self.record_error("Failed to refresh source", &e),
        }
    }

    pub fn zoom(&self) -> f64 {
        self.viewport.zoom()
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.viewport.zoom_in(self.config.view.zoom_step);
        self.viewport.zoom()
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.viewport.zoom_out(self.config.view.zoom_step);
        self.viewport.zoom()
    }

    pub fn reset_zoom(&mut self) {
        self.viewport.reset_zoom();
    }

    /// Scroll offset of the page on the canvas, in scene pixels
    pub fn pan(&self) -> (f64, f64) {
        self.viewport.pan()
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.viewport.set_pan(x, y);
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
    }

    pub fn grid_size(&self) -> u32 {
        self.config.grid.size
    }

    pub fn set_grid_size(&mut self, size: u32) -> bool {
        if size == 0 {
            self.skip("Cannot change grid", "grid size must be positive");
            return false;
        }
        self.config.grid.size = size;
        true
    }

    pub fn snap_to_grid(&self) -> bool {
        self.config.grid.snap_to_grid
    }

    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        self.config.grid.snap_to_grid = enabled;
    }

    pub fn show_grid(&self) -> bool {
        self.config.grid.show_grid
    }

    pub fn set_show_grid(&mut self, visible: bool) {
        self.config.grid.show_grid = visible;
    }

    /// Undoable query edit. Returns false when the text is unchanged.
    pub fn set_query_string(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if self.model.design().query == query {
            return false;
        }
        let command = ChangePropertyCommand::query(&self.model, query);
        self.execute_command(Box::new(command));
        true
    }

    pub fn set_design_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.model.design().name == name {
            return false;
        }
        let command = ChangePropertyCommand::design_name(&self.model, name);
        self.execute_command(Box::new(command));
        true
    }

    pub fn set_margin(&mut self, side: MarginSide, value: i32) -> bool {
        if self.model.design().margins.get(side) == value {
            return false;
        }
        let command = ChangePropertyCommand::margin(&self.model, side, value);
        self.execute_command(Box::new(command));
        true
    }

    /// Starts rendering the current design off-thread.
    pub fn request_preview(&mut self) -> Result<u64> {
        match self.preview.request(self.model.design().clone()) {
            Ok(request) => Ok(request),
            Err(e) => {
                self.record_error("Preview failed", &e);
                Err(e.into())
            }
        }
    }

    pub fn is_preview_pending(&self) -> bool {
        self.preview.is_pending()
    }

    /// Collects a finished preview. Returns true when a new page arrived.
    pub fn poll_preview(&mut self) -> Result<bool> {
        let Some(done) = self.preview.poll() else {
            return Ok(false);
        };
        match done.result {
            Ok(page) => {
                tracing::info!(
                    "Preview {} ready ({}x{})",
                    done.request,
                    page.width(),
                    page.height()
                );
                self.last_preview = Some(page);
                Ok(true)
            }
            Err(e) => {
                self.record_error("Preview failed", &e);
                Err(e.into())
            }
        }
    }

    pub fn last_preview(&self) -> Option<&PageImage> {
        self.last_preview.as_ref()
    }
}
