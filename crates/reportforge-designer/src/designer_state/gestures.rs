//! Pointer gestures for designer state.
//!
//! Pointer positions are scene coordinates; the viewport zoom captured at
//! press time converts travel back to page units.

use reportforge_core::{ElementId, GestureError, Result};

use super::DesignerState;
use crate::interaction::GestureMode;
use crate::layout::PageLayout;
use crate::model::{Geometry, NodeRef, Point};

impl DesignerState {
    /// Selects `target` if needed and starts a move or resize gesture on it.
    pub fn press(&mut self, target: NodeRef, pointer: Point, mode: GestureMode) -> Result<()> {
        if self.interaction.is_active() {
            return Err(GestureError::GestureInProgress.into());
        }
        if target.element().is_none() {
            return Err(GestureError::NotAnElement(target.to_string()).into());
        }
        self.model.check(target)?;
        if !self.selection.is_selected(target) {
            self.selection.select(target);
        }

        let zoom = self.viewport.zoom();
        let grid = self.snap_grid();
        self.interaction
            .press(&self.model, target, pointer, mode, zoom, grid)?;
        Ok(())
    }

    /// Topmost element under a scene position, descending into frames
    pub fn element_at(&self, pointer: Point) -> Option<ElementId> {
        PageLayout::new(&self.model).element_at(self.viewport.scene_to_page(pointer))
    }

    /// Presses whatever element lies under `pointer`.
    ///
    /// Returns the pressed element, or `None` when the pointer is over
    /// empty space, in which case the selection is cleared.
    pub fn press_at(&mut self, pointer: Point, mode: GestureMode) -> Result<Option<ElementId>> {
        if self.interaction.is_active() {
            return Err(GestureError::GestureInProgress.into());
        }
        match self.element_at(pointer) {
            Some(id) => {
                self.press(NodeRef::Element(id), pointer, mode)?;
                Ok(Some(id))
            }
            None => {
                self.selection.clear();
                Ok(None)
            }
        }
    }

    /// Applies the live geometry for `pointer`.
    pub fn drag(&mut self, pointer: Point) -> Result<Geometry> {
        self.interaction.drag(&mut self.model, pointer)
    }

    /// Ends the gesture. Returns true when it produced an undoable change.
    pub fn release(&mut self, pointer: Point) -> Result<bool> {
        let command = self
            .interaction
            .release(&self.model, pointer, &self.viewport)?;
        match command {
            Some(command) => {
                self.execute_command(command);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Abandons the gesture and puts the element back where it started.
    pub fn cancel_gesture(&mut self) -> Result<bool> {
        self.interaction.cancel(&mut self.model)
    }

    pub fn is_gesture_active(&self) -> bool {
        self.interaction.is_active()
    }
}
