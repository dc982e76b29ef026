//! Element creation, grouping, deletion and clipboard for designer state.

use reportforge_core::{ElementId, Result};

use super::DesignerState;
use crate::commands::{
    AddElementCommand, ChangePropertyCommand, GroupIntoFrameCommand, RemoveElementCommand,
};
use crate::model::{BandType, ContainerRef, Element, ElementKind, NodeRef};

impl DesignerState {
    /// Creates an element of `kind` at (x, y) inside `target` and selects it.
    pub fn drop_element(
        &mut self,
        kind: ElementKind,
        x: i32,
        y: i32,
        target: ContainerRef,
    ) -> Result<ElementId> {
        self.model.check_container(target)?;
        let element = Element::at(kind, x, y);
        let id = element.id;
        tracing::debug!("Dropping {} at ({}, {}) into {}", kind.display_name(), x, y, target);

        self.execute_command(Box::new(AddElementCommand::new(target, element)));
        self.selection.select(NodeRef::Element(id));
        Ok(id)
    }

    /// Palette drop by kind name, e.g. `"STATIC_TEXT"`.
    pub fn drop_by_name(
        &mut self,
        kind: &str,
        x: i32,
        y: i32,
        target: ContainerRef,
    ) -> Result<ElementId> {
        let kind = kind.parse::<ElementKind>()?;
        self.drop_element(kind, x, y, target)
    }

    /// Wraps the selected element in a frame and selects the frame.
    pub fn group_selection(&mut self) -> bool {
        let Some(id) = self.usable_selection("Cannot group") else {
            return false;
        };
        let command = GroupIntoFrameCommand::new(id);
        let frame_id = command.frame_id();
        self.execute_command(Box::new(command));
        self.selection.select(NodeRef::Element(frame_id));
        true
    }

    /// Removes the selected element and clears the selection.
    pub fn delete_selection(&mut self) -> bool {
        let Some(id) = self.usable_selection("Cannot delete") else {
            return false;
        };
        self.execute_command(Box::new(RemoveElementCommand::new(id)));
        self.selection.clear();
        true
    }

    /// Copies the selected element and its subtree to the clipboard.
    pub fn copy(&mut self) -> bool {
        let Some(id) = self.usable_selection("Cannot copy") else {
            return false;
        };
        let snippet = self
            .model
            .element(id)
            .map(|element| self.codec.serialize_element(element));
        match snippet {
            Ok(Ok(text)) => {
                tracing::debug!("Copied element {} ({} bytes)", id, text.len());
                self.clipboard = Some(text);
                true
            }
            Ok(Err(e)) => {
                self.record_error("Failed to copy element", &e);
                false
            }
            Err(e) => {
                self.skip("Cannot copy", e.to_string());
                false
            }
        }
    }

    /// Copy, then delete.
    pub fn cut(&mut self) -> bool {
        self.copy() && self.delete_selection()
    }

    /// Inserts a copy of the clipboard element with fresh ids, offset from
    /// the original, and selects it.
    pub fn paste(&mut self) -> Option<ElementId> {
        let Some(snippet) = self.clipboard.as_deref() else {
            self.skip("Cannot paste", "the clipboard is empty");
            return None;
        };
        let mut element = match self.codec.deserialize_element(snippet) {
            Ok(element) => element,
            Err(e) => {
                self.record_error("Failed to paste element", &e);
                return None;
            }
        };
        let Some(target) = self.paste_target() else {
            self.skip("Cannot paste", "no band to paste into");
            return None;
        };

        element.regenerate_ids();
        let offset = self.config.editing.paste_offset;
        element.x += offset;
        element.y += offset;
        let id = element.id;

        self.execute_command(Box::new(AddElementCommand::named(
            "Paste Element",
            target,
            element,
        )));
        self.selection.select(NodeRef::Element(id));
        Some(id)
    }

    /// Undoable text edit on a static text element.
    pub fn set_element_text(&mut self, id: ElementId, text: impl Into<String>) -> Result<bool> {
        let text = text.into();
        if self.model.element(id)?.text() == Some(text.as_str()) {
            return Ok(false);
        }
        let command = ChangePropertyCommand::element_text(&self.model, id, text)?;
        self.execute_command(Box::new(command));
        Ok(true)
    }

    /// Selected element that is still part of the document.
    fn usable_selection(&mut self, action: &str) -> Option<ElementId> {
        let Some(id) = self.selection.selected_element() else {
            self.skip(action, "no element is selected");
            return None;
        };
        if self.model.owner_of(id).is_none() {
            self.skip(action, format!("element {} has no owner", id));
            return None;
        }
        Some(id)
    }

    /// The selection's container, else Detail, else Title.
    fn paste_target(&self) -> Option<ContainerRef> {
        let from_selection = match self.selection.selected() {
            Some(NodeRef::Element(id)) => self.model.owner_of(id),
            Some(NodeRef::Band(band_type)) if self.model.has_band(band_type) => {
                Some(ContainerRef::Band(band_type))
            }
            _ => None,
        };
        from_selection.or_else(|| {
            [BandType::Detail, BandType::Title]
                .into_iter()
                .find(|t| self.model.has_band(*t))
                .map(ContainerRef::Band)
        })
    }
}
