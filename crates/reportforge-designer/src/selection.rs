use reportforge_core::{ElementId, Listener};

use crate::document::DesignModel;
use crate::model::{BandType, NodeRef};

/// Holds the single selected node, if any.
///
/// Listeners receive the new selection whenever it actually changes.
#[derive(Default)]
pub struct SelectionController {
    selected: Option<NodeRef>,
    listeners: Vec<Listener<Option<NodeRef>>>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<NodeRef> {
        self.selected
    }

    pub fn selected_element(&self) -> Option<ElementId> {
        self.selected.and_then(|n| n.element())
    }

    pub fn selected_band(&self) -> Option<BandType> {
        self.selected.and_then(|n| n.band())
    }

    pub fn is_selected(&self, node: NodeRef) -> bool {
        self.selected == Some(node)
    }

    /// Replace the selection. Returns false when `node` was already selected.
    pub fn select(&mut self, node: NodeRef) -> bool {
        self.set(Some(node))
    }

    pub fn clear(&mut self) -> bool {
        self.set(None)
    }

    /// Drop the selection if its node is no longer in the model
    pub fn retain_valid(&mut self, model: &DesignModel) -> bool {
        match self.selected {
            Some(node) if !model.contains(node) => {
                tracing::debug!("Selected {} no longer exists", node);
                self.clear()
            }
            _ => false,
        }
    }

    pub fn on_selection_changed(&mut self, listener: Listener<Option<NodeRef>>) {
        self.listeners.push(listener);
    }

    fn set(&mut self, selected: Option<NodeRef>) -> bool {
        if self.selected == selected {
            return false;
        }
        self.selected = selected;
        for listener in &self.listeners {
            listener(&self.selected);
        }
        true
    }
}

impl std::fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionController")
            .field("selected", &self.selected)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
