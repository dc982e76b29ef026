//! Undo/redo stacks.

use reportforge_core::Listener;

use crate::commands::Command;
use crate::document::DesignModel;

pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Availability of undo and redo, published after every history change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryState {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// LIFO undo/redo over boxed commands.
///
/// Executing a new command discards the redo lineage. The undo stack is
/// trimmed from the bottom once it exceeds `max_depth`.
pub struct HistoryManager {
    undo_stack: Vec<Box<dyn Command>>,
    redo_stack: Vec<Box<dyn Command>>,
    max_depth: usize,
    listeners: Vec<Listener<HistoryState>>,
}

impl HistoryManager {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
            listeners: Vec::new(),
        }
    }

    /// Runs a command and records it for undo.
    pub fn execute(&mut self, mut command: Box<dyn Command>, model: &mut DesignModel) {
        tracing::debug!("Executing '{}'", command.name());
        command.execute(model);
        self.undo_stack.push(command);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
        self.emit();
    }

    /// Undoes the most recent command. Returns false when there is none.
    pub fn undo(&mut self, model: &mut DesignModel) -> bool {
        let Some(mut command) = self.undo_stack.pop() else {
            return false;
        };
        tracing::debug!("Undo '{}'", command.name());
        command.undo(model);
        self.redo_stack.push(command);
        self.emit();
        true
    }

    /// Re-applies the most recently undone command.
    pub fn redo(&mut self, model: &mut DesignModel) -> bool {
        let Some(mut command) = self.redo_stack.pop() else {
            return false;
        };
        tracing::debug!("Redo '{}'", command.name());
        command.redo(model);
        self.undo_stack.push(command);
        self.emit();
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_name(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.name())
    }

    pub fn redo_name(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.name())
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Drops both stacks, e.g. when the document is replaced.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.emit();
    }

    pub fn state(&self) -> HistoryState {
        HistoryState {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    /// Registers a listener for undo/redo availability.
    pub fn on_state_changed(&mut self, listener: Listener<HistoryState>) {
        self.listeners.push(listener);
    }

    fn emit(&self) {
        let state = self.state();
        for listener in &self.listeners {
            listener(&state);
        }
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl std::fmt::Debug for HistoryManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryManager")
            .field("undo", &self.undo_stack.len())
            .field("redo", &self.redo_stack.len())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
