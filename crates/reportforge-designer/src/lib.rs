//! # ReportForge Designer
//!
//! The interactive document core of a visual report-layout editor. It holds
//! the design tree, edits it through undoable commands, tracks the single
//! selection and turns pointer gestures into moves, resizes and container
//! reassignments.
//!
//! ## Core Components
//!
//! - **Model**: plain data for designs, bands and elements
//! - **Document**: [`DesignModel`], the write-through reactive wrapper
//!   that publishes a change event for every edit
//! - **Commands/History**: the [`Command`] trait and [`HistoryManager`]
//! - **Selection**: [`SelectionController`]
//! - **Interaction**: the press/drag/release state machine and snapping
//! - **Collaborators**: [`DesignCodec`] for text forms, [`ReportRenderer`]
//!   for previews
//!
//! ## Architecture
//!
//! ```text
//! DesignerState (facade a UI talks to)
//!   ├── DesignModel (tree + parent index + event bus)
//!   ├── HistoryManager (undo/redo over commands)
//!   ├── SelectionController
//!   ├── InteractionController ── PageLayout (hit testing)
//!   ├── Viewport (zoom/pan)
//!   └── DesignCodec, PreviewRunner
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use reportforge_designer::{BandType, ContainerRef, DesignerState, ElementKind};
//!
//! let mut state = DesignerState::default();
//! let id = state
//!     .drop_element(ElementKind::StaticText, 0, 0, ContainerRef::Band(BandType::Detail))
//!     .unwrap();
//! assert!(state.model().element(id).is_ok());
//!
//! state.undo();
//! assert!(state.model().element(id).is_err());
//! ```

pub mod commands;
pub mod designer_state;
pub mod document;
pub mod history;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod preview;
pub mod selection;
pub mod serialization;
pub mod viewport;

pub use reportforge_core::ElementId;

pub use commands::{
    AddBandCommand, AddElementCommand, ChangePropertyCommand, Command, CompositeCommand,
    DeleteBandCommand, GroupIntoFrameCommand, MoveElementCommand, ReassignElementCommand,
    RemoveElementCommand, ResizeElementCommand,
};
pub use designer_state::{DesignerState, ViewMode};
pub use document::{
    DesignModel, ListChange, ModelEvent, ModelEventCategory, ParentIndex, Property, PropertyValue,
};
pub use history::{HistoryManager, HistoryState, DEFAULT_HISTORY_DEPTH};
pub use interaction::{
    move_candidate, resize_candidate, snap, GestureMode, GesturePhase, GestureSnapshot, Handle,
    InteractionController,
};
pub use layout::PageLayout;
pub use model::{
    Band, BandType, BreakType, ChartType, ContainerRef, Design, Element, ElementContent,
    ElementKind, Geometry, MarginSide, Margins, NodeRef, Point, SplitType, MIN_ELEMENT_SIZE,
};
pub use preview::{OutlineRenderer, PageImage, PreviewResult, PreviewRunner, ReportRenderer};
pub use selection::SelectionController;
pub use serialization::{DesignCodec, DesignFile, JsonDesignCodec, DESIGN_FORMAT_VERSION};
pub use viewport::Viewport;
