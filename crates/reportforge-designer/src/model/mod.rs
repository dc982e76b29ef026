//! Plain document types: the design tree and the references into it.
//!
//! These types carry no change notification. All edits to a live document
//! go through [`DesignModel`](crate::document::DesignModel).

mod band;
mod design;
mod element;
mod geometry;
mod node;

pub use band::{normalize_expression, Band, BandType, SplitType};
pub use design::{
    Design, MarginSide, Margins, DEFAULT_BAND_HEIGHT, DEFAULT_DESIGN_NAME, MAX_PAGE_SIZE,
};
pub use element::{
    BreakType, ChartType, Element, ElementContent, ElementKind, MIN_ELEMENT_SIZE,
};
pub use geometry::{Geometry, Point};
pub use node::{ContainerRef, NodeRef};
