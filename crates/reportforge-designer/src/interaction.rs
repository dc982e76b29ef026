//! Pointer gestures: press, drag, release.
//!
//! A press captures an immutable [`GestureSnapshot`]. Drags compute
//! candidates from that snapshot and write them straight into the model, so
//! the live state is visible but nothing is recorded yet. Release compares
//! the final geometry with the snapshot and hands back at most one command
//! describing the net change.

use reportforge_core::{ElementId, GestureError, ModelError, Result};

use crate::commands::{Command, MoveElementCommand, ReassignElementCommand, ResizeElementCommand};
use crate::document::DesignModel;
use crate::layout::PageLayout;
use crate::model::{ContainerRef, Geometry, NodeRef, Point, MIN_ELEMENT_SIZE};
use crate::viewport::Viewport;

/// Resize handle positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::TopLeft,
        Handle::Top,
        Handle::TopRight,
        Handle::Right,
        Handle::BottomRight,
        Handle::Bottom,
        Handle::BottomLeft,
        Handle::Left,
    ];

    pub fn moves_left(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::Left | Handle::BottomLeft)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, Handle::TopRight | Handle::Right | Handle::BottomRight)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::Top | Handle::TopRight)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, Handle::BottomLeft | Handle::Bottom | Handle::BottomRight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    Move,
    Resize(Handle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Pressed,
    Dragging,
}

/// Everything captured at press time
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSnapshot {
    pub element: ElementId,
    pub mode: GestureMode,
    /// Pointer position in scene coordinates
    pub start: Point,
    pub initial: Geometry,
    pub zoom: f64,
    /// Grid size when snapping is on
    pub grid: Option<u32>,
    pub source: ContainerRef,
    pub source_index: usize,
}

impl GestureSnapshot {
    /// Pointer travel since press, in page units
    pub fn delta(&self, pointer: Point) -> (f64, f64) {
        (
            (pointer.x - self.start.x) / self.zoom,
            (pointer.y - self.start.y) / self.zoom,
        )
    }
}

/// Quantize to the nearest grid line, then truncate to an integer.
pub fn snap(value: f64, grid: Option<u32>) -> i32 {
    match grid {
        Some(g) if g > 0 => {
            let g = g as f64;
            ((value / g).round() * g) as i32
        }
        _ => value as i32,
    }
}

/// Position a move gesture would give the element for `pointer`
pub fn move_candidate(snapshot: &GestureSnapshot, pointer: Point) -> (i32, i32) {
    let (dx, dy) = snapshot.delta(pointer);
    (
        snap(snapshot.initial.x as f64 + dx, snapshot.grid),
        snap(snapshot.initial.y as f64 + dy, snapshot.grid),
    )
}

/// Bounds a resize gesture would give the element for `pointer`.
///
/// Left and top handles move the origin and keep the opposite edge fixed.
/// An axis whose candidate size falls under the floor keeps its `current`
/// value.
pub fn resize_candidate(
    snapshot: &GestureSnapshot,
    handle: Handle,
    current: Geometry,
    pointer: Point,
) -> Geometry {
    let (dx, dy) = snapshot.delta(pointer);
    let initial = snapshot.initial;
    let grid = snapshot.grid;
    let mut next = current;

    if handle.moves_left() {
        let x = snap(initial.x as f64 + dx, grid);
        let width = initial.width - (x - initial.x);
        if width >= MIN_ELEMENT_SIZE {
            next.x = x;
            next.width = width;
        }
    } else if handle.moves_right() {
        let width = snap(initial.width as f64 + dx, grid);
        if width >= MIN_ELEMENT_SIZE {
            next.width = width;
        }
    }

    if handle.moves_top() {
        let y = snap(initial.y as f64 + dy, grid);
        let height = initial.height - (y - initial.y);
        if height >= MIN_ELEMENT_SIZE {
            next.y = y;
            next.height = height;
        }
    } else if handle.moves_bottom() {
        let height = snap(initial.height as f64 + dy, grid);
        if height >= MIN_ELEMENT_SIZE {
            next.height = height;
        }
    }

    next
}

/// Gesture state machine: Idle → Pressed → Dragging → Idle
#[derive(Debug, Default)]
pub struct InteractionController {
    phase: GesturePhase,
    snapshot: Option<GestureSnapshot>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn snapshot(&self) -> Option<&GestureSnapshot> {
        self.snapshot.as_ref()
    }

    /// Start a gesture on an element.
    ///
    /// Refused while another gesture is live.
    pub fn press(
        &mut self,
        model: &DesignModel,
        target: NodeRef,
        pointer: Point,
        mode: GestureMode,
        zoom: f64,
        grid: Option<u32>,
    ) -> Result<&GestureSnapshot> {
        if self.snapshot.is_some() {
            return Err(GestureError::GestureInProgress.into());
        }
        let NodeRef::Element(element) = target else {
            return Err(GestureError::NotAnElement(target.to_string()).into());
        };

        let initial = model.element_geometry(element)?;
        let source = model
            .owner_of(element)
            .ok_or(ModelError::ElementNotFound { id: element })?;
        let source_index = model.index_in_container(element).unwrap_or(0);

        tracing::debug!("Press on {} ({:?}) at {:?}", element, mode, pointer);
        self.phase = GesturePhase::Pressed;
        Ok(self.snapshot.insert(GestureSnapshot {
            element,
            mode,
            start: pointer,
            initial,
            zoom: if zoom > 0.0 { zoom } else { 1.0 },
            grid,
            source,
            source_index,
        }))
    }

    /// Write the live candidate for `pointer` into the model
    pub fn drag(&mut self, model: &mut DesignModel, pointer: Point) -> Result<Geometry> {
        let snapshot = self.snapshot.as_ref().ok_or(GestureError::NoGesture)?;
        let current = model.element_geometry(snapshot.element)?;
        let next = match snapshot.mode {
            GestureMode::Move => {
                let (x, y) = move_candidate(snapshot, pointer);
                current.with_position(x, y)
            }
            GestureMode::Resize(handle) => resize_candidate(snapshot, handle, current, pointer),
        };
        model.set_bounds(snapshot.element, next)?;
        self.phase = GesturePhase::Dragging;
        Ok(next)
    }

    /// Abandon the gesture, restoring the pressed geometry.
    ///
    /// Returns false when no gesture was live.
    pub fn cancel(&mut self, model: &mut DesignModel) -> Result<bool> {
        let Some(snapshot) = self.snapshot.take() else {
            return Ok(false);
        };
        self.phase = GesturePhase::Idle;
        tracing::debug!("Gesture on {} cancelled", snapshot.element);
        model.set_bounds(snapshot.element, snapshot.initial)?;
        Ok(true)
    }

    /// Finish the gesture and describe its net effect.
    ///
    /// Returns `None` when the geometry ended where it started. A move
    /// released over a different container becomes a reassignment.
    pub fn release(
        &mut self,
        model: &DesignModel,
        pointer: Point,
        viewport: &Viewport,
    ) -> Result<Option<Box<dyn Command>>> {
        let snapshot = self.snapshot.take().ok_or(GestureError::NoGesture)?;
        self.phase = GesturePhase::Idle;

        let id = snapshot.element;
        let last = model.element_geometry(id)?;
        if last == snapshot.initial {
            tracing::debug!("Gesture on {} ended without change", id);
            return Ok(None);
        }

        let command: Box<dyn Command> = match snapshot.mode {
            GestureMode::Resize(_) => Box::new(ResizeElementCommand::new(id, snapshot.initial, last)),
            GestureMode::Move => {
                let layout = PageLayout::new(model);
                let page = viewport.scene_to_page(pointer);
                match layout.hit_test(page, Some(id)) {
                    Some(target) if target != snapshot.source => {
                        let (sx, sy) = layout.container_origin(snapshot.source)?;
                        let (tx, ty) = layout.container_origin(target)?;
                        let x = sx + last.x - tx;
                        let y = (sy + last.y - ty).max(0);
                        tracing::debug!("Element {} dropped into {} at ({}, {})", id, target, x, y);
                        Box::new(ReassignElementCommand::new(
                            id,
                            (snapshot.source, snapshot.source_index),
                            snapshot.initial,
                            target,
                            (x, y),
                        ))
                    }
                    _ => Box::new(MoveElementCommand::new(
                        id,
                        (snapshot.initial.x, snapshot.initial.y),
                        (last.x, last.y),
                    )),
                }
            }
        };
        Ok(Some(command))
    }
}
