//! Undoable edits.
//!
//! Every command captures whatever it needs at construction or on first
//! execution so that `undo` restores a value-equal tree. Commands only ever
//! see the [`DesignModel`]; they cannot reach the history that runs them.
//!
//! Commands never fail outward. A write the model refuses is logged and
//! skipped.

use reportforge_core::{ElementId, ModelError};
use std::fmt;

use crate::document::{DesignModel, Property};
use crate::model::{
    Band, BandType, ContainerRef, Element, ElementContent, Geometry, MarginSide,
};

/// A reversible edit of the design model.
pub trait Command {
    /// Applies the command.
    fn execute(&mut self, model: &mut DesignModel);

    /// Reverts the command.
    fn undo(&mut self, model: &mut DesignModel);

    /// Re-applies the command after an undo.
    fn redo(&mut self, model: &mut DesignModel) {
        self.execute(model);
    }

    /// Returns the name of the command for display.
    fn name(&self) -> &str;
}

fn report<T>(command: &str, result: Result<T, ModelError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("{} skipped: {}", command, err);
            None
        }
    }
}

/// Grow `container` to hold an element ending at `bottom`
fn grow_owner(
    model: &mut DesignModel,
    command: &str,
    container: ContainerRef,
    bottom: i32,
) -> Option<(ContainerRef, i32)> {
    report(command, model.grow_container_to_fit(container, bottom))
        .flatten()
        .map(|old| (container, old))
}

fn shrink_back(model: &mut DesignModel, command: &str, grown: Option<(ContainerRef, i32)>) {
    if let Some((container, old)) = grown {
        report(command, model.set_container_height(container, old));
    }
}

/// Generic single-property edit.
///
/// Holds the old and new value and a setter that writes one of them.
pub struct ChangePropertyCommand<T> {
    name: String,
    old: T,
    new: T,
    setter: Box<dyn Fn(&mut DesignModel, T)>,
}

impl<T: Clone> ChangePropertyCommand<T> {
    pub fn new<F>(property: impl fmt::Display, old: T, new: T, setter: F) -> Self
    where
        F: Fn(&mut DesignModel, T) + 'static,
    {
        Self {
            name: format!("Change {}", property),
            old,
            new,
            setter: Box::new(setter),
        }
    }

    pub fn old_value(&self) -> &T {
        &self.old
    }

    pub fn new_value(&self) -> &T {
        &self.new
    }
}

impl ChangePropertyCommand<String> {
    pub fn query(model: &DesignModel, query: impl Into<String>) -> Self {
        Self::new(
            Property::Query,
            model.design().query.clone(),
            query.into(),
            |model, value| {
                model.set_query(value);
            },
        )
    }

    pub fn design_name(model: &DesignModel, name: impl Into<String>) -> Self {
        Self::new(
            Property::Name,
            model.design().name.clone(),
            name.into(),
            |model, value| {
                model.set_name(value);
            },
        )
    }

    pub fn element_text(
        model: &DesignModel,
        id: ElementId,
        text: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let old = model
            .element(id)?
            .text()
            .ok_or_else(|| ModelError::UnsupportedProperty {
                id,
                property: Property::Text.to_string(),
            })?
            .to_string();
        Ok(Self::new(Property::Text, old, text.into(), move |model, value| {
            report("Change Text", model.set_text(id, value));
        }))
    }
}

impl ChangePropertyCommand<i32> {
    pub fn band_height(
        model: &DesignModel,
        band_type: BandType,
        height: i32,
    ) -> Result<Self, ModelError> {
        let old = model
            .band(band_type)
            .map(|b| b.height)
            .ok_or_else(|| ModelError::BandNotFound {
                band: band_type.to_string(),
            })?;
        Ok(Self::new(Property::Height, old, height, move |model, value| {
            report("Change Height", model.set_band_height(band_type, value));
        }))
    }

    pub fn margin(model: &DesignModel, side: MarginSide, value: i32) -> Self {
        Self::new(
            Property::Margin(side),
            model.design().margins.get(side),
            value,
            move |model, value| {
                model.set_margin(side, value);
            },
        )
    }
}

impl<T: Clone> Command for ChangePropertyCommand<T> {
    fn execute(&mut self, model: &mut DesignModel) {
        (self.setter)(model, self.new.clone());
    }

    fn undo(&mut self, model: &mut DesignModel) {
        (self.setter)(model, self.old.clone());
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Moves an element within its container.
///
/// The owner grows to fit the new position; undo restores its height.
pub struct MoveElementCommand {
    id: ElementId,
    from: (i32, i32),
    to: (i32, i32),
    grown: Option<(ContainerRef, i32)>,
}

impl MoveElementCommand {
    pub fn new(id: ElementId, from: (i32, i32), to: (i32, i32)) -> Self {
        Self {
            id,
            from,
            to,
            grown: None,
        }
    }
}

impl Command for MoveElementCommand {
    fn execute(&mut self, model: &mut DesignModel) {
        let (x, y) = self.to;
        if report(self.name(), model.set_position(self.id, x, y)).is_none() {
            return;
        }
        let bottom = model.element(self.id).map(Element::bottom).unwrap_or(y);
        self.grown = model
            .owner_of(self.id)
            .and_then(|owner| grow_owner(model, "Move Element", owner, bottom));
    }

    fn undo(&mut self, model: &mut DesignModel) {
        shrink_back(model, "Move Element", self.grown.take());
        let (x, y) = self.from;
        report(self.name(), model.set_position(self.id, x, y));
    }

    fn name(&self) -> &str {
        "Move Element"
    }
}

/// Changes all four bounds of an element at once.
pub struct ResizeElementCommand {
    id: ElementId,
    from: Geometry,
    to: Geometry,
    grown: Option<(ContainerRef, i32)>,
}

impl ResizeElementCommand {
    pub fn new(id: ElementId, from: Geometry, to: Geometry) -> Self {
        Self {
            id,
            from,
            to,
            grown: None,
        }
    }
}

impl Command for ResizeElementCommand {
    fn execute(&mut self, model: &mut DesignModel) {
        if report(self.name(), model.set_bounds(self.id, self.to)).is_none() {
            return;
        }
        self.grown = model
            .owner_of(self.id)
            .and_then(|owner| grow_owner(model, "Resize Element", owner, self.to.bottom()));
    }

    fn undo(&mut self, model: &mut DesignModel) {
        shrink_back(model, "Resize Element", self.grown.take());
        report(self.name(), model.set_bounds(self.id, self.from));
    }

    fn name(&self) -> &str {
        "Resize Element"
    }
}

/// Moves an element into a different container.
///
/// The element is appended to the target at a position relative to the
/// target's origin, and the target grows to fit it.
pub struct ReassignElementCommand {
    id: ElementId,
    source: ContainerRef,
    source_index: usize,
    from: Geometry,
    target: ContainerRef,
    to: (i32, i32),
    grown: Option<(ContainerRef, i32)>,
}

impl ReassignElementCommand {
    pub fn new(
        id: ElementId,
        (source, source_index): (ContainerRef, usize),
        from: Geometry,
        target: ContainerRef,
        to: (i32, i32),
    ) -> Self {
        Self {
            id,
            source,
            source_index,
            from,
            target,
            to,
            grown: None,
        }
    }

    pub fn target(&self) -> ContainerRef {
        self.target
    }
}

impl Command for ReassignElementCommand {
    fn execute(&mut self, model: &mut DesignModel) {
        if report(self.name(), model.move_element(self.id, self.target, None)).is_none() {
            return;
        }
        let (x, y) = self.to;
        report(self.name(), model.set_position(self.id, x, y));
        self.grown = grow_owner(model, self.name(), self.target, y + self.from.height);
        tracing::debug!("Element {} moved from {} to {}", self.id, self.source, self.target);
    }

    fn undo(&mut self, model: &mut DesignModel) {
        shrink_back(model, "Move Element to Container", self.grown.take());
        let moved = model.move_element(self.id, self.source, Some(self.source_index));
        if report("Move Element to Container", moved).is_some() {
            report("Move Element to Container", model.set_bounds(self.id, self.from));
        }
    }

    fn name(&self) -> &str {
        "Move Element to Container"
    }
}

/// Inserts a new element, as for drop and paste.
pub struct AddElementCommand {
    name: String,
    id: ElementId,
    container: ContainerRef,
    /// Held here while the element is not part of the model
    element: Option<Element>,
    grown: Option<(ContainerRef, i32)>,
}

impl AddElementCommand {
    pub fn new(container: ContainerRef, element: Element) -> Self {
        Self::named("Add Element", container, element)
    }

    pub fn named(name: impl Into<String>, container: ContainerRef, element: Element) -> Self {
        Self {
            name: name.into(),
            id: element.id,
            container,
            element: Some(element),
            grown: None,
        }
    }

    pub fn element_id(&self) -> ElementId {
        self.id
    }
}

impl Command for AddElementCommand {
    fn execute(&mut self, model: &mut DesignModel) {
        let Some(element) = self.element.take() else {
            return;
        };
        let bottom = element.bottom();
        match model.add_element(self.container, element.clone()) {
            Ok(_) => {
                self.grown = grow_owner(model, &self.name, self.container, bottom);
            }
            Err(err) => {
                tracing::warn!("{} skipped: {}", self.name, err);
                self.element = Some(element);
            }
        }
    }

    fn undo(&mut self, model: &mut DesignModel) {
        shrink_back(model, &self.name, self.grown.take());
        if let Some((_, _, element)) = report(&self.name, model.remove_element(self.id)) {
            self.element = Some(element);
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Removes an element and its subtree.
pub struct RemoveElementCommand {
    id: ElementId,
    removed: Option<(ContainerRef, usize, Element)>,
}

impl RemoveElementCommand {
    pub fn new(id: ElementId) -> Self {
        Self { id, removed: None }
    }
}

impl Command for RemoveElementCommand {
    fn execute(&mut self, model: &mut DesignModel) {
        self.removed = report(self.name(), model.remove_element(self.id));
    }

    fn undo(&mut self, model: &mut DesignModel) {
        if let Some((owner, index, element)) = self.removed.take() {
            report("Delete Element", model.insert_element(owner, index, element));
        }
    }

    fn name(&self) -> &str {
        "Delete Element"
    }
}

/// Wraps an element in a new frame with exactly its bounds.
///
/// The frame takes the element's place in its owner; the element moves to
/// (0, 0) inside the frame. The frame id is fixed up front so that redo
/// recreates the same node.
pub struct GroupIntoFrameCommand {
    element_id: ElementId,
    frame_id: ElementId,
}

impl GroupIntoFrameCommand {
    pub fn new(element_id: ElementId) -> Self {
        Self {
            element_id,
            frame_id: ElementId::new(),
        }
    }

    pub fn frame_id(&self) -> ElementId {
        self.frame_id
    }
}

impl Command for GroupIntoFrameCommand {
    fn execute(&mut self, model: &mut DesignModel) {
        let Some((owner, index, mut element)) =
            report(self.name(), model.remove_element(self.element_id))
        else {
            return;
        };
        let bounds = element.geometry();
        element.x = 0;
        element.y = 0;
        let frame = Element::frame(self.frame_id, bounds, vec![element]);
        report(self.name(), model.insert_element(owner, index, frame));
    }

    fn undo(&mut self, model: &mut DesignModel) {
        let Some((owner, index, frame)) = report(self.name(), model.remove_element(self.frame_id))
        else {
            return;
        };
        let (x, y) = (frame.x, frame.y);
        let inner = match frame.content {
            ElementContent::Frame { children } => children
                .into_iter()
                .find(|child| child.id == self.element_id),
            _ => None,
        };
        if let Some(mut element) = inner {
            element.x = x;
            element.y = y;
            report(self.name(), model.insert_element(owner, index, element));
        }
    }

    fn name(&self) -> &str {
        "Group into Frame"
    }
}

/// Adds an optional band.
pub struct AddBandCommand {
    band_type: BandType,
    band: Option<Band>,
}

impl AddBandCommand {
    pub fn new(band_type: BandType, height: i32) -> Self {
        Self {
            band_type,
            band: Some(Band::new(band_type, height)),
        }
    }
}

impl Command for AddBandCommand {
    fn execute(&mut self, model: &mut DesignModel) {
        if let Some(band) = self.band.take() {
            report(self.name(), model.add_band(band));
        }
    }

    fn undo(&mut self, model: &mut DesignModel) {
        if let Some((_, band)) = report(self.name(), model.remove_band(self.band_type)) {
            self.band = Some(band);
        }
    }

    fn name(&self) -> &str {
        "Add Band"
    }
}

/// Removes a band with everything in it.
pub struct DeleteBandCommand {
    band_type: BandType,
    removed: Option<Band>,
}

impl DeleteBandCommand {
    pub fn new(band_type: BandType) -> Self {
        Self {
            band_type,
            removed: None,
        }
    }
}

impl Command for DeleteBandCommand {
    fn execute(&mut self, model: &mut DesignModel) {
        self.removed = report(self.name(), model.remove_band(self.band_type)).map(|(_, band)| band);
    }

    fn undo(&mut self, model: &mut DesignModel) {
        if let Some(band) = self.removed.take() {
            report(self.name(), model.add_band(band));
        }
    }

    fn name(&self) -> &str {
        "Delete Band"
    }
}

/// Runs several commands as one history entry.
pub struct CompositeCommand {
    name: String,
    commands: Vec<Box<dyn Command>>,
}

impl CompositeCommand {
    pub fn new(name: impl Into<String>, commands: Vec<Box<dyn Command>>) -> Self {
        Self {
            name: name.into(),
            commands,
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Command for CompositeCommand {
    fn execute(&mut self, model: &mut DesignModel) {
        for command in &mut self.commands {
            command.execute(model);
        }
    }

    fn undo(&mut self, model: &mut DesignModel) {
        for command in self.commands.iter_mut().rev() {
            command.undo(model);
        }
    }

    fn redo(&mut self, model: &mut DesignModel) {
        for command in &mut self.commands {
            command.redo(model);
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
