//! Reactive design document.
//!
//! [`DesignModel`] owns the canonical [`Design`] tree together with a parent
//! index and an event bus. Every setter writes the tree immediately and
//! publishes one [`ModelEvent`] per changed property before returning; a
//! write that leaves the value unchanged publishes nothing.
//!
//! Nodes are addressed with [`NodeRef`] / [`ContainerRef`] values rather than
//! pointers. Element ids are stable across edits, so a reference stays valid
//! for as long as the node it names is part of the document. Once the
//! document is replaced, ids from the previous generation resolve to
//! [`ModelError::StaleReference`]; older ones are simply not found.

mod events;
mod index;

pub use events::{ListChange, ModelEvent, ModelEventCategory, Property, PropertyValue};
pub use index::ParentIndex;

use reportforge_core::{ElementId, EventBus, EventFilter, ModelError, SubscriptionId};
use std::collections::{HashMap, HashSet};

use crate::model::{
    normalize_expression, Band, BandType, ContainerRef, Design, Element, ElementContent,
    Geometry, MarginSide, NodeRef, SplitType, MIN_ELEMENT_SIZE,
};

pub struct DesignModel {
    design: Design,
    index: ParentIndex,
    generation: u64,
    /// Ids from the previous generation only
    retired: HashMap<ElementId, u64>,
    bus: EventBus<ModelEvent>,
}

impl DesignModel {
    pub fn new(design: Design) -> Self {
        let mut design = design;
        design.sort_bands();
        let index = ParentIndex::build(&design);
        Self {
            design,
            index,
            generation: 0,
            retired: HashMap::new(),
            bus: EventBus::new(),
        }
    }

    pub fn design(&self) -> &Design {
        &self.design
    }

    /// Incremented every time the whole document is replaced
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Swap in a new document, invalidating every reference into the old one
    pub fn replace_design(&mut self, design: Design) -> Result<u64, ModelError> {
        design.validate()?;
        let mut design = design;
        design.sort_bands();

        self.retired.clear();
        for id in self.index.ids() {
            self.retired.insert(id, self.generation);
        }
        self.design = design;
        self.index = ParentIndex::build(&self.design);
        self.retired.retain(|id, _| !self.index.contains(*id));
        self.generation += 1;

        tracing::info!(
            "Design '{}' loaded as generation {} ({} elements)",
            self.design.name,
            self.generation,
            self.index.len()
        );
        self.publish(ModelEvent::DesignReplaced {
            generation: self.generation,
        });
        Ok(self.generation)
    }

    /// Rebuild the parent index from the tree.
    ///
    /// Element ids survive, so only references to vanished nodes go stale.
    /// Returns how many index entries were dropped.
    pub fn resync(&mut self) -> usize {
        let before: HashSet<ElementId> = self.index.ids().collect();
        self.index = ParentIndex::build(&self.design);
        let dropped = before.iter().filter(|id| !self.index.contains(**id)).count();

        tracing::debug!(
            "Resynced generation {}: {} indexed, {} dropped",
            self.generation,
            self.index.len(),
            dropped
        );
        self.publish(ModelEvent::Resynced {
            generation: self.generation,
            dropped,
        });
        dropped
    }

    /// Run a bulk edit on the raw tree, then resync.
    ///
    /// The closure must keep element ids unique.
    pub fn edit_tree<R>(&mut self, edit: impl FnOnce(&mut Design) -> R) -> R {
        let result = edit(&mut self.design);
        self.design.sort_bands();
        self.resync();
        result
    }

    // ---- subscriptions -------------------------------------------------

    pub fn subscribe<F>(&mut self, filter: EventFilter<ModelEvent>, handler: F) -> SubscriptionId
    where
        F: Fn(&ModelEvent) + 'static,
    {
        self.bus.subscribe(filter, handler)
    }

    /// Subscribe to changes of a single node
    pub fn subscribe_node<F>(&mut self, node: NodeRef, handler: F) -> SubscriptionId
    where
        F: Fn(&ModelEvent) + 'static,
    {
        self.bus
            .subscribe(EventFilter::matching(move |e: &ModelEvent| e.node() == Some(node)), handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.bus.subscriber_count()
    }

    fn publish(&mut self, event: ModelEvent) {
        tracing::trace!("{}", reportforge_core::BusEvent::description(&event));
        self.bus.publish(event);
    }

    // ---- design properties ---------------------------------------------

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.design.name == name {
            return false;
        }
        self.design.name = name.clone();
        self.publish_design(Property::Name, PropertyValue::Text(name));
        true
    }

    pub fn set_page_width(&mut self, width: i32) -> bool {
        let width = width.max(0);
        if self.design.page_width == width {
            return false;
        }
        self.design.page_width = width;
        self.publish_design(Property::PageWidth, PropertyValue::Int(width));
        true
    }

    pub fn set_page_height(&mut self, height: i32) -> bool {
        let height = height.max(0);
        if self.design.page_height == height {
            return false;
        }
        self.design.page_height = height;
        self.publish_design(Property::PageHeight, PropertyValue::Int(height));
        true
    }

    pub fn set_column_width(&mut self, width: i32) -> bool {
        let width = width.max(0);
        if self.design.column_width == width {
            return false;
        }
        self.design.column_width = width;
        self.publish_design(Property::ColumnWidth, PropertyValue::Int(width));
        true
    }

    pub fn set_margin(&mut self, side: MarginSide, value: i32) -> bool {
        let value = value.max(0);
        let slot = self.design.margins.get_mut(side);
        if *slot == value {
            return false;
        }
        *slot = value;
        self.publish_design(Property::Margin(side), PropertyValue::Int(value));
        true
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if self.design.query == query {
            return false;
        }
        self.design.query = query.clone();
        self.publish_design(Property::Query, PropertyValue::Text(query));
        true
    }

    fn publish_design(&mut self, property: Property, value: PropertyValue) {
        self.publish(ModelEvent::PropertyChanged {
            node: NodeRef::Design,
            property,
            value,
        });
    }

    // ---- bands ---------------------------------------------------------

    pub fn bands(&self) -> &[Band] {
        &self.design.bands
    }

    pub fn band(&self, band_type: BandType) -> Option<&Band> {
        self.design.band(band_type)
    }

    pub fn has_band(&self, band_type: BandType) -> bool {
        self.design.has_band(band_type)
    }

    /// Insert a band at its document-order position
    pub fn add_band(&mut self, band: Band) -> Result<usize, ModelError> {
        let mut clash = None;
        for element in &band.elements {
            element.walk(&mut |e| {
                if clash.is_none() && self.index.contains(e.id) {
                    clash = Some(e.id);
                }
            });
        }
        if let Some(id) = clash {
            return Err(ModelError::DuplicateId { id });
        }

        let band_type = band.band_type;
        let index = self.design.insert_band(band)?;
        if let Some(band) = self.design.band(band_type) {
            for element in &band.elements {
                self.index
                    .insert_subtree(element, ContainerRef::Band(band_type));
            }
        }
        tracing::debug!("Band {} added at {}", band_type, index);
        self.publish(ModelEvent::BandsChanged(ListChange::Added {
            index,
            item: band_type,
        }));
        Ok(index)
    }

    /// Remove a band with all its elements, returning its index and contents
    pub fn remove_band(&mut self, band_type: BandType) -> Result<(usize, Band), ModelError> {
        let (index, band) = self
            .design
            .remove_band(band_type)
            .ok_or_else(|| band_not_found(band_type))?;
        for element in &band.elements {
            self.index.remove_subtree(element);
        }
        tracing::debug!("Band {} removed from {}", band_type, index);
        self.publish(ModelEvent::BandsChanged(ListChange::Removed {
            index,
            item: band_type,
        }));
        Ok((index, band))
    }

    pub fn set_band_height(&mut self, band_type: BandType, height: i32) -> Result<bool, ModelError> {
        let height = height.max(0);
        let band = self
            .design
            .band_mut(band_type)
            .ok_or_else(|| band_not_found(band_type))?;
        if band.height == height {
            return Ok(false);
        }
        band.height = height;
        self.publish_band(band_type, Property::Height, PropertyValue::Int(height));
        Ok(true)
    }

    pub fn set_band_split_type(
        &mut self,
        band_type: BandType,
        split_type: SplitType,
    ) -> Result<bool, ModelError> {
        let band = self
            .design
            .band_mut(band_type)
            .ok_or_else(|| band_not_found(band_type))?;
        if band.split_type == split_type {
            return Ok(false);
        }
        band.split_type = split_type;
        self.publish_band(band_type, Property::SplitType, PropertyValue::Split(split_type));
        Ok(true)
    }

    /// Blank text clears the expression
    pub fn set_band_print_when(
        &mut self,
        band_type: BandType,
        expression: Option<String>,
    ) -> Result<bool, ModelError> {
        let expression = normalize_expression(expression);
        let band = self
            .design
            .band_mut(band_type)
            .ok_or_else(|| band_not_found(band_type))?;
        if band.print_when_expression == expression {
            return Ok(false);
        }
        band.print_when_expression = expression.clone();
        self.publish_band(
            band_type,
            Property::PrintWhenExpression,
            PropertyValue::OptText(expression),
        );
        Ok(true)
    }

    fn publish_band(&mut self, band_type: BandType, property: Property, value: PropertyValue) {
        self.publish(ModelEvent::PropertyChanged {
            node: NodeRef::Band(band_type),
            property,
            value,
        });
    }

    // ---- element reads -------------------------------------------------

    pub fn element(&self, id: ElementId) -> Result<&Element, ModelError> {
        let (band_type, chain) = self.index.path(id).ok_or_else(|| self.missing(id))?;
        let band = self
            .design
            .band(band_type)
            .ok_or(ModelError::ElementNotFound { id })?;
        descend(&band.elements, &chain).ok_or(ModelError::ElementNotFound { id })
    }

    pub fn element_geometry(&self, id: ElementId) -> Result<Geometry, ModelError> {
        self.element(id).map(Element::geometry)
    }

    /// Owning container of an element, answered from the parent index
    pub fn owner_of(&self, id: ElementId) -> Option<ContainerRef> {
        self.index.owner_of(id)
    }

    /// Position of an element within its owner's children
    pub fn index_in_container(&self, id: ElementId) -> Option<usize> {
        let owner = self.owner_of(id)?;
        self.container_children(owner)
            .ok()?
            .iter()
            .position(|e| e.id == id)
    }

    pub fn container_children(&self, container: ContainerRef) -> Result<&[Element], ModelError> {
        match container {
            ContainerRef::Band(band_type) => self
                .design
                .band(band_type)
                .map(|b| b.elements.as_slice())
                .ok_or_else(|| band_not_found(band_type)),
            ContainerRef::Frame(id) => self
                .element(id)?
                .children()
                .ok_or(ModelError::NotAContainer { id }),
        }
    }

    pub fn contains(&self, node: NodeRef) -> bool {
        self.check(node).is_ok()
    }

    /// Resolve a node reference against the current document
    pub fn check(&self, node: NodeRef) -> Result<(), ModelError> {
        match node {
            NodeRef::Design => Ok(()),
            NodeRef::Band(band_type) => {
                if self.design.has_band(band_type) {
                    Ok(())
                } else {
                    Err(band_not_found(band_type))
                }
            }
            NodeRef::Element(id) => {
                if self.index.contains(id) {
                    Ok(())
                } else {
                    Err(self.missing(id))
                }
            }
        }
    }

    pub fn check_container(&self, container: ContainerRef) -> Result<(), ModelError> {
        match container {
            ContainerRef::Band(_) => self.check(container.as_node()),
            ContainerRef::Frame(id) => {
                if self.element(id)?.is_container() {
                    Ok(())
                } else {
                    Err(ModelError::NotAContainer { id })
                }
            }
        }
    }

    pub fn element_count(&self) -> usize {
        self.index.len()
    }

    pub fn parent_index(&self) -> &ParentIndex {
        &self.index
    }

    fn missing(&self, id: ElementId) -> ModelError {
        match self.retired.get(&id) {
            Some(generation) => ModelError::StaleReference {
                what: format!("element {}", id),
                generation: *generation,
            },
            None => ModelError::ElementNotFound { id },
        }
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element, ModelError> {
        if !self.index.contains(id) {
            return Err(self.missing(id));
        }
        find_element_mut(&mut self.design, &self.index, id).ok_or(ModelError::ElementNotFound { id })
    }

    // ---- element properties --------------------------------------------

    pub fn set_x(&mut self, id: ElementId, x: i32) -> Result<bool, ModelError> {
        self.write_int(id, Property::X, x)
    }

    pub fn set_y(&mut self, id: ElementId, y: i32) -> Result<bool, ModelError> {
        self.write_int(id, Property::Y, y)
    }

    /// Widths below the size floor are raised to it
    pub fn set_width(&mut self, id: ElementId, width: i32) -> Result<bool, ModelError> {
        self.write_int(id, Property::Width, width.max(MIN_ELEMENT_SIZE))
    }

    /// Heights below the size floor are raised to it
    pub fn set_height(&mut self, id: ElementId, height: i32) -> Result<bool, ModelError> {
        self.write_int(id, Property::Height, height.max(MIN_ELEMENT_SIZE))
    }

    pub fn set_position(&mut self, id: ElementId, x: i32, y: i32) -> Result<bool, ModelError> {
        let moved_x = self.set_x(id, x)?;
        let moved_y = self.set_y(id, y)?;
        Ok(moved_x || moved_y)
    }

    /// Write all four bounds exactly as given.
    ///
    /// No size floor is applied: undo must be able to restore sizes that
    /// were legal at creation, such as a 1-unit line.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Geometry) -> Result<bool, ModelError> {
        let mut changed = self.write_int(id, Property::X, bounds.x)?;
        changed |= self.write_int(id, Property::Y, bounds.y)?;
        changed |= self.write_int(id, Property::Width, bounds.width)?;
        changed |= self.write_int(id, Property::Height, bounds.height)?;
        Ok(changed)
    }

    fn write_int(&mut self, id: ElementId, property: Property, value: i32) -> Result<bool, ModelError> {
        let element = self.element_mut(id)?;
        let slot = match property {
            Property::X => &mut element.x,
            Property::Y => &mut element.y,
            Property::Width => &mut element.width,
            Property::Height => &mut element.height,
            other => {
                return Err(ModelError::UnsupportedProperty {
                    id,
                    property: other.to_string(),
                })
            }
        };
        if *slot == value {
            return Ok(false);
        }
        *slot = value;
        self.publish_element(id, property, PropertyValue::Int(value));
        Ok(true)
    }

    /// Display text of a static text element
    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> Result<bool, ModelError> {
        let text = text.into();
        let element = self.element_mut(id)?;
        match &mut element.content {
            ElementContent::StaticText { text: current } => {
                if *current == text {
                    return Ok(false);
                }
                *current = text.clone();
            }
            _ => {
                return Err(ModelError::UnsupportedProperty {
                    id,
                    property: Property::Text.to_string(),
                })
            }
        }
        self.publish_element(id, Property::Text, PropertyValue::Text(text));
        Ok(true)
    }

    /// Expression of a text field, subreport or image.
    ///
    /// Images treat blank text as "no expression".
    pub fn set_expression(
        &mut self,
        id: ElementId,
        expression: impl Into<String>,
    ) -> Result<bool, ModelError> {
        let expression = expression.into();
        let element = self.element_mut(id)?;
        let value = match &mut element.content {
            ElementContent::TextField { expression: current }
            | ElementContent::Subreport { expression: current } => {
                if *current == expression {
                    return Ok(false);
                }
                *current = expression.clone();
                PropertyValue::Text(expression)
            }
            ElementContent::Image { expression: current } => {
                let normalized = normalize_expression(Some(expression));
                if *current == normalized {
                    return Ok(false);
                }
                *current = normalized.clone();
                PropertyValue::OptText(normalized)
            }
            _ => {
                return Err(ModelError::UnsupportedProperty {
                    id,
                    property: Property::Expression.to_string(),
                })
            }
        };
        self.publish_element(id, Property::Expression, value);
        Ok(true)
    }

    fn publish_element(&mut self, id: ElementId, property: Property, value: PropertyValue) {
        self.publish(ModelEvent::PropertyChanged {
            node: NodeRef::Element(id),
            property,
            value,
        });
    }

    // ---- structure -----------------------------------------------------

    /// Append an element to a container, returning its index
    pub fn add_element(&mut self, container: ContainerRef, element: Element) -> Result<usize, ModelError> {
        self.insert_element(container, usize::MAX, element)
    }

    /// Insert an element at `index`, clamped to the end of the children
    pub fn insert_element(
        &mut self,
        container: ContainerRef,
        index: usize,
        element: Element,
    ) -> Result<usize, ModelError> {
        self.check_container(container)?;
        let mut clash = None;
        element.walk(&mut |e| {
            if clash.is_none() && self.index.contains(e.id) {
                clash = Some(e.id);
            }
        });
        if let Some(id) = clash {
            return Err(ModelError::DuplicateId { id });
        }

        let id = element.id;
        let children = container_children_mut(&mut self.design, &self.index, container)?;
        let index = index.min(children.len());
        children.insert(index, element);
        self.index.insert_subtree(&children[index], container);
        for new_id in children[index].subtree_ids() {
            self.retired.remove(&new_id);
        }

        self.publish(ModelEvent::ChildrenChanged {
            container,
            change: ListChange::Added { index, item: id },
        });
        Ok(index)
    }

    /// Detach an element (with its subtree) from its owner
    pub fn remove_element(&mut self, id: ElementId) -> Result<(ContainerRef, usize, Element), ModelError> {
        let owner = self.index.owner_of(id).ok_or_else(|| self.missing(id))?;
        let children = container_children_mut(&mut self.design, &self.index, owner)?;
        let index = children
            .iter()
            .position(|e| e.id == id)
            .ok_or(ModelError::ElementNotFound { id })?;
        let element = children.remove(index);
        self.index.remove_subtree(&element);

        self.publish(ModelEvent::ChildrenChanged {
            container: owner,
            change: ListChange::Removed { index, item: id },
        });
        Ok((owner, index, element))
    }

    /// Reparent an element, keeping its id and subtree.
    ///
    /// `index` of `None` appends. Returns the new index.
    pub fn move_element(
        &mut self,
        id: ElementId,
        target: ContainerRef,
        index: Option<usize>,
    ) -> Result<usize, ModelError> {
        if let ContainerRef::Frame(frame) = target {
            if self.index.is_within(frame, id) {
                return Err(ModelError::CyclicPlacement { id });
            }
        }
        self.check(NodeRef::Element(id))?;
        self.check_container(target)?;

        let (_, _, element) = self.remove_element(id)?;
        self.insert_element(target, index.unwrap_or(usize::MAX), element)
    }

    // ---- containers ----------------------------------------------------

    pub fn container_height(&self, container: ContainerRef) -> Result<i32, ModelError> {
        match container {
            ContainerRef::Band(band_type) => self
                .design
                .band(band_type)
                .map(|b| b.height)
                .ok_or_else(|| band_not_found(band_type)),
            ContainerRef::Frame(id) => Ok(self.element(id)?.height),
        }
    }

    /// Exact height write for a band or frame
    pub fn set_container_height(&mut self, container: ContainerRef, height: i32) -> Result<bool, ModelError> {
        match container {
            ContainerRef::Band(band_type) => self.set_band_height(band_type, height),
            ContainerRef::Frame(id) => self.write_int(id, Property::Height, height),
        }
    }

    /// Grow a container so that `required` fits, returning the old height
    /// when it had to grow.
    pub fn grow_container_to_fit(
        &mut self,
        container: ContainerRef,
        required: i32,
    ) -> Result<Option<i32>, ModelError> {
        let current = self.container_height(container)?;
        if required <= current {
            return Ok(None);
        }
        self.set_container_height(container, required)?;
        tracing::debug!("{} grown from {} to {}", container, current, required);
        Ok(Some(current))
    }
}

impl Default for DesignModel {
    fn default() -> Self {
        Self::new(Design::default())
    }
}

impl std::fmt::Debug for DesignModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesignModel")
            .field("name", &self.design.name)
            .field("generation", &self.generation)
            .field("elements", &self.index.len())
            .field("subscribers", &self.bus.subscriber_count())
            .finish()
    }
}

fn band_not_found(band_type: BandType) -> ModelError {
    ModelError::BandNotFound {
        band: band_type.to_string(),
    }
}

fn descend<'a>(children: &'a [Element], chain: &[ElementId]) -> Option<&'a Element> {
    let (first, rest) = chain.split_first()?;
    let element = children.iter().find(|e| e.id == *first)?;
    if rest.is_empty() {
        Some(element)
    } else {
        descend(element.children()?, rest)
    }
}

fn descend_mut<'a>(children: &'a mut [Element], chain: &[ElementId]) -> Option<&'a mut Element> {
    let (first, rest) = chain.split_first()?;
    let element = children.iter_mut().find(|e| e.id == *first)?;
    if rest.is_empty() {
        Some(element)
    } else {
        descend_mut(element.children_mut()?, rest)
    }
}

fn find_element_mut<'a>(
    design: &'a mut Design,
    index: &ParentIndex,
    id: ElementId,
) -> Option<&'a mut Element> {
    let (band_type, chain) = index.path(id)?;
    descend_mut(&mut design.band_mut(band_type)?.elements, &chain)
}

fn container_children_mut<'a>(
    design: &'a mut Design,
    index: &ParentIndex,
    container: ContainerRef,
) -> Result<&'a mut Vec<Element>, ModelError> {
    match container {
        ContainerRef::Band(band_type) => design
            .band_mut(band_type)
            .map(|b| &mut b.elements)
            .ok_or_else(|| band_not_found(band_type)),
        ContainerRef::Frame(id) => find_element_mut(design, index, id)
            .ok_or(ModelError::ElementNotFound { id })?
            .children_mut()
            .ok_or(ModelError::NotAContainer { id }),
    }
}
