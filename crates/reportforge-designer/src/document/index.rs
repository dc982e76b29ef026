use reportforge_core::ElementId;
use std::collections::HashMap;

use crate::model::{BandType, ContainerRef, Design, Element};

/// Owner of every element in the design, keyed by element id
#[derive(Debug, Clone, Default)]
pub struct ParentIndex {
    owners: HashMap<ElementId, ContainerRef>,
}

impl ParentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(design: &Design) -> Self {
        let mut index = Self::new();
        for band in &design.bands {
            for element in &band.elements {
                index.insert_subtree(element, ContainerRef::Band(band.band_type));
            }
        }
        index
    }

    /// Record `element` under `owner` and its descendants under their frames
    pub fn insert_subtree(&mut self, element: &Element, owner: ContainerRef) {
        self.owners.insert(element.id, owner);
        if let Some(children) = element.children() {
            for child in children {
                self.insert_subtree(child, ContainerRef::Frame(element.id));
            }
        }
    }

    pub fn remove_subtree(&mut self, element: &Element) {
        element.walk(&mut |e| {
            self.owners.remove(&e.id);
        });
    }

    pub fn owner_of(&self, id: ElementId) -> Option<ContainerRef> {
        self.owners.get(&id).copied()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.owners.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.owners.keys().copied()
    }

    /// The band holding `id` and the frame chain leading down to it.
    ///
    /// The chain starts at the outermost frame and ends with `id` itself.
    pub fn path(&self, id: ElementId) -> Option<(BandType, Vec<ElementId>)> {
        let mut chain = vec![id];
        let mut owner = self.owner_of(id)?;
        loop {
            match owner {
                ContainerRef::Band(band) => {
                    chain.reverse();
                    return Some((band, chain));
                }
                ContainerRef::Frame(frame) => {
                    // A corrupt index could loop forever
                    if chain.len() > self.owners.len() {
                        return None;
                    }
                    chain.push(frame);
                    owner = self.owner_of(frame)?;
                }
            }
        }
    }

    /// True when `ancestor` is `id` or one of its enclosing frames
    pub fn is_within(&self, id: ElementId, ancestor: ElementId) -> bool {
        self.path(id)
            .map(|(_, chain)| chain.contains(&ancestor))
            .unwrap_or(false)
    }
}
