//! Page-space placement of bands and elements.
//!
//! Bands are stacked top to bottom in document order, starting at the top
//! margin, spanning the page width between the side margins. Element
//! coordinates are relative to their owner, so absolute positions are found
//! by summing origins up the owner chain.

use reportforge_core::{ElementId, ModelError};

use crate::document::DesignModel;
use crate::model::{BandType, ContainerRef, Element, Geometry, Point};

/// Band rectangles of one model state
pub struct PageLayout<'a> {
    model: &'a DesignModel,
    bands: Vec<(BandType, Geometry)>,
}

impl<'a> PageLayout<'a> {
    pub fn new(model: &'a DesignModel) -> Self {
        let design = model.design();
        let x = design.margins.left;
        let width = (design.page_width - design.margins.left - design.margins.right).max(0);
        let mut y = design.margins.top;
        let bands = design
            .bands
            .iter()
            .map(|band| {
                let rect = Geometry::new(x, y, width, band.height);
                y += band.height;
                (band.band_type, rect)
            })
            .collect();
        Self { model, bands }
    }

    pub fn band_rect(&self, band_type: BandType) -> Option<Geometry> {
        self.bands
            .iter()
            .find(|(t, _)| *t == band_type)
            .map(|(_, rect)| *rect)
    }

    /// Absolute page origin of a band or frame
    pub fn container_origin(&self, container: ContainerRef) -> Result<(i32, i32), ModelError> {
        match container {
            ContainerRef::Band(band_type) => self
                .band_rect(band_type)
                .map(|rect| (rect.x, rect.y))
                .ok_or_else(|| ModelError::BandNotFound {
                    band: band_type.to_string(),
                }),
            ContainerRef::Frame(id) => self.element_rect(id).map(|rect| (rect.x, rect.y)),
        }
    }

    /// Absolute page bounds of an element
    pub fn element_rect(&self, id: ElementId) -> Result<Geometry, ModelError> {
        let element = self.model.element(id)?;
        let owner = self
            .model
            .owner_of(id)
            .ok_or(ModelError::ElementNotFound { id })?;
        let (ox, oy) = self.container_origin(owner)?;
        Ok(element.geometry().translated(ox, oy))
    }

    /// Deepest container under `point`.
    ///
    /// Bands are tried in document order and the first match wins. Inside
    /// a band the topmost frame containing the point is followed down.
    /// `exclude` and its subtree are never returned.
    pub fn hit_test(&self, point: Point, exclude: Option<ElementId>) -> Option<ContainerRef> {
        let (band_type, rect) = self.bands.iter().find(|(_, rect)| rect.contains(point))?;
        let band = self.model.band(*band_type)?;
        let mut container = ContainerRef::Band(*band_type);
        let mut origin = (rect.x, rect.y);
        let mut children: &[Element] = &band.elements;

        while let Some(frame) = children.iter().rev().find(|e| {
            e.is_container()
                && Some(e.id) != exclude
                && e.geometry().translated(origin.0, origin.1).contains(point)
        }) {
            container = ContainerRef::Frame(frame.id);
            origin = (origin.0 + frame.x, origin.1 + frame.y);
            children = frame.children().unwrap_or(&[]);
        }
        Some(container)
    }

    /// Topmost element under `point`, descending into frames
    pub fn element_at(&self, point: Point) -> Option<ElementId> {
        let (band_type, rect) = self.bands.iter().find(|(_, rect)| rect.contains(point))?;
        let band = self.model.band(*band_type)?;
        let mut origin = (rect.x, rect.y);
        let mut children: &[Element] = &band.elements;
        let mut hit = None;

        while let Some(element) = children
            .iter()
            .rev()
            .find(|e| e.geometry().translated(origin.0, origin.1).contains(point))
        {
            hit = Some(element.id);
            origin = (origin.0 + element.x, origin.1 + element.y);
            children = element.children().unwrap_or(&[]);
        }
        hit
    }
}
