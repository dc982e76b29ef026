use reportforge_core::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::band::{Band, BandType};
use super::element::Element;

pub const DEFAULT_DESIGN_NAME: &str = "NewReport";
pub const DEFAULT_BAND_HEIGHT: i32 = 50;
/// Largest page edge a document may declare
pub const MAX_PAGE_SIZE: i32 = 14_400;

fn invalid(what: &str, value: i32) -> ModelError {
    ModelError::InvalidValue {
        what: what.to_string(),
        value: value.to_string(),
    }
}

/// Page margins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Margins {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarginSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl Margins {
    pub fn get(&self, side: MarginSide) -> i32 {
        match side {
            MarginSide::Left => self.left,
            MarginSide::Right => self.right,
            MarginSide::Top => self.top,
            MarginSide::Bottom => self.bottom,
        }
    }

    pub fn get_mut(&mut self, side: MarginSide) -> &mut i32 {
        match side {
            MarginSide::Left => &mut self.left,
            MarginSide::Right => &mut self.right,
            MarginSide::Top => &mut self.top,
            MarginSide::Bottom => &mut self.bottom,
        }
    }
}

/// The canonical document tree.
///
/// Bands are kept sorted by [`BandType`] order and at most one band of
/// each type exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    pub name: String,
    pub page_width: i32,
    pub page_height: i32,
    pub column_width: i32,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default)]
    pub query: String,
    pub bands: Vec<Band>,
}

impl Design {
    /// A4 portrait design with the mandatory bands at `band_height`
    pub fn new_blank(band_height: i32) -> Self {
        Self {
            name: DEFAULT_DESIGN_NAME.to_string(),
            page_width: 595,
            page_height: 842,
            column_width: 555,
            margins: Margins::default(),
            query: String::new(),
            bands: BandType::MANDATORY
                .into_iter()
                .map(|t| Band::new(t, band_height))
                .collect(),
        }
    }

    pub fn band(&self, band_type: BandType) -> Option<&Band> {
        self.bands.iter().find(|b| b.band_type == band_type)
    }

    pub fn band_mut(&mut self, band_type: BandType) -> Option<&mut Band> {
        self.bands.iter_mut().find(|b| b.band_type == band_type)
    }

    pub fn has_band(&self, band_type: BandType) -> bool {
        self.band(band_type).is_some()
    }

    /// Insert a band at its document-order position, returning the index
    pub fn insert_band(&mut self, band: Band) -> Result<usize, ModelError> {
        if self.has_band(band.band_type) {
            return Err(ModelError::BandExists {
                band: band.band_type.to_string(),
            });
        }
        let index = self
            .bands
            .iter()
            .position(|b| b.band_type > band.band_type)
            .unwrap_or(self.bands.len());
        self.bands.insert(index, band);
        Ok(index)
    }

    /// Remove a band, returning its former index and the band
    pub fn remove_band(&mut self, band_type: BandType) -> Option<(usize, Band)> {
        let index = self.bands.iter().position(|b| b.band_type == band_type)?;
        Some((index, self.bands.remove(index)))
    }

    pub fn element_count(&self) -> usize {
        let mut count = 0;
        for band in &self.bands {
            for element in &band.elements {
                element.walk(&mut |_| count += 1);
            }
        }
        count
    }

    /// Check the structural rules a loaded document must satisfy
    pub fn validate(&self) -> Result<(), ModelError> {
        for (what, value) in [
            ("page width", self.page_width),
            ("page height", self.page_height),
        ] {
            if value <= 0 || value > MAX_PAGE_SIZE {
                return Err(invalid(what, value));
            }
        }
        for (side, value) in [
            ("left margin", self.margins.left),
            ("right margin", self.margins.right),
            ("top margin", self.margins.top),
            ("bottom margin", self.margins.bottom),
        ] {
            if value < 0 {
                return Err(invalid(side, value));
            }
        }

        let mut seen_bands = HashSet::new();
        for band in &self.bands {
            if !seen_bands.insert(band.band_type) {
                return Err(ModelError::BandExists {
                    band: band.band_type.to_string(),
                });
            }
            if band.height < 0 {
                return Err(invalid(&format!("{} band height", band.band_type), band.height));
            }
        }

        let mut seen_ids = HashSet::new();
        let mut problem = None;
        for band in &self.bands {
            for element in &band.elements {
                element.walk(&mut |e| {
                    if problem.is_some() {
                        return;
                    }
                    if !seen_ids.insert(e.id) {
                        problem = Some(ModelError::DuplicateId { id: e.id });
                    } else if e.width < 0 {
                        problem = Some(invalid(&format!("width of element {}", e.id), e.width));
                    } else if e.height < 0 {
                        problem = Some(invalid(&format!("height of element {}", e.id), e.height));
                    }
                });
            }
        }
        match problem {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Put bands back into document order
    pub fn sort_bands(&mut self) {
        self.bands.sort_by_key(|b| b.band_type);
    }
}

impl Default for Design {
    fn default() -> Self {
        Self::new_blank(DEFAULT_BAND_HEIGHT)
    }
}
