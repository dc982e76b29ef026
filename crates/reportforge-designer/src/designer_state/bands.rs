//! Band add/delete for designer state.

use reportforge_core::Result;

use super::DesignerState;
use crate::commands::{AddBandCommand, ChangePropertyCommand, DeleteBandCommand};
use crate::model::{BandType, NodeRef};

impl DesignerState {
    /// Adds an absent band with the configured default height and selects
    /// it. Returns false when the band already exists.
    pub fn add_band(&mut self, band_type: BandType) -> bool {
        if self.model.has_band(band_type) {
            tracing::debug!("Band {} already present", band_type);
            return false;
        }
        let height = self.config.editing.default_band_height;
        self.execute_command(Box::new(AddBandCommand::new(band_type, height)));
        self.selection.select(NodeRef::Band(band_type));
        true
    }

    /// Adds a band by name, e.g. `"Background"`.
    pub fn add_band_by_name(&mut self, name: &str) -> Result<bool> {
        let band_type = name.parse::<BandType>()?;
        Ok(self.add_band(band_type))
    }

    /// Removes a band and everything in it.
    pub fn delete_band(&mut self, band_type: BandType) -> bool {
        if !self.model.has_band(band_type) {
            self.skip("Cannot delete band", format!("{} is not in the design", band_type));
            return false;
        }
        // execute_command drops a selection inside the removed band
        self.execute_command(Box::new(DeleteBandCommand::new(band_type)));
        true
    }

    pub fn delete_band_by_name(&mut self, name: &str) -> Result<bool> {
        let band_type = name.parse::<BandType>()?;
        Ok(self.delete_band(band_type))
    }

    /// Undoable band height edit.
    pub fn set_band_height(&mut self, band_type: BandType, height: i32) -> Result<bool> {
        let current = self
            .model
            .band(band_type)
            .map(|band| band.height);
        if current == Some(height) {
            return Ok(false);
        }
        let command = ChangePropertyCommand::band_height(&self.model, band_type, height)?;
        self.execute_command(Box::new(command));
        Ok(true)
    }
}
