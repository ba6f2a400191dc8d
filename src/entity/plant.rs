//! Stationary food sources

use crate::core::types::Coord;

/// SoA storage for plants
///
/// Plants never move or act; they exist as cells in the occupancy index plus
/// an optional remaining-bite budget. `bites_left` of `None` marks a plant
/// that can be grazed forever.
pub struct PlantColony {
    pub cells: Vec<Coord>,
    pub bites_left: Vec<Option<u32>>,
}

impl PlantColony {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            bites_left: Vec::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.cells.len()
    }

    pub fn spawn(&mut self, cell: Coord, bite_capacity: Option<u32>) {
        self.cells.push(cell);
        self.bites_left.push(bite_capacity);
    }
}

impl Default for PlantColony {
    fn default() -> Self {
        Self::new()
    }
}
