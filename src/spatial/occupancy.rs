//! Dense per-cell occupancy index
//!
//! One tag list per coordinate records which entity and terrain kinds sit on
//! that cell. Every other system (terrain lookups, radial scans, proximity
//! windows, collision-style checks) answers "what is here" through this index,
//! and its bounds check is the single definition of which coordinates exist.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::types::Coord;

/// Entity or terrain kind stored in the occupancy index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Land,
    Water,
    Plant,
    Herbivore,
    Predator,
}

/// Per-cell tag list; stays inline for the common case of terrain plus a
/// couple of entities
type CellTags = SmallVec<[Tag; 4]>;

/// Dense grid of insertion-ordered tag lists, one per coordinate
///
/// Callers are responsible for never inserting the same entity's tag twice:
/// the index does not de-duplicate, so a duplicate insert is an upstream bug,
/// not a handled case. Out-of-bounds coordinates are silently absent for all
/// three operations.
#[derive(Debug, Clone)]
pub struct OccupancyIndex {
    width: i32,
    height: i32,
    cells: Vec<CellTags>,
}

impl OccupancyIndex {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            cells: vec![CellTags::new(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether a coordinate exists at all: `0 <= x < width`, `0 <= y < height`
    #[inline]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    #[inline]
    fn cell_index(&self, coord: Coord) -> usize {
        (coord.y * self.width + coord.x) as usize
    }

    /// Append `tag` to the cell's list; no-op out of bounds
    pub fn insert(&mut self, tag: Tag, coord: Coord) {
        if self.in_bounds(coord) {
            let idx = self.cell_index(coord);
            self.cells[idx].push(tag);
        }
    }

    /// True iff the coordinate is in bounds and its list holds `tag`
    pub fn contains(&self, tag: Tag, coord: Coord) -> bool {
        if !self.in_bounds(coord) {
            return false;
        }
        self.cells[self.cell_index(coord)].contains(&tag)
    }

    /// Remove the first occurrence of `tag` from the cell's list; no-op when
    /// absent or out of bounds
    pub fn remove(&mut self, tag: Tag, coord: Coord) {
        if !self.in_bounds(coord) {
            return;
        }
        let idx = self.cell_index(coord);
        if let Some(pos) = self.cells[idx].iter().position(|&t| t == tag) {
            self.cells[idx].remove(pos);
        }
    }

    /// All tags currently on a cell, in insertion order; empty out of bounds
    pub fn tags_at(&self, coord: Coord) -> &[Tag] {
        if !self.in_bounds(coord) {
            return &[];
        }
        &self.cells[self.cell_index(coord)]
    }
}
