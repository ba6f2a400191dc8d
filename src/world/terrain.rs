//! Terrain classification from a noise field

use noise::{NoiseFn, Perlin};

use crate::core::types::Coord;
use crate::spatial::occupancy::{OccupancyIndex, Tag};

/// Scalar noise field sampled once per coordinate at generation time
///
/// Implementations return values in `[0, 1]`.
pub trait NoiseSource {
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// Perlin-backed noise source
pub struct PerlinSource {
    perlin: Perlin,
}

impl PerlinSource {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }
}

impl NoiseSource for PerlinSource {
    fn sample(&self, x: f64, y: f64) -> f64 {
        // Perlin output lies in [-1, 1]; remap to [0, 1]
        (self.perlin.get([x, y]) + 1.0) / 2.0
    }
}

/// Constant field; produces all-land or all-water worlds
pub struct UniformSource(pub f64);

impl NoiseSource for UniformSource {
    fn sample(&self, _x: f64, _y: f64) -> f64 {
        self.0
    }
}

/// Binary land/water classification, fixed at generation time
pub struct TerrainField {
    width: i32,
    height: i32,
    land: Vec<bool>,
    land_cells: usize,
}

impl TerrainField {
    /// Classify every coordinate and mirror the result into the occupancy
    /// index, so terrain tags share the entity tag namespace
    pub fn generate(
        source: &dyn NoiseSource,
        index: &mut OccupancyIndex,
        frequency: f64,
        threshold: f64,
    ) -> Self {
        let width = index.width();
        let height = index.height();
        let mut land = vec![false; (width * height) as usize];
        let mut land_cells = 0;

        for x in 0..width {
            for y in 0..height {
                let sample = source.sample(x as f64 * frequency, y as f64 * frequency);
                let coord = Coord::new(x, y);
                if sample > threshold {
                    land[(y * width + x) as usize] = true;
                    land_cells += 1;
                    index.insert(Tag::Land, coord);
                } else {
                    index.insert(Tag::Water, coord);
                }
            }
        }

        Self {
            width,
            height,
            land,
            land_cells,
        }
    }

    /// Whether the coordinate was classified land; out of bounds is never land
    pub fn is_land(&self, coord: Coord) -> bool {
        if coord.x < 0 || coord.x >= self.width || coord.y < 0 || coord.y >= self.height {
            return false;
        }
        self.land[(coord.y * self.width + coord.x) as usize]
    }

    pub fn land_cells(&self) -> usize {
        self.land_cells
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}
