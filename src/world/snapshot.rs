//! Read-only snapshots of world state for presentation layers
//!
//! Renderers consume these copies; the simulation core never depends on
//! whether or how they are drawn.

use serde::Serialize;

use crate::core::types::{Coord, Tick};
use crate::world::World;

/// Entity kind as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Plant,
    Herbivore,
    Predator,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EntitySnapshot {
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
}

/// Positions and kinds of everything alive at one instant
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub tick: Tick,
    pub width: u32,
    pub height: u32,
    pub entities: Vec<EntitySnapshot>,
}

impl WorldSnapshot {
    pub fn capture(world: &World) -> Self {
        let mut entities = Vec::with_capacity(
            world.plants.count() + world.herbivores.count() + world.predators.count(),
        );

        for cell in &world.plants.cells {
            entities.push(EntitySnapshot {
                kind: EntityKind::Plant,
                x: cell.x as f32,
                y: cell.y as f32,
            });
        }
        for i in world.herbivores.iter_living() {
            let pos = world.herbivores.positions[i];
            entities.push(EntitySnapshot {
                kind: EntityKind::Herbivore,
                x: pos.x,
                y: pos.y,
            });
        }
        for i in world.predators.iter_living() {
            let pos = world.predators.positions[i];
            entities.push(EntitySnapshot {
                kind: EntityKind::Predator,
                x: pos.x,
                y: pos.y,
            });
        }

        Self {
            tick: world.current_tick,
            width: world.config.width,
            height: world.config.height,
            entities,
        }
    }
}

/// Land/water classification copied out for renderers
///
/// Terrain never changes after generation, so one capture at startup is
/// enough for the lifetime of the world.
#[derive(Debug, Clone, Serialize)]
pub struct TerrainSnapshot {
    pub width: u32,
    pub height: u32,
    /// Row-major land flags, indexed `y * width + x`
    land: Vec<bool>,
}

impl TerrainSnapshot {
    pub fn capture(world: &World) -> Self {
        let width = world.config.width;
        let height = world.config.height;
        let mut land = Vec::with_capacity((width * height) as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                land.push(world.terrain.is_land(Coord::new(x, y)));
            }
        }
        Self { width, height, land }
    }

    pub fn is_land(&self, coord: Coord) -> bool {
        if coord.x < 0
            || coord.x >= self.width as i32
            || coord.y < 0
            || coord.y >= self.height as i32
        {
            return false;
        }
        self.land[(coord.y * self.width as i32 + coord.x) as usize]
    }
}
