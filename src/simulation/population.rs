//! Spawn/despawn plumbing that keeps the occupancy index consistent
//!
//! These functions are the only places that change collection membership.
//! Behavior code requests births and deaths through them and never edits the
//! collections or their occupancy tags directly.

use rand::Rng;

use crate::core::config::SpeciesConfig;
use crate::core::types::{Coord, EntityId, Vec2};
use crate::entity::animal::AnimalArchetype;
use crate::entity::needs::Needs;
use crate::entity::plant::PlantColony;
use crate::spatial::occupancy::{OccupancyIndex, Tag};

/// Create one agent at `position` (snapped to its cell), with a random speed
/// from the species range and random starting needs
pub fn spawn_animal(
    arch: &mut AnimalArchetype,
    occupancy: &mut OccupancyIndex,
    species: &SpeciesConfig,
    position: Vec2,
    rng: &mut impl Rng,
) -> EntityId {
    let cell = position.floored();
    let speed = rng.gen_range(species.speed_min..=species.speed_max);
    let needs = Needs::random(species, rng);
    let id = EntityId::new();

    occupancy.insert(arch.tag, cell);
    arch.spawn(id, Vec2::from(cell), speed, needs);
    tracing::trace!(?id, tag = ?arch.tag, x = cell.x, y = cell.y, "spawned");
    id
}

/// Remove the first live agent whose floored position equals `cell`
///
/// Clears its occupancy tag and marks it dead; the columns are compacted at
/// end of tick so indices stay stable for agents not yet updated. Removing
/// from a cell with no matching agent is a silent no-op - the same removal
/// can legitimately be requested twice in one tick.
pub fn remove_animal(
    arch: &mut AnimalArchetype,
    occupancy: &mut OccupancyIndex,
    cell: Coord,
) -> bool {
    for i in 0..arch.count() {
        if arch.alive[i] && arch.positions[i].floored() == cell {
            occupancy.remove(arch.tag, cell);
            arch.alive[i] = false;
            tracing::trace!(tag = ?arch.tag, x = cell.x, y = cell.y, "removed");
            return true;
        }
    }
    false
}

/// Create one plant on `cell`
pub fn spawn_plant(
    plants: &mut PlantColony,
    occupancy: &mut OccupancyIndex,
    cell: Coord,
    bite_capacity: Option<u32>,
) {
    occupancy.insert(Tag::Plant, cell);
    plants.spawn(cell, bite_capacity);
}

/// Consume one bite of the first plant on `cell`
///
/// Returns true when that bite exhausted the plant and it was removed.
/// Plants without a bite budget are never consumed away, and a cell with no
/// plant is a no-op.
pub fn bite_plant(plants: &mut PlantColony, occupancy: &mut OccupancyIndex, cell: Coord) -> bool {
    let Some(idx) = plants.cells.iter().position(|&c| c == cell) else {
        return false;
    };
    match &mut plants.bites_left[idx] {
        None => false,
        Some(bites) => {
            *bites = bites.saturating_sub(1);
            if *bites == 0 {
                occupancy.remove(Tag::Plant, cell);
                plants.cells.remove(idx);
                plants.bites_left.remove(idx);
                tracing::trace!(x = cell.x, y = cell.y, "plant depleted");
                true
            } else {
                false
            }
        }
    }
}
