//! Needs-driven decision and movement, one agent at a time
//!
//! Every tick an agent raises its needs, rescans its surroundings, picks the
//! highest-priority satisfiable goal (food, then water, then a mate, then
//! roaming), applies any consumption or reproduction side effect, dies if a
//! need ran past its maximum, and finally integrates one movement step toward
//! the current goal.

use rand::Rng;
use std::f32::consts::TAU;

use crate::core::config::SpeciesConfig;
use crate::core::types::{Coord, Vec2};
use crate::entity::animal::AnimalArchetype;
use crate::simulation::population;
use crate::simulation::tick::SimulationEvent;
use crate::spatial::occupancy::{OccupancyIndex, Tag};
use crate::spatial::scan;
use crate::world::terrain::TerrainField;
use crate::world::World;

/// Distance to the current roam target under which a fresh one is picked
const ROAM_RETARGET_DISTANCE: f32 = 5.0;

/// Cap on roam rejection sampling per tick; an agent whose whole vision disc
/// is water keeps its previous target instead of stalling the tick
const ROAM_MAX_ATTEMPTS: usize = 1024;

/// Update every herbivore, including ones born during this pass
pub fn update_herbivores(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let mut i = 0;
    while i < world.herbivores.count() {
        if world.herbivores.alive[i] {
            update_herbivore(world, i, events);
        }
        i += 1;
    }
}

/// Update every predator, including ones born during this pass
pub fn update_predators(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let mut i = 0;
    while i < world.predators.count() {
        if world.predators.alive[i] {
            update_predator(world, i, events);
        }
        i += 1;
    }
}

/// One herbivore tick: graze plants within the 5x5 window
pub fn update_herbivore(world: &mut World, i: usize, events: &mut Vec<SimulationEvent>) {
    let World {
        config,
        occupancy,
        terrain,
        herbivores,
        plants,
        rng,
        ..
    } = world;
    let species = &config.herbivore;

    herbivores.needs[i].advance(species);
    rescan(herbivores, i, occupancy, species);

    let pos = herbivores.positions[i];
    let hungry = herbivores.needs[i].hungry(species);
    let thirsty = herbivores.needs[i].thirsty(species);
    let wants_mate = herbivores.needs[i].wants_mate(species);

    if let (true, Some(food)) = (hungry, herbivores.nearest_food[i]) {
        herbivores.goals[i] = Vec2::from(food);
        if let Some(cell) = window_find(occupancy, Tag::Plant, pos, 2, false) {
            herbivores.needs[i].hunger = 0.0;
            if population::bite_plant(plants, occupancy, cell) {
                events.push(SimulationEvent::PlantDepleted { position: cell });
            }
        }
    } else if let (true, Some(water)) = (thirsty, herbivores.nearest_water[i]) {
        herbivores.goals[i] = Vec2::from(water);
        if window_find(occupancy, Tag::Water, pos, 2, false).is_some() {
            herbivores.needs[i].thirst = 0.0;
        }
    } else if let (true, Some(mate)) = (wants_mate, herbivores.nearest_mate[i]) {
        herbivores.goals[i] = Vec2::from(mate);
        if window_find(occupancy, Tag::Herbivore, pos, 1, true).is_some() {
            herbivores.needs[i].reproductive_urge = 0.0;
            let birth_pos = herbivores.positions[i];
            population::spawn_animal(herbivores, occupancy, species, birth_pos, rng);
            events.push(SimulationEvent::Born {
                kind: Tag::Herbivore,
                position: birth_pos.floored(),
            });
        }
    } else {
        pick_roam_target(herbivores, i, terrain, rng, species);
    }

    if herbivores.needs[i].over_limit(species) {
        let cell = herbivores.positions[i].floored();
        population::remove_animal(herbivores, occupancy, cell);
        events.push(SimulationEvent::Died {
            kind: Tag::Herbivore,
            position: cell,
        });
        return;
    }

    integrate_movement(herbivores, i, occupancy);
}

/// One predator tick: prey is consumed only from the predator's exact cell
pub fn update_predator(world: &mut World, i: usize, events: &mut Vec<SimulationEvent>) {
    let World {
        config,
        occupancy,
        terrain,
        herbivores,
        predators,
        rng,
        ..
    } = world;
    let species = &config.predator;

    predators.needs[i].advance(species);
    rescan(predators, i, occupancy, species);

    let pos = predators.positions[i];
    let hungry = predators.needs[i].hungry(species);
    let thirsty = predators.needs[i].thirsty(species);
    let wants_mate = predators.needs[i].wants_mate(species);

    if let (true, Some(prey)) = (hungry, predators.nearest_food[i]) {
        predators.goals[i] = Vec2::from(prey);
        let cell = pos.floored();
        if occupancy.contains(Tag::Herbivore, cell) {
            predators.needs[i].hunger = 0.0;
            population::remove_animal(herbivores, occupancy, cell);
            events.push(SimulationEvent::PreyTaken { position: cell });
        }
    } else if let (true, Some(water)) = (thirsty, predators.nearest_water[i]) {
        predators.goals[i] = Vec2::from(water);
        if window_find(occupancy, Tag::Water, pos, 2, false).is_some() {
            predators.needs[i].thirst = 0.0;
        }
    } else if let (true, Some(mate)) = (wants_mate, predators.nearest_mate[i]) {
        predators.goals[i] = Vec2::from(mate);
        if window_find(occupancy, Tag::Predator, pos, 1, true).is_some() {
            predators.needs[i].reproductive_urge = 0.0;
            let birth_pos = predators.positions[i];
            population::spawn_animal(predators, occupancy, species, birth_pos, rng);
            events.push(SimulationEvent::Born {
                kind: Tag::Predator,
                position: birth_pos.floored(),
            });
        }
    } else {
        pick_roam_target(predators, i, terrain, rng, species);
    }

    if predators.needs[i].over_limit(species) {
        let cell = predators.positions[i].floored();
        population::remove_animal(predators, occupancy, cell);
        events.push(SimulationEvent::Died {
            kind: Tag::Predator,
            position: cell,
        });
        return;
    }

    integrate_movement(predators, i, occupancy);
}

/// Refresh the cached nearest food/water/mate cells
///
/// The mate search skips the agent's own cell so it cannot match itself.
fn rescan(
    arch: &mut AnimalArchetype,
    i: usize,
    occupancy: &OccupancyIndex,
    species: &SpeciesConfig,
) {
    let pos = arch.positions[i];
    let food_tag = arch.diet.food_tag();
    arch.nearest_food[i] = scan::find_nearest(occupancy, food_tag, pos, species.vision);
    arch.nearest_water[i] = scan::find_nearest(occupancy, Tag::Water, pos, species.vision);
    arch.nearest_mate[i] =
        scan::find_nearest_excluding(occupancy, arch.tag, pos, species.vision, Some(pos.floored()));
}

/// First cell holding `tag` in the square window of half-width `half` around
/// the agent's cell, in row-major offset order; `skip_center` leaves out the
/// agent's own cell (mate checks)
fn window_find(
    occupancy: &OccupancyIndex,
    tag: Tag,
    pos: Vec2,
    half: i32,
    skip_center: bool,
) -> Option<Coord> {
    let center = pos.floored();
    for dx in -half..=half {
        for dy in -half..=half {
            if skip_center && dx == 0 && dy == 0 {
                continue;
            }
            let cell = Coord::new(center.x + dx, center.y + dy);
            if occupancy.contains(tag, cell) {
                return Some(cell);
            }
        }
    }
    None
}

/// Pick a new roam target once the agent is close to its current one
///
/// Rejection-samples a uniform point within the vision disc until it lands on
/// land.
fn pick_roam_target(
    arch: &mut AnimalArchetype,
    i: usize,
    terrain: &TerrainField,
    rng: &mut impl Rng,
    species: &SpeciesConfig,
) {
    let pos = arch.positions[i];
    if (arch.goals[i] - pos).length() >= ROAM_RETARGET_DISTANCE {
        return;
    }
    for _ in 0..ROAM_MAX_ATTEMPTS {
        let theta = rng.gen_range(0.0..TAU);
        let r = rng.gen_range(0.0..species.vision as f32);
        let candidate = Coord::new(
            (pos.x + r * theta.cos()).round() as i32,
            (pos.y + r * theta.sin()).round() as i32,
        );
        if terrain.is_land(candidate) {
            arch.goals[i] = Vec2::from(candidate);
            return;
        }
    }
}

/// Steer toward the current goal and take one speed-scaled step, keeping the
/// occupancy tag in sync
///
/// The stale tag must come out before the new insert; reversing the order
/// would leave a transient duplicate when the step stays within one cell.
fn integrate_movement(arch: &mut AnimalArchetype, i: usize, occupancy: &mut OccupancyIndex) {
    let direction = (arch.goals[i] - arch.positions[i]).normalize();
    arch.directions[i] = direction;

    let old_cell = arch.positions[i].floored();
    occupancy.remove(arch.tag, old_cell);
    arch.positions[i] = arch.positions[i] + direction * arch.speeds[i];
    occupancy.insert(arch.tag, arch.positions[i].floored());
}
