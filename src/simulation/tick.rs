//! Tick system - orchestrates simulation updates
//!
//! One tick updates every herbivore, then every predator, in stable
//! population order, then compacts the dead and collects statistics. There is
//! no rollback: births, deaths and movement apply immediately and are visible
//! to agents updated later in the same tick.

use serde::Serialize;

use crate::core::types::{Coord, Tick};
use crate::simulation::behavior::{update_herbivores, update_predators};
use crate::spatial::occupancy::Tag;
use crate::world::World;

/// Events generated during a simulation tick, for presentation layers
#[derive(Debug, Clone)]
pub enum SimulationEvent {
    /// A mating produced one offspring at the initiator's cell
    Born { kind: Tag, position: Coord },
    /// Starvation or dehydration removal
    Died { kind: Tag, position: Coord },
    /// A predator consumed the herbivore on its own cell
    PreyTaken { position: Coord },
    /// A depletable plant ran out of bites and was removed
    PlantDepleted { position: Coord },
}

/// Population counts at the end of one tick
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TickStats {
    pub tick: Tick,
    pub herbivores: usize,
    pub predators: usize,
    pub plants: usize,
}

/// Everything a caller may want to know about one completed tick
#[derive(Debug)]
pub struct TickReport {
    pub stats: TickStats,
    pub events: Vec<SimulationEvent>,
}

/// Run a single simulation tick
pub fn run_simulation_tick(world: &mut World) -> TickReport {
    let mut events = Vec::new();

    update_herbivores(world, &mut events);
    update_predators(world, &mut events);

    world.herbivores.sweep_dead();
    world.predators.sweep_dead();
    world.current_tick += 1;

    let stats = TickStats {
        tick: world.current_tick,
        herbivores: world.herbivores.count(),
        predators: world.predators.count(),
        plants: world.plants.count(),
    };
    tracing::debug!(
        tick = stats.tick,
        herbivores = stats.herbivores,
        predators = stats.predators,
        plants = stats.plants,
        events = events.len(),
        "tick complete"
    );

    TickReport { stats, events }
}
