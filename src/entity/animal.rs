//! SoA archetype for mobile agents
//!
//! Herbivores and predators share one storage layout and one needs model;
//! the `Diet` chosen at construction selects the prey-versus-plant half of
//! the behavior. This keeps the species set closed instead of routing
//! through open-ended inheritance.

use crate::core::types::{Coord, EntityId, Vec2};
use crate::entity::needs::Needs;
use crate::spatial::occupancy::Tag;

/// What a species eats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diet {
    /// Grazes plants; consumption is a proximity-window check
    Plants,
    /// Hunts herbivores; consumption requires standing on the prey's cell
    Herbivores,
}

impl Diet {
    /// Occupancy tag of this diet's food source
    pub fn food_tag(self) -> Tag {
        match self {
            Diet::Plants => Tag::Plant,
            Diet::Herbivores => Tag::Herbivore,
        }
    }
}

/// Structure of Arrays for one species' agents
///
/// Indices stay stable for the duration of a tick: death only flips the
/// `alive` flag, and `sweep_dead` compacts the columns between ticks.
pub struct AnimalArchetype {
    /// Occupancy tag written for members of this archetype
    pub tag: Tag,
    pub diet: Diet,
    pub ids: Vec<EntityId>,
    /// Continuous position; the floored cell carries the occupancy tag
    pub positions: Vec<Vec2>,
    /// Unit direction of the last movement step
    pub directions: Vec<Vec2>,
    /// Fixed per-agent speed, drawn from the species range at birth
    pub speeds: Vec<f32>,
    pub needs: Vec<Needs>,
    /// Current movement goal: a need-driven resource cell or the roam fallback
    pub goals: Vec<Vec2>,
    /// Nearest food/water/mate cells seen by this tick's scan
    pub nearest_food: Vec<Option<Coord>>,
    pub nearest_water: Vec<Option<Coord>>,
    pub nearest_mate: Vec<Option<Coord>>,
    pub alive: Vec<bool>,
}

impl AnimalArchetype {
    pub fn new(tag: Tag, diet: Diet) -> Self {
        Self {
            tag,
            diet,
            ids: Vec::new(),
            positions: Vec::new(),
            directions: Vec::new(),
            speeds: Vec::new(),
            needs: Vec::new(),
            goals: Vec::new(),
            nearest_food: Vec::new(),
            nearest_water: Vec::new(),
            nearest_mate: Vec::new(),
            alive: Vec::new(),
        }
    }

    /// Column length, including agents that died earlier in the current tick
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn living(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }

    pub fn spawn(&mut self, id: EntityId, position: Vec2, speed: f32, needs: Needs) {
        self.ids.push(id);
        self.positions.push(position);
        self.directions.push(Vec2::new(1.0, 1.0));
        self.speeds.push(speed);
        self.needs.push(needs);
        // A goal on the agent's own cell is always valid; the first roam
        // re-targets from here
        self.goals.push(position);
        self.nearest_food.push(None);
        self.nearest_water.push(None);
        self.nearest_mate.push(None);
        self.alive.push(true);
    }

    pub fn iter_living(&self) -> impl Iterator<Item = usize> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(i, _)| i)
    }

    /// Drop dead agents from every column, preserving order
    pub fn sweep_dead(&mut self) {
        if self.alive.iter().all(|&a| a) {
            return;
        }
        let alive = self.alive.clone();
        retain_by(&mut self.ids, &alive);
        retain_by(&mut self.positions, &alive);
        retain_by(&mut self.directions, &alive);
        retain_by(&mut self.speeds, &alive);
        retain_by(&mut self.needs, &alive);
        retain_by(&mut self.goals, &alive);
        retain_by(&mut self.nearest_food, &alive);
        retain_by(&mut self.nearest_water, &alive);
        retain_by(&mut self.nearest_mate, &alive);
        self.alive.retain(|&a| a);
    }
}

fn retain_by<T>(column: &mut Vec<T>, alive: &[bool]) {
    let mut idx = 0;
    column.retain(|_| {
        let keep = alive[idx];
        idx += 1;
        keep
    });
}
