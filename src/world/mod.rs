//! Simulation world - owns all state mutated by the tick loop

pub mod snapshot;
pub mod terrain;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::WorldConfig;
use crate::core::error::{CoexistError, Result};
use crate::core::types::{Coord, Tick, Vec2};
use crate::entity::animal::{AnimalArchetype, Diet};
use crate::entity::plant::PlantColony;
use crate::simulation::population;
use crate::spatial::occupancy::{OccupancyIndex, Tag};
use terrain::{NoiseSource, PerlinSource, TerrainField};

/// The simulation world containing all entities
///
/// Created once at startup, mutated only by the tick loop and the population
/// functions, dropped at process exit. There is no global state; everything
/// the simulation touches hangs off this struct.
pub struct World {
    pub config: WorldConfig,
    pub current_tick: Tick,
    pub seed: u64,
    pub occupancy: OccupancyIndex,
    pub terrain: TerrainField,
    pub herbivores: AnimalArchetype,
    pub predators: AnimalArchetype,
    pub plants: PlantColony,
    pub rng: ChaCha8Rng,
}

impl World {
    /// Generate a fresh world: terrain first, then herbivores, predators and
    /// plants on random land cells
    ///
    /// Fails with [`CoexistError::NoLand`] when the noise field classifies
    /// every cell as water; placement would otherwise never terminate.
    pub fn generate(config: WorldConfig, seed: u64) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let noise = PerlinSource::new(rng.gen());
        Self::generate_with_noise(config, seed, rng, &noise)
    }

    /// Generation entry point with an explicit noise oracle
    pub fn generate_with_noise(
        config: WorldConfig,
        seed: u64,
        rng: ChaCha8Rng,
        noise: &dyn NoiseSource,
    ) -> Result<Self> {
        config.validate().map_err(CoexistError::InvalidConfig)?;

        let mut occupancy = OccupancyIndex::new(config.width, config.height);
        let terrain = TerrainField::generate(
            noise,
            &mut occupancy,
            config.noise_frequency,
            config.land_threshold,
        );
        if terrain.land_cells() == 0 {
            return Err(CoexistError::NoLand(seed));
        }
        tracing::info!(
            seed,
            land_cells = terrain.land_cells(),
            width = config.width,
            height = config.height,
            "terrain generated"
        );

        let mut world = Self {
            config,
            current_tick: 0,
            seed,
            occupancy,
            terrain,
            herbivores: AnimalArchetype::new(Tag::Herbivore, Diet::Plants),
            predators: AnimalArchetype::new(Tag::Predator, Diet::Herbivores),
            plants: PlantColony::new(),
            rng,
        };
        world.place_initial_population();
        Ok(world)
    }

    fn place_initial_population(&mut self) {
        for _ in 0..self.config.herbivore.initial_count {
            let cell = self.random_land_cell();
            population::spawn_animal(
                &mut self.herbivores,
                &mut self.occupancy,
                &self.config.herbivore,
                Vec2::from(cell),
                &mut self.rng,
            );
        }
        for _ in 0..self.config.predator.initial_count {
            let cell = self.random_land_cell();
            population::spawn_animal(
                &mut self.predators,
                &mut self.occupancy,
                &self.config.predator,
                Vec2::from(cell),
                &mut self.rng,
            );
        }
        for _ in 0..self.config.plant_count() {
            let cell = self.random_land_cell();
            population::spawn_plant(
                &mut self.plants,
                &mut self.occupancy,
                cell,
                self.config.plant.bite_capacity,
            );
        }
        tracing::info!(
            herbivores = self.herbivores.count(),
            predators = self.predators.count(),
            plants = self.plants.count(),
            "initial population placed"
        );
    }

    /// Uniformly random land cell, by rejection sampling
    ///
    /// Terminates because generation already established at least one land
    /// cell exists.
    fn random_land_cell(&mut self) -> Coord {
        loop {
            let x = self.rng.gen_range(0..self.config.width) as i32;
            let y = self.rng.gen_range(0..self.config.height) as i32;
            let cell = Coord::new(x, y);
            if self.terrain.is_land(cell) {
                return cell;
            }
        }
    }
}
