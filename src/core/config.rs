//! Simulation configuration with documented constants
//!
//! All tuning values are collected here with explanations of their purpose
//! and how they interact with each other.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{CoexistError, Result};

/// Per-species tuning shared by herbivores and predators
///
/// Defaults reproduce the tuning the simulation was balanced around; changing
/// them shifts how quickly populations boom and crash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesConfig {
    /// How many agents are placed at world generation
    pub initial_count: usize,

    /// Maximum scan distance (cells) for food, water and mates
    ///
    /// Scanning cost grows with the square of this radius, so it dominates
    /// per-tick work for large populations.
    pub vision: i32,

    /// Hunger level above which the agent dies
    pub max_hunger: f32,
    /// Thirst level above which the agent dies
    pub max_thirst: f32,
    /// Reproductive urge ceiling; exceeding it is never fatal
    pub max_reproductive_urge: f32,

    /// Hunger added every tick
    pub hunger_delta: f32,
    /// Thirst added every tick
    pub thirst_delta: f32,
    /// Reproductive urge added every tick
    pub reproductive_urge_delta: f32,

    /// Movement speed range; each agent draws a fixed speed from this range
    /// at birth (cells per tick)
    pub speed_min: f32,
    pub speed_max: f32,
}

impl SpeciesConfig {
    /// Herbivore defaults: slow, thirst-tolerant, short-sighted
    pub fn herbivore() -> Self {
        Self {
            initial_count: 30,
            vision: 30,
            max_hunger: 100.0,
            max_thirst: 120.0,
            max_reproductive_urge: 100.0,
            hunger_delta: 0.05,
            thirst_delta: 0.05,
            reproductive_urge_delta: 0.05,
            speed_min: 0.3,
            speed_max: 0.5,
        }
    }

    /// Predator defaults: fast, far-sighted, quick to dehydrate
    pub fn predator() -> Self {
        Self {
            initial_count: 20,
            vision: 40,
            max_hunger: 100.0,
            max_thirst: 80.0,
            max_reproductive_urge: 50.0,
            hunger_delta: 0.05,
            thirst_delta: 0.05,
            reproductive_urge_delta: 0.05,
            speed_min: 0.5,
            speed_max: 1.0,
        }
    }
}

impl Default for SpeciesConfig {
    fn default() -> Self {
        Self::herbivore()
    }
}

/// Stationary food source tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantConfig {
    /// Plants per 10,000 cells; the generated count is
    /// `density * width * height / 10000`
    pub density: f32,

    /// Bites a plant survives before it is removed
    ///
    /// `None` makes plants inexhaustible (the classic scenario); `Some(n)`
    /// enables the depletable-food scenario.
    pub bite_capacity: Option<u32>,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            density: 4.0,
            bite_capacity: None,
        }
    }
}

/// Configuration for a complete simulation world
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World width in cells
    pub width: u32,
    /// World height in cells
    pub height: u32,

    /// Spatial frequency at which the noise oracle is sampled
    ///
    /// Lower values produce larger contiguous landmasses.
    pub noise_frequency: f64,

    /// Noise samples above this value classify as land
    ///
    /// At 0.4 roughly two thirds of a typical Perlin field ends up land.
    pub land_threshold: f64,

    pub herbivore: SpeciesConfig,
    pub predator: SpeciesConfig,
    pub plant: PlantConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            noise_frequency: 0.01,
            land_threshold: 0.4,
            herbivore: SpeciesConfig::herbivore(),
            predator: SpeciesConfig::predator(),
            plant: PlantConfig::default(),
        }
    }
}

impl WorldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file; missing keys fall back to defaults
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate().map_err(CoexistError::InvalidConfig)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err("world dimensions must be positive".into());
        }

        if self.land_threshold <= 0.0 || self.land_threshold >= 1.0 {
            return Err(format!(
                "land_threshold ({}) must lie strictly between 0 and 1",
                self.land_threshold
            ));
        }

        if self.noise_frequency <= 0.0 {
            return Err("noise_frequency must be positive".into());
        }

        if self.plant.density < 0.0 {
            return Err("plant density must not be negative".into());
        }

        for (name, species) in [("herbivore", &self.herbivore), ("predator", &self.predator)] {
            if species.vision <= 0 {
                return Err(format!("{} vision must be positive", name));
            }
            if species.speed_min < 0.0 || species.speed_min > species.speed_max {
                return Err(format!(
                    "{} speed range [{}, {}] is invalid",
                    name, species.speed_min, species.speed_max
                ));
            }
            if species.max_hunger <= 0.0
                || species.max_thirst <= 0.0
                || species.max_reproductive_urge <= 0.0
            {
                return Err(format!("{} need maxima must be positive", name));
            }
            if species.hunger_delta < 0.0
                || species.thirst_delta < 0.0
                || species.reproductive_urge_delta < 0.0
            {
                return Err(format!("{} need deltas must not be negative", name));
            }
        }

        Ok(())
    }

    /// Number of plants generated for this world
    pub fn plant_count(&self) -> usize {
        (self.plant.density * (self.width * self.height) as f32 / 10_000.0) as usize
    }
}
