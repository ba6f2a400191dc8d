//! Per-agent needs that drive behavior

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::SpeciesConfig;

/// Hunger, thirst and reproductive urge for one agent
///
/// Each axis grows by a fixed per-tick delta. Crossing half of the species
/// maximum makes the matching goal eligible for pursuit; hunger or thirst
/// crossing the maximum itself is fatal. Reproductive urge is never fatal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Needs {
    pub hunger: f32,
    pub thirst: f32,
    pub reproductive_urge: f32,
}

impl Needs {
    /// Fresh agents start at uniformly random levels below the maxima
    pub fn random(species: &SpeciesConfig, rng: &mut impl Rng) -> Self {
        Self {
            hunger: rng.gen_range(0.0..species.max_hunger),
            thirst: rng.gen_range(0.0..species.max_thirst),
            reproductive_urge: rng.gen_range(0.0..species.max_reproductive_urge),
        }
    }

    /// Advance all three axes by their per-tick deltas
    pub fn advance(&mut self, species: &SpeciesConfig) {
        self.hunger += species.hunger_delta;
        self.thirst += species.thirst_delta;
        self.reproductive_urge += species.reproductive_urge_delta;
    }

    /// Fatal once hunger or thirst exceeds the species maximum
    pub fn over_limit(&self, species: &SpeciesConfig) -> bool {
        self.hunger > species.max_hunger || self.thirst > species.max_thirst
    }

    pub fn hungry(&self, species: &SpeciesConfig) -> bool {
        self.hunger > species.max_hunger / 2.0
    }

    pub fn thirsty(&self, species: &SpeciesConfig) -> bool {
        self.thirst > species.max_thirst / 2.0
    }

    pub fn wants_mate(&self, species: &SpeciesConfig) -> bool {
        self.reproductive_urge > species.max_reproductive_urge / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zeroed() -> Needs {
        Needs {
            hunger: 0.0,
            thirst: 0.0,
            reproductive_urge: 0.0,
        }
    }

    #[test]
    fn test_advance_is_strictly_increasing() {
        let species = SpeciesConfig::herbivore();
        let mut needs = zeroed();

        for step in 1..=100 {
            let before = needs.clone();
            needs.advance(&species);
            assert!(needs.hunger > before.hunger);
            assert!(needs.thirst > before.thirst);
            assert!(needs.reproductive_urge > before.reproductive_urge);
            assert!((needs.hunger - step as f32 * species.hunger_delta).abs() < 1e-3);
        }
    }

    #[test]
    fn test_thresholds_at_half_max() {
        let species = SpeciesConfig::herbivore();
        let mut needs = zeroed();

        assert!(!needs.hungry(&species));
        needs.hunger = species.max_hunger / 2.0 + 0.01;
        assert!(needs.hungry(&species));

        assert!(!needs.thirsty(&species));
        needs.thirst = species.max_thirst / 2.0 + 0.01;
        assert!(needs.thirsty(&species));

        assert!(!needs.wants_mate(&species));
        needs.reproductive_urge = species.max_reproductive_urge / 2.0 + 0.01;
        assert!(needs.wants_mate(&species));
    }

    #[test]
    fn test_over_limit_on_either_axis() {
        let species = SpeciesConfig::predator();
        let mut needs = zeroed();
        assert!(!needs.over_limit(&species));

        needs.hunger = species.max_hunger + 0.1;
        assert!(needs.over_limit(&species));

        needs.hunger = 0.0;
        needs.thirst = species.max_thirst + 0.1;
        assert!(needs.over_limit(&species));
    }

    #[test]
    fn test_urge_alone_is_never_fatal() {
        let species = SpeciesConfig::predator();
        let mut needs = zeroed();
        needs.reproductive_urge = species.max_reproductive_urge * 10.0;
        assert!(!needs.over_limit(&species));
    }

    #[test]
    fn test_random_needs_below_maxima() {
        let species = SpeciesConfig::herbivore();
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let needs = Needs::random(&species, &mut rng);
            assert!(needs.hunger < species.max_hunger);
            assert!(needs.thirst < species.max_thirst);
            assert!(needs.reproductive_urge < species.max_reproductive_urge);
        }
    }
}
