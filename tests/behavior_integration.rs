//! Integration tests for the needs-driven behavior loop
//!
//! These build small all-land worlds with hand-placed agents so the decision
//! ladder, consumption side effects and reproduction can be observed tick by
//! tick.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use coexist::core::config::WorldConfig;
use coexist::core::types::{Coord, Vec2};
use coexist::entity::needs::Needs;
use coexist::simulation::behavior::{update_herbivore, update_predator};
use coexist::simulation::population::spawn_animal;
use coexist::simulation::tick::{run_simulation_tick, SimulationEvent};
use coexist::spatial::occupancy::Tag;
use coexist::world::terrain::UniformSource;
use coexist::world::World;

fn empty_land_world(seed: u64) -> World {
    let mut config = WorldConfig::default();
    config.width = 100;
    config.height = 100;
    config.herbivore.initial_count = 0;
    config.predator.initial_count = 0;
    config.plant.density = 0.0;
    let rng = ChaCha8Rng::seed_from_u64(seed);
    World::generate_with_noise(config, seed, rng, &UniformSource(1.0)).expect("world")
}

fn zeroed() -> Needs {
    Needs {
        hunger: 0.0,
        thirst: 0.0,
        reproductive_urge: 0.0,
    }
}

#[test]
fn test_predator_hunts_and_consumes_prey() {
    let mut world = empty_land_world(21);

    // Stationary prey at (55,50)
    spawn_animal(
        &mut world.herbivores,
        &mut world.occupancy,
        &world.config.herbivore,
        Vec2::new(55.0, 50.0),
        &mut world.rng,
    );
    world.herbivores.speeds[0] = 0.0;
    world.herbivores.needs[0] = zeroed();

    // Hungry predator at (50,50), one cell per tick
    spawn_animal(
        &mut world.predators,
        &mut world.occupancy,
        &world.config.predator,
        Vec2::new(50.0, 50.0),
        &mut world.rng,
    );
    world.predators.speeds[0] = 1.0;
    world.predators.needs[0] = zeroed();
    world.predators.needs[0].hunger = 60.0;

    let mut prey_taken_at = None;
    for _ in 0..20 {
        let report = run_simulation_tick(&mut world);

        // the hungry predator locks onto the prey immediately
        assert_eq!(world.predators.goals[0], Vec2::new(55.0, 50.0));

        for event in &report.events {
            if let SimulationEvent::PreyTaken { position } = event {
                prey_taken_at = Some(*position);
            }
        }
        if world.herbivores.count() == 0 {
            break;
        }
    }

    assert_eq!(prey_taken_at, Some(Coord::new(55, 50)));
    assert_eq!(world.herbivores.count(), 0);
    assert!(!world.occupancy.contains(Tag::Herbivore, Coord::new(55, 50)));
    // hunger was reset on the consumption tick
    assert!(world.predators.needs[0].hunger < 0.1);
}

#[test]
fn test_mating_spawns_one_offspring_and_resets_urge() {
    let mut world = empty_land_world(22);

    for x in [10.0, 11.0] {
        spawn_animal(
            &mut world.herbivores,
            &mut world.occupancy,
            &world.config.herbivore,
            Vec2::new(x, 10.0),
            &mut world.rng,
        );
    }
    world.herbivores.needs[0] = zeroed();
    world.herbivores.needs[0].reproductive_urge = 60.0;
    world.herbivores.needs[1] = zeroed();

    let mut events = Vec::new();
    update_herbivore(&mut world, 0, &mut events);

    let births: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, SimulationEvent::Born { .. }))
        .collect();
    assert_eq!(births.len(), 1);
    assert!(matches!(
        births[0],
        SimulationEvent::Born {
            kind: Tag::Herbivore,
            position: Coord { x: 10, y: 10 }
        }
    ));

    assert_eq!(world.herbivores.count(), 3);
    assert_eq!(world.herbivores.positions[2].floored(), Coord::new(10, 10));
    assert_eq!(world.herbivores.needs[0].reproductive_urge, 0.0);
    // both parent and offspring are indexed on the shared cell
    assert_eq!(
        world
            .occupancy
            .tags_at(Coord::new(10, 10))
            .iter()
            .filter(|&&t| t == Tag::Herbivore)
            .count(),
        2
    );
}

#[test]
fn test_mate_outside_window_is_chased_not_consummated() {
    let mut world = empty_land_world(23);

    for x in [10.0, 15.0] {
        spawn_animal(
            &mut world.herbivores,
            &mut world.occupancy,
            &world.config.herbivore,
            Vec2::new(x, 10.0),
            &mut world.rng,
        );
    }
    world.herbivores.needs[0] = zeroed();
    world.herbivores.needs[0].reproductive_urge = 60.0;
    world.herbivores.needs[1] = zeroed();

    let mut events = Vec::new();
    update_herbivore(&mut world, 0, &mut events);

    // goal locked onto the mate, no offspring yet
    assert_eq!(world.herbivores.goals[0], Vec2::new(15.0, 10.0));
    assert_eq!(world.herbivores.count(), 2);
    assert!(events.is_empty());
    assert!(world.herbivores.needs[0].reproductive_urge > 60.0);
}

#[test]
fn test_starvation_removes_agent_and_tag() {
    let mut world = empty_land_world(24);

    spawn_animal(
        &mut world.herbivores,
        &mut world.occupancy,
        &world.config.herbivore,
        Vec2::new(30.0, 30.0),
        &mut world.rng,
    );
    world.herbivores.needs[0] = zeroed();
    world.herbivores.needs[0].hunger = world.config.herbivore.max_hunger + 1.0;

    let report = run_simulation_tick(&mut world);

    assert!(report
        .events
        .iter()
        .any(|e| matches!(e, SimulationEvent::Died { kind: Tag::Herbivore, .. })));
    assert_eq!(world.herbivores.count(), 0);
    assert!(!world.occupancy.contains(Tag::Herbivore, Coord::new(30, 30)));
}

#[test]
fn test_dehydration_is_fatal_for_predators() {
    let mut world = empty_land_world(25);

    spawn_animal(
        &mut world.predators,
        &mut world.occupancy,
        &world.config.predator,
        Vec2::new(40.0, 40.0),
        &mut world.rng,
    );
    world.predators.needs[0] = zeroed();
    world.predators.needs[0].thirst = world.config.predator.max_thirst + 1.0;

    let report = run_simulation_tick(&mut world);

    assert!(report
        .events
        .iter()
        .any(|e| matches!(e, SimulationEvent::Died { kind: Tag::Predator, .. })));
    assert_eq!(world.predators.count(), 0);
}

#[test]
fn test_needs_rise_without_consumption() {
    let mut world = empty_land_world(26);

    spawn_animal(
        &mut world.herbivores,
        &mut world.occupancy,
        &world.config.herbivore,
        Vec2::new(50.0, 50.0),
        &mut world.rng,
    );
    world.herbivores.needs[0] = zeroed();

    for tick in 1..=100 {
        run_simulation_tick(&mut world);
        let needs = &world.herbivores.needs[0];
        let expected = tick as f32 * world.config.herbivore.hunger_delta;
        assert!((needs.hunger - expected).abs() < 1e-3);
        assert!((needs.thirst - expected).abs() < 1e-3);
        assert!((needs.reproductive_urge - expected).abs() < 1e-3);
    }
}

#[test]
fn test_hungry_herbivore_without_food_falls_through_to_water() {
    let mut world = empty_land_world(27);

    spawn_animal(
        &mut world.herbivores,
        &mut world.occupancy,
        &world.config.herbivore,
        Vec2::new(50.0, 50.0),
        &mut world.rng,
    );
    // hungry AND thirsty, but the world has no plants at all; the water
    // branch must win even though hunger has higher priority
    world.herbivores.needs[0] = zeroed();
    world.herbivores.needs[0].hunger = 80.0;
    world.herbivores.needs[0].thirst = 80.0;
    world.occupancy.insert(Tag::Water, Coord::new(52, 50));

    let mut events = Vec::new();
    update_herbivore(&mut world, 0, &mut events);

    assert_eq!(world.herbivores.goals[0], Vec2::new(52.0, 50.0));
}

#[test]
fn test_predator_does_not_eat_at_distance() {
    let mut world = empty_land_world(28);

    spawn_animal(
        &mut world.herbivores,
        &mut world.occupancy,
        &world.config.herbivore,
        Vec2::new(53.0, 50.0),
        &mut world.rng,
    );
    world.herbivores.needs[0] = zeroed();
    spawn_animal(
        &mut world.predators,
        &mut world.occupancy,
        &world.config.predator,
        Vec2::new(50.0, 50.0),
        &mut world.rng,
    );
    world.predators.needs[0] = zeroed();
    world.predators.needs[0].hunger = 60.0;

    let mut events = Vec::new();
    update_predator(&mut world, 0, &mut events);

    // prey three cells away: chased, not eaten - consumption needs the exact cell
    assert_eq!(world.herbivores.living(), 1);
    assert!(world.predators.needs[0].hunger > 60.0);
    assert_eq!(world.predators.goals[0], Vec2::new(53.0, 50.0));
}
