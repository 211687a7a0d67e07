//! # World Property Tests
//!
//! Black-box checks of the public `World` contract:
//!
//! 1. **Handles**: unique, in range, exhausted exactly at capacity
//! 2. **Spawn**: every component written as requested
//! 3. **Tick**: positions stay on the torus, the live set never changes
//!
//! Run with: cargo test -p swarm_core --test world_properties

use std::collections::HashSet;

use swarm_core::{EcsError, EntityHandle, Position, World, WorldConfig};

fn config(capacity: usize, width: i32, height: i32, seed: u64) -> WorldConfig {
    WorldConfig {
        capacity,
        screen_width: width,
        screen_height: height,
        ..WorldConfig::default()
    }
    .with_seed(seed)
}

fn live_set(world: &World) -> HashSet<EntityHandle> {
    world.live_handles().iter().copied().collect()
}

#[test]
fn handles_are_unique_and_in_range() {
    let capacity = 1_000;
    let mut world = World::new(config(capacity, 100, 100, 1)).unwrap();

    let mut seen = HashSet::new();
    for i in 0..capacity {
        let handle = world.spawn((i % 100) as i32, (i / 100) as i32).unwrap();
        assert!(handle.index() < capacity, "handle {handle:?} out of range");
        assert!(seen.insert(handle), "handle {handle:?} issued twice");
    }
}

#[test]
fn spawn_past_capacity_is_rejected() {
    let capacity = 64;
    let mut world = World::new(config(capacity, 50, 50, 2)).unwrap();
    for _ in 0..capacity {
        world.spawn(25, 25).unwrap();
    }
    let before = world.iter_live().collect::<Vec<_>>();

    for _ in 0..3 {
        assert_eq!(
            world.spawn(1, 1),
            Err(EcsError::PoolExhausted { capacity })
        );
    }

    assert_eq!(world.live_count(), capacity);
    assert_eq!(world.iter_live().collect::<Vec<_>>(), before);
}

#[test]
fn spawn_writes_every_component() {
    let mut world = World::new(config(32, 40, 30, 3)).unwrap();

    for i in 0..32 {
        let (x, y) = (i % 40, (i * 7) % 30);
        let handle = world.spawn(x, y).unwrap();

        assert_eq!(world.position(handle), Some(Position::new(x, y)));
        assert_eq!(world.health(handle).map(|h| h.value), Some(10));
        let color = world.color_index(handle).unwrap();
        assert!(color.index < world.palette_size());
    }
}

#[test]
fn starting_health_is_configurable() {
    let mut world = World::new(WorldConfig {
        starting_health: 250,
        ..config(1, 10, 10, 4)
    })
    .unwrap();

    let handle = world.spawn(0, 0).unwrap();
    assert_eq!(world.health(handle).map(|h| h.value), Some(250));
}

#[test]
fn positions_stay_on_the_torus() {
    let (width, height) = (7, 5);
    let mut world = World::new(config(200, width, height, 5)).unwrap();

    // Seed the corners and edges so wraparound is exercised constantly.
    for i in 0..200 {
        let x = if i % 2 == 0 { 0 } else { width - 1 };
        let y = if i % 3 == 0 { 0 } else { height - 1 };
        world.spawn(x, y).unwrap();
    }

    let bounds = world.bounds();
    for _ in 0..500 {
        world.tick();
        for view in world.iter_live() {
            assert!(
                bounds.contains(view.position),
                "{:?} escaped {width}x{height}",
                view.position
            );
        }
    }
}

#[test]
fn wide_steps_still_land_on_the_torus() {
    let mut world = World::new(WorldConfig {
        speed_min: -25,
        speed_max: 26,
        ..config(50, 10, 10, 6)
    })
    .unwrap();
    for i in 0..50 {
        world.spawn(i % 10, i / 5).unwrap();
    }

    for _ in 0..100 {
        world.tick();
        assert!(world.iter_live().all(|v| world.bounds().contains(v.position)));
    }
}

#[test]
fn tick_never_changes_the_live_set() {
    let mut world = World::new(config(100, 20, 20, 7)).unwrap();
    for i in 0..60 {
        world.spawn(i % 20, i % 20).unwrap();
    }
    let order = world.live_handles().to_vec();

    for _ in 0..100 {
        world.tick();
    }

    assert_eq!(world.live_count(), 60);
    assert_eq!(world.live_handles(), order.as_slice());
}

#[test]
fn colors_are_fixed_after_spawn() {
    let mut world = World::new(config(40, 30, 30, 8)).unwrap();
    for i in 0..40 {
        world.spawn(i % 30, i % 30).unwrap();
    }
    let colors: Vec<_> = world.iter_live().map(|v| v.color).collect();

    for _ in 0..30 {
        world.tick();
    }

    let after: Vec<_> = world.iter_live().map(|v| v.color).collect();
    assert_eq!(colors, after);
}

#[test]
fn steps_are_at_most_one_pixel_per_axis() {
    let mut world = World::new(config(50, 100, 100, 9)).unwrap();
    for i in 0..50 {
        world.spawn(30 + i, 50).unwrap();
    }

    // Twenty ticks from at least 30 pixels away can never reach an edge.
    for _ in 0..20 {
        let before: Vec<Position> = world.iter_live().map(|v| v.position).collect();
        world.tick();
        for (old, view) in before.iter().zip(world.iter_live()) {
            assert!((view.position.x - old.x).abs() <= 1);
            assert!((view.position.y - old.y).abs() <= 1);
        }
    }
}

#[test]
fn three_entity_scenario() {
    let mut world = World::new(config(3, 10, 10, 10)).unwrap();

    world.spawn(5, 5).unwrap();
    world.spawn(9, 9).unwrap();
    world.spawn(0, 0).unwrap();
    assert_eq!(
        world.spawn(1, 1),
        Err(EcsError::PoolExhausted { capacity: 3 })
    );

    let before = live_set(&world);
    world.tick();

    assert_eq!(world.live_count(), 3);
    assert_eq!(live_set(&world), before);
    for view in world.iter_live() {
        assert!((0..10).contains(&view.position.x));
        assert!((0..10).contains(&view.position.y));
    }
}
