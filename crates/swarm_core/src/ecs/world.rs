//! # ECS World
//!
//! Owns the entity pool, the component arrays and the random generator that
//! both spawning and movement draw from. Everything is allocated when the
//! world is built; `spawn` and `tick` never allocate.

use rand::distributions::{Distribution, Uniform};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::component::{ColorIndex, Health, Position, ScreenBounds};
use super::entity::{EntityHandle, EntityPool};
use super::storage::ComponentStore;
use crate::config::WorldConfig;
use crate::error::{ConfigResult, EcsResult};

/// Read-only view of one live entity, as a renderer consumes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityView {
    /// The entity's handle.
    pub handle: EntityHandle,
    /// Position after the most recent tick.
    pub position: Position,
    /// Palette slot to draw with.
    pub color: ColorIndex,
}

/// The swarm: a fixed-capacity pool of random-walking entities.
///
/// # Example
///
/// ```rust,ignore
/// let mut world = World::new(WorldConfig::default().with_seed(42))?;
/// world.spawn(500, 500)?;
/// world.tick();
/// for view in world.iter_live() {
///     draw(view.position, palette[usize::from(view.color.index)]);
/// }
/// ```
pub struct World<R = ChaCha8Rng> {
    pool: EntityPool,
    store: ComponentStore,
    bounds: ScreenBounds,
    /// Per-axis step distribution, `[speed_min, speed_max)`.
    step: Uniform<i32>,
    starting_health: i32,
    rng: R,
    tick_count: u64,
}

impl World<ChaCha8Rng> {
    /// Builds a world from a config, seeding the generator from
    /// `config.seed` or, when absent, from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`](crate::ConfigError::Invalid) if the
    /// config fails validation.
    pub fn new(config: WorldConfig) -> ConfigResult<Self> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> World<R> {
    /// Builds a world that draws from the given generator.
    ///
    /// `config.seed` is ignored; the generator is used as-is.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`](crate::ConfigError::Invalid) if the
    /// config fails validation.
    pub fn with_rng(config: WorldConfig, rng: R) -> ConfigResult<Self> {
        config.validate()?;

        debug!(
            capacity = config.capacity,
            width = config.screen_width,
            height = config.screen_height,
            speed_min = config.speed_min,
            speed_max = config.speed_max,
            "world created"
        );

        Ok(Self {
            pool: EntityPool::new(config.capacity),
            store: ComponentStore::new(config.capacity, config.palette_size),
            bounds: config.bounds(),
            step: Uniform::new(config.speed_min, config.speed_max),
            starting_health: config.starting_health,
            rng,
            tick_count: 0,
        })
    }

    /// Spawns an entity at `(x, y)` with the starting health and a random color.
    ///
    /// The position is stored as given; the first tick brings an out-of-range
    /// coordinate back onto the playfield edge.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::PoolExhausted`](crate::EcsError::PoolExhausted) when
    /// every handle is live. Nothing is written in that case.
    pub fn spawn(&mut self, x: i32, y: i32) -> EcsResult<EntityHandle> {
        let handle = match self.pool.allocate() {
            Ok(handle) => handle,
            Err(err) => {
                debug!(x, y, "spawn rejected: {err}");
                return Err(err);
            }
        };

        self.store
            .initialize(handle, x, y, self.starting_health, &mut self.rng);
        self.pool.activate(handle);

        Ok(handle)
    }

    /// Advances every live entity by one random step, in spawn order.
    ///
    /// Each axis draws its own delta from `[speed_min, speed_max)` and is
    /// then wrapped around the playfield. The live set is not touched.
    pub fn tick(&mut self) {
        let positions = self.store.positions_mut();

        for &handle in self.pool.live_handles() {
            let dx = self.step.sample(&mut self.rng);
            let dy = self.step.sample(&mut self.rng);
            positions[handle.index()].step(dx, dy, self.bounds);
        }

        self.tick_count += 1;
    }
}

impl<R> World<R> {
    /// Returns the maximum number of live entities.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Returns the number of live entities.
    #[inline]
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.pool.live_count()
    }

    /// Returns the number of completed ticks.
    #[inline]
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Returns the playfield bounds.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> ScreenBounds {
        self.bounds
    }

    /// Returns the number of palette colors entities are drawn from.
    #[inline]
    #[must_use]
    pub const fn palette_size(&self) -> u8 {
        self.store.palette_size()
    }

    /// Live handles in spawn order.
    #[inline]
    #[must_use]
    pub fn live_handles(&self) -> &[EntityHandle] {
        self.pool.live_handles()
    }

    /// Returns `true` if the handle belongs to a live entity.
    #[inline]
    #[must_use]
    pub fn is_live(&self, handle: EntityHandle) -> bool {
        self.pool.is_live(handle)
    }

    /// Position of a live entity.
    #[inline]
    #[must_use]
    pub fn position(&self, handle: EntityHandle) -> Option<Position> {
        self.live(handle).and_then(|h| self.store.position(h))
    }

    /// Health of a live entity.
    #[inline]
    #[must_use]
    pub fn health(&self, handle: EntityHandle) -> Option<Health> {
        self.live(handle).and_then(|h| self.store.health(h))
    }

    /// Color of a live entity.
    #[inline]
    #[must_use]
    pub fn color_index(&self, handle: EntityHandle) -> Option<ColorIndex> {
        self.live(handle).and_then(|h| self.store.color_index(h))
    }

    /// Iterates `(handle, position, color)` for every live entity, in spawn
    /// order.
    pub fn iter_live(&self) -> impl Iterator<Item = EntityView> + '_ {
        let positions = self.store.positions();
        let colors = self.store.colors();

        self.pool
            .live_handles()
            .iter()
            .map(move |&handle| EntityView {
                handle,
                position: positions[handle.index()],
                color: colors[handle.index()],
            })
    }

    /// Copies the live set into `out`, replacing its contents.
    ///
    /// Reusing the same buffer every frame keeps the copy allocation-free
    /// once it has grown to the live count.
    pub fn snapshot_into(&self, out: &mut Vec<EntityView>) {
        out.clear();
        out.extend(self.iter_live());
    }

    #[inline]
    fn live(&self, handle: EntityHandle) -> Option<EntityHandle> {
        self.pool.is_live(handle).then_some(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EcsError;
    use rand::rngs::mock::StepRng;

    fn small_config(capacity: usize) -> WorldConfig {
        WorldConfig {
            capacity,
            screen_width: 10,
            screen_height: 10,
            ..WorldConfig::default()
        }
        .with_seed(7)
    }

    #[test]
    fn test_world_creation() {
        let world = World::new(small_config(100)).unwrap();
        assert_eq!(world.capacity(), 100);
        assert_eq!(world.live_count(), 0);
        assert_eq!(world.tick_count(), 0);
        assert_eq!(world.bounds(), ScreenBounds::new(10, 10));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WorldConfig {
            speed_min: 1,
            speed_max: 0,
            ..WorldConfig::default()
        };
        assert!(World::new(config).is_err());
    }

    #[test]
    fn test_spawn_initializes_components() {
        let mut world = World::new(small_config(4)).unwrap();
        let handle = world.spawn(3, 8).unwrap();

        assert!(world.is_live(handle));
        assert_eq!(world.position(handle), Some(Position::new(3, 8)));
        assert_eq!(world.health(handle), Some(Health::new(10)));
        assert!(world.color_index(handle).unwrap().index < world.palette_size());
    }

    #[test]
    fn test_spawn_exhaustion() {
        let mut world = World::new(small_config(2)).unwrap();
        world.spawn(0, 0).unwrap();
        world.spawn(1, 1).unwrap();

        assert_eq!(
            world.spawn(2, 2),
            Err(EcsError::PoolExhausted { capacity: 2 })
        );
        assert_eq!(world.live_count(), 2);
    }

    #[test]
    fn test_unspawned_handle_has_no_components() {
        let mut world = World::new(small_config(4)).unwrap();
        world.spawn(1, 1).unwrap();

        let stale = EntityHandle::new(3);
        assert!(world.position(stale).is_none());
        assert!(world.health(stale).is_none());
        assert!(world.color_index(stale).is_none());
        assert!(world.position(EntityHandle::new(99)).is_none());
    }

    #[test]
    fn test_tick_wraps_low_edges() {
        let config = WorldConfig {
            speed_min: -1,
            speed_max: 0,
            ..small_config(1)
        };
        let mut world = World::new(config).unwrap();
        let handle = world.spawn(0, 0).unwrap();

        world.tick();

        assert_eq!(world.position(handle), Some(Position::new(9, 9)));
    }

    #[test]
    fn test_tick_wraps_high_edge() {
        let config = WorldConfig {
            speed_min: 1,
            speed_max: 2,
            ..small_config(1)
        };
        let mut world = World::new(config).unwrap();
        let handle = world.spawn(9, 0).unwrap();

        world.tick();

        assert_eq!(world.position(handle), Some(Position::new(0, 1)));
    }

    #[test]
    fn test_injected_rng_drives_every_draw() {
        // An all-zero generator always lands on the low end of each range.
        let mut world = World::with_rng(small_config(2), StepRng::new(0, 0)).unwrap();
        let a = world.spawn(5, 5).unwrap();
        let b = world.spawn(0, 3).unwrap();
        assert_eq!(world.color_index(a), Some(ColorIndex::new(0)));

        world.tick();

        assert_eq!(world.position(a), Some(Position::new(4, 4)));
        assert_eq!(world.position(b), Some(Position::new(9, 2)));
    }

    #[test]
    fn test_tick_keeps_live_set() {
        let mut world = World::new(small_config(8)).unwrap();
        for i in 0..5 {
            world.spawn(i, i).unwrap();
        }
        let before = world.live_handles().to_vec();

        for _ in 0..50 {
            world.tick();
        }

        assert_eq!(world.live_handles(), before.as_slice());
        assert_eq!(world.tick_count(), 50);
    }

    #[test]
    fn test_same_seed_same_swarm() {
        let run = || {
            let mut world = World::new(small_config(16)).unwrap();
            for i in 0..16 {
                world.spawn(i % 10, i / 2).unwrap();
            }
            for _ in 0..20 {
                world.tick();
            }
            world.iter_live().collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_iter_live_follows_spawn_order() {
        let mut world = World::new(small_config(3)).unwrap();
        let handles: Vec<_> = (0..3).map(|i| world.spawn(i, 0).unwrap()).collect();

        let views: Vec<EntityView> = world.iter_live().collect();
        assert_eq!(views.len(), 3);
        for (view, handle) in views.iter().zip(&handles) {
            assert_eq!(view.handle, *handle);
            assert_eq!(Some(view.position), world.position(*handle));
            assert_eq!(Some(view.color), world.color_index(*handle));
        }
    }

    #[test]
    fn test_snapshot_reuses_buffer() {
        let mut world = World::new(small_config(4)).unwrap();
        world.spawn(1, 2).unwrap();
        let mut snapshot = vec![
            EntityView {
                handle: EntityHandle::new(0),
                position: Position::default(),
                color: ColorIndex::default(),
            };
            10
        ];

        world.snapshot_into(&mut snapshot);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].position, Position::new(1, 2));
    }
}
