//! # Component Storage
//!
//! Structure-of-arrays storage: one dense array per component type, all of
//! them `capacity` long and indexed directly by [`EntityHandle`].
//!
//! - Every slot is allocated up front
//! - Access is O(1) via the handle
//! - Slots of free handles hold stale defaults and are never read by the world

use rand::Rng;

use super::component::{ColorIndex, Component, Health, Position};
use super::entity::EntityHandle;

/// Pre-allocated dense array for a single component type.
pub struct ComponentStorage<C: Component> {
    data: Box<[C]>,
}

impl<C: Component> ComponentStorage<C> {
    /// Creates storage with every slot set to the component's default.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![C::default(); capacity].into_boxed_slice(),
        }
    }

    /// Returns the number of slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Gets the component in a handle's slot, or `None` if out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: EntityHandle) -> Option<&C> {
        self.data.get(handle.index())
    }

    /// Gets mutable access to a handle's slot, or `None` if out of range.
    #[inline]
    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut C> {
        self.data.get_mut(handle.index())
    }

    /// Overwrites a handle's slot.
    ///
    /// # Returns
    ///
    /// `true` if the component was set, `false` if the handle was out of range.
    #[inline]
    pub fn set(&mut self, handle: EntityHandle, component: C) -> bool {
        if let Some(slot) = self.data.get_mut(handle.index()) {
            *slot = component;
            true
        } else {
            false
        }
    }

    /// Returns every slot, stale ones included.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[C] {
        &self.data
    }

    /// Returns every slot mutably, stale ones included.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [C] {
        &mut self.data
    }
}

/// The three parallel component arrays of the swarm.
pub struct ComponentStore {
    positions: ComponentStorage<Position>,
    healths: ComponentStorage<Health>,
    colors: ComponentStorage<ColorIndex>,
    palette_size: u8,
}

impl ComponentStore {
    /// Allocates all three arrays for `capacity` entities.
    ///
    /// # Panics
    ///
    /// Panics if `palette_size` is zero.
    #[must_use]
    pub fn new(capacity: usize, palette_size: u8) -> Self {
        assert!(palette_size > 0, "Palette must have at least one color");

        Self {
            positions: ComponentStorage::new(capacity),
            healths: ComponentStorage::new(capacity),
            colors: ComponentStorage::new(capacity),
            palette_size,
        }
    }

    /// Returns the number of slots in each array.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.positions.capacity()
    }

    /// Returns the palette size colors are drawn from.
    #[inline]
    #[must_use]
    pub const fn palette_size(&self) -> u8 {
        self.palette_size
    }

    /// Writes every component of a freshly allocated handle.
    ///
    /// The color is drawn uniformly from `0..palette_size` using the caller's
    /// generator. Call once per handle, before it is activated.
    pub fn initialize<R: Rng>(
        &mut self,
        handle: EntityHandle,
        x: i32,
        y: i32,
        health: i32,
        rng: &mut R,
    ) {
        let color = ColorIndex::new(rng.gen_range(0..self.palette_size));

        self.positions.set(handle, Position::new(x, y));
        self.healths.set(handle, Health::new(health));
        self.colors.set(handle, color);
    }

    /// Position of a handle's slot.
    #[inline]
    #[must_use]
    pub fn position(&self, handle: EntityHandle) -> Option<Position> {
        self.positions.get(handle).copied()
    }

    /// Exclusive in-place access to a handle's position.
    #[inline]
    pub fn position_mut(&mut self, handle: EntityHandle) -> Option<&mut Position> {
        self.positions.get_mut(handle)
    }

    /// Health of a handle's slot.
    #[inline]
    #[must_use]
    pub fn health(&self, handle: EntityHandle) -> Option<Health> {
        self.healths.get(handle).copied()
    }

    /// Color of a handle's slot.
    #[inline]
    #[must_use]
    pub fn color_index(&self, handle: EntityHandle) -> Option<ColorIndex> {
        self.colors.get(handle).copied()
    }

    /// The whole position array, for passes that index it per live handle.
    #[inline]
    pub fn positions_mut(&mut self) -> &mut [Position] {
        self.positions.as_mut_slice()
    }

    /// The whole position array.
    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        self.positions.as_slice()
    }

    /// The whole color array.
    #[inline]
    #[must_use]
    pub fn colors(&self) -> &[ColorIndex] {
        self.colors.as_slice()
    }
}
