//! # Entity Management
//!
//! Entities are bare indices into the component arrays. The pool hands them
//! out from a LIFO free-list and keeps a dense list of live handles in spawn
//! order, which is what every per-tick pass iterates.

use crate::error::{EcsError, EcsResult};

/// Identifier of one entity slot across all component arrays.
///
/// Always lies in `[0, capacity)` of the pool that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct EntityHandle(u32);

impl EntityHandle {
    /// Creates a handle from a raw slot index.
    #[inline]
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the slot index as stored.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the slot index for indexing component arrays.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Fixed-capacity handle allocator.
///
/// At all times `free_list` and `live` are disjoint and together hold every
/// handle in `[0, capacity)` exactly once.
pub struct EntityPool {
    /// Unused handles; the end of the vector is handed out first.
    free_list: Vec<u32>,
    /// Live handles in activation order.
    live: Vec<EntityHandle>,
    /// Per-slot liveness, for O(1) lookups.
    alive: Box<[bool]>,
    /// Maximum capacity.
    capacity: usize,
}

impl EntityPool {
    /// Creates a pool with every handle free.
    ///
    /// The free-list starts full and the live list is reserved to capacity,
    /// so allocation and activation never reallocate.
    ///
    /// # Panics
    ///
    /// Panics if capacity exceeds `u32::MAX`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let top = u32::try_from(capacity).expect("capacity cannot exceed u32::MAX");

        // Reversed so that handles come out as 0, 1, 2, ...
        let free_list: Vec<u32> = (0..top).rev().collect();

        Self {
            free_list,
            live: Vec::with_capacity(capacity),
            alive: vec![false; capacity].into_boxed_slice(),
            capacity,
        }
    }

    /// Returns the maximum capacity of this pool.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of live handles.
    #[inline]
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Returns the number of handles still available.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Takes one handle off the free-list.
    ///
    /// The handle is not yet visible to iteration; pass it to
    /// [`activate`](Self::activate) once its components are written.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::PoolExhausted`] when no handle is free. The pool
    /// is unchanged in that case.
    #[inline]
    pub fn allocate(&mut self) -> EcsResult<EntityHandle> {
        self.free_list
            .pop()
            .map(EntityHandle)
            .ok_or(EcsError::PoolExhausted {
                capacity: self.capacity,
            })
    }

    /// Appends a freshly allocated handle to the live list.
    ///
    /// Calling this twice for one handle, or with a handle that did not come
    /// from [`allocate`](Self::allocate), breaks the pool invariant.
    #[inline]
    pub fn activate(&mut self, handle: EntityHandle) {
        debug_assert!(!self.is_live(handle), "handle activated twice");
        self.alive[handle.index()] = true;
        self.live.push(handle);
    }

    /// Live handles in activation order.
    #[inline]
    #[must_use]
    pub fn live_handles(&self) -> &[EntityHandle] {
        &self.live
    }

    /// Returns `true` if the handle is currently live.
    #[inline]
    #[must_use]
    pub fn is_live(&self, handle: EntityHandle) -> bool {
        self.alive.get(handle.index()).copied().unwrap_or(false)
    }

    /// Returns a live handle to the free-list.
    ///
    /// Nothing in the world destroys entities yet; this exists so the
    /// free-list is usable in both directions. The live list keeps its
    /// relative order. The released handle is the next one allocated.
    ///
    /// # Returns
    ///
    /// `true` if the handle was live and is now free, `false` otherwise.
    pub fn release(&mut self, handle: EntityHandle) -> bool {
        if !self.is_live(handle) {
            return false;
        }
        let Some(position) = self.live.iter().position(|&h| h == handle) else {
            return false;
        };
        self.live.remove(position);
        self.alive[handle.index()] = false;
        self.free_list.push(handle.0);
        true
    }
}
