//! # Components
//!
//! Components are pure data containers with no behavior beyond small
//! value-level helpers. They must be `Copy` and fixed-size so the storage can
//! pre-allocate them.

use bytemuck::{Pod, Zeroable};

/// Marker trait for ECS components.
///
/// Components must be:
/// - `Copy`: no heap allocations, bitwise copyable
/// - `Pod` + `Zeroable`: plain old data, safe to zero-fill at pre-allocation
/// - `Default`: the value stale slots hold before a spawn writes them
pub trait Component: Copy + Pod + Zeroable + Default + Send + Sync + 'static {}

/// Extents of the toroidal playfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenBounds {
    /// Width; valid x coordinates are `0..width`.
    pub width: i32,
    /// Height; valid y coordinates are `0..height`.
    pub height: i32,
}

impl ScreenBounds {
    /// Creates new bounds.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if the position lies inside the playfield.
    #[inline]
    #[must_use]
    pub const fn contains(self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }
}

/// Integer screen position of an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Position {
    /// X coordinate in pixels.
    pub x: i32,
    /// Y coordinate in pixels.
    pub y: i32,
}

impl Component for Position {}

impl Position {
    /// Creates a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Moves by `(dx, dy)` and wraps each axis around the playfield edges.
    ///
    /// Leaving through one edge lands on the opposite edge's last pixel, so
    /// `-1` becomes `width - 1` and `width` becomes `0`.
    #[inline]
    pub fn step(&mut self, dx: i32, dy: i32, bounds: ScreenBounds) {
        self.x = wrap_axis(self.x.saturating_add(dx), bounds.width);
        self.y = wrap_axis(self.y.saturating_add(dy), bounds.height);
    }
}

/// Toroidal correction for a single axis.
#[inline]
#[must_use]
pub const fn wrap_axis(mut value: i32, extent: i32) -> i32 {
    if value < 0 {
        value = extent - 1;
    }
    if value > extent - 1 {
        value = 0;
    }
    value
}

/// Hit points. Written once at spawn; nothing in the core changes it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct Health {
    /// Current health.
    pub value: i32,
}

impl Component for Health {}

impl Health {
    /// Creates a new health component.
    #[inline]
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self { value }
    }
}

/// Index into the renderer's palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct ColorIndex {
    /// Palette slot, `0..palette_size`.
    pub index: u8,
}

impl Component for ColorIndex {}

impl ColorIndex {
    /// Creates a new color index.
    #[inline]
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self { index }
    }
}
