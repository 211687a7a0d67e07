//! # Entity Component System
//!
//! A fixed-capacity, structure-of-arrays ECS.
//!
//! ## Design Philosophy
//!
//! - All storage is pre-allocated at world creation
//! - Components are stored in dense arrays indexed by entity handle
//! - Entity handles are plain indices, handed out from a LIFO free-list
//! - The live list is dense and in spawn order; ticks iterate only that

mod component;
mod entity;
mod storage;
mod world;

pub use component::{wrap_axis, ColorIndex, Component, Health, Position, ScreenBounds};
pub use entity::{EntityHandle, EntityPool};
pub use storage::{ComponentStorage, ComponentStore};
pub use world::{EntityView, World};
