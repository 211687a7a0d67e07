//! # SWARM Core
//!
//! A minimal fixed-capacity Entity Component System:
//! - Entity handles allocated from a free-list, live handles kept dense
//! - Position, health and color stored as parallel arrays
//! - A per-tick random walk with toroidal wraparound
//!
//! Rendering, windowing and tick scheduling live outside this crate. The
//! core only answers `spawn` and `tick`, and lends out read-only views of
//! the live set in between.
//!
//! ## Example
//!
//! ```rust,ignore
//! use swarm_core::{World, WorldConfig};
//!
//! let mut world = World::new(WorldConfig::default().with_seed(42))?;
//! while world.spawn(500, 500).is_ok() {}
//! world.tick();
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod ecs;
pub mod error;

pub use config::WorldConfig;
pub use ecs::{
    ColorIndex, Component, ComponentStorage, ComponentStore, EntityHandle, EntityPool,
    EntityView, Health, Position, ScreenBounds, World,
};
pub use error::{ConfigError, ConfigResult, EcsError, EcsResult};
