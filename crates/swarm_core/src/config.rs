//! # World Configuration
//!
//! Every constant the core needs is injected through [`WorldConfig`].
//! Configs are loaded once at startup from TOML; any key left out falls back
//! to the reference values below.
//!
//! ```toml
//! capacity = 10000
//! screen_width = 1000
//! screen_height = 1000
//! speed_min = -1
//! speed_max = 2
//! palette_size = 4
//! starting_health = 10
//! seed = 42
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::ecs::ScreenBounds;
use crate::error::{ConfigError, ConfigResult};

/// Reference entity capacity.
pub const DEFAULT_CAPACITY: usize = 10_000;
/// Reference screen width in pixels.
pub const DEFAULT_SCREEN_WIDTH: i32 = 1000;
/// Reference screen height in pixels.
pub const DEFAULT_SCREEN_HEIGHT: i32 = 1000;
/// Reference lower bound (inclusive) of a per-tick step.
pub const DEFAULT_SPEED_MIN: i32 = -1;
/// Reference upper bound (exclusive) of a per-tick step.
pub const DEFAULT_SPEED_MAX: i32 = 2;
/// Reference palette size (red, green, blue, orange).
pub const DEFAULT_PALETTE_SIZE: u8 = 4;
/// Reference health given to every spawned entity.
pub const DEFAULT_STARTING_HEALTH: i32 = 10;

/// Construction-time constants for a [`World`](crate::World).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Maximum number of simultaneously live entities.
    pub capacity: usize,
    /// Width of the toroidal playfield.
    pub screen_width: i32,
    /// Height of the toroidal playfield.
    pub screen_height: i32,
    /// Smallest step an entity may take per axis per tick (inclusive).
    pub speed_min: i32,
    /// Largest step an entity may take per axis per tick (exclusive).
    pub speed_max: i32,
    /// Number of colors in the renderer's palette.
    pub palette_size: u8,
    /// Health written into every newly spawned entity.
    pub starting_health: i32,
    /// Seed for the world's random generator. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            speed_min: DEFAULT_SPEED_MIN,
            speed_max: DEFAULT_SPEED_MAX,
            palette_size: DEFAULT_PALETTE_SIZE,
            starting_health: DEFAULT_STARTING_HEALTH,
            seed: None,
        }
    }
}

impl WorldConfig {
    /// Parses a configuration from a TOML string and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::Invalid`] if the values fail [`validate`](Self::validate).
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Returns a copy of this config with a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the config describes a world that can be built.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violated rule.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.capacity == 0 {
            return Err(invalid("capacity must be greater than zero"));
        }
        if u32::try_from(self.capacity).is_err() {
            return Err(invalid(format!(
                "capacity {} exceeds the handle range ({})",
                self.capacity,
                u32::MAX
            )));
        }
        if self.screen_width <= 0 || self.screen_height <= 0 {
            return Err(invalid(format!(
                "screen must be non-empty, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.speed_min >= self.speed_max {
            return Err(invalid(format!(
                "speed range [{}, {}) is empty",
                self.speed_min, self.speed_max
            )));
        }
        if self.palette_size == 0 {
            return Err(invalid("palette_size must be greater than zero"));
        }
        Ok(())
    }

    /// The playfield extents as wraparound bounds.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> ScreenBounds {
        ScreenBounds::new(self.screen_width, self.screen_height)
    }
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(reason.into())
}
