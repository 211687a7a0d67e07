//! # Driver Configuration
//!
//! One TOML file configures both the world and the loop that drives it:
//!
//! ```toml
//! [world]
//! capacity = 10000
//! seed = 42
//!
//! [driver]
//! spawn_count = 10000
//! tick_rate = 60
//! max_ticks = 600
//! ```

use std::path::Path;

use serde::Deserialize;
use swarm_core::{ConfigError, ConfigResult, WorldConfig};

/// Everything the driver binary reads at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Constants injected into the world.
    pub world: WorldConfig,
    /// Cadence, population and reporting of the driver itself.
    pub driver: DriverConfig,
}

/// Settings owned by the driver rather than the core.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Spawn attempts at startup. Attempts past capacity are logged and dropped.
    pub spawn_count: usize,
    /// Ticks per second.
    pub tick_rate: u32,
    /// Stop after this many ticks; `0` runs until killed.
    pub max_ticks: u64,
    /// Log a frame summary every this many ticks.
    pub report_every: u64,
    /// Side length of an entity's square in pixels.
    pub entity_size: i32,
    /// Seed for startup positions. `None` seeds from OS entropy.
    pub spawn_seed: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            spawn_count: 10_000,
            tick_rate: 60,
            max_ticks: 600,
            report_every: 60,
            entity_size: 4,
            spawn_seed: None,
        }
    }
}

impl AppConfig {
    /// Reads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Parses and validates a config string.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.world.validate()?;
        config.driver.validate()?;
        Ok(config)
    }
}

impl DriverConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.tick_rate == 0 || self.tick_rate > 1_000_000 {
            return Err(ConfigError::Invalid(format!(
                "tick_rate must be in 1..=1000000, got {}",
                self.tick_rate
            )));
        }
        if self.report_every == 0 {
            return Err(ConfigError::Invalid("report_every must be greater than zero".into()));
        }
        if self.entity_size <= 0 {
            return Err(ConfigError::Invalid(format!(
                "entity_size must be positive, got {}",
                self.entity_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_reference_setup() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.driver.tick_rate, 60);
        assert_eq!(config.world.capacity, 10_000);
    }

    #[test]
    fn test_sections_parse() {
        let config = AppConfig::from_toml_str(
            "[world]\ncapacity = 3\nscreen_width = 10\n\n[driver]\nspawn_count = 5\nmax_ticks = 0\n",
        )
        .unwrap();
        assert_eq!(config.world.capacity, 3);
        assert_eq!(config.world.screen_width, 10);
        assert_eq!(config.driver.spawn_count, 5);
        assert_eq!(config.driver.max_ticks, 0);
    }

    #[test]
    fn test_world_section_is_validated() {
        let err = AppConfig::from_toml_str("[world]\npalette_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let err = AppConfig::from_toml_str("[driver]\ntick_rate = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
