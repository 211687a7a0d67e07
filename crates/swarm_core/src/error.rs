//! # Error Types
//!
//! The ECS core has exactly one runtime failure: running out of handles.
//! Everything else that can go wrong happens before a `World` exists,
//! while its configuration is being loaded.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the ECS core.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcsError {
    /// Every handle in the pool is already live.
    ///
    /// Non-fatal: the pool is left untouched and the caller decides whether
    /// to drop the request, log it, or stop spawning.
    #[error("entity pool exhausted: all {capacity} handles are live")]
    PoolExhausted {
        /// Capacity of the exhausted pool.
        capacity: usize,
    },
}

/// Result type for ECS operations.
pub type EcsResult<T> = Result<T, EcsError>;

/// Errors that can occur while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration parsed but describes an impossible world.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
