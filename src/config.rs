//! Engine configuration and its JSON file.

use crate::constants::{CANVAS_SIZE, CONFIG_FILE_NAME, GRID_SIZE, TICK_INTERVAL_MS, TILE_SIZE};
use crate::error::{ConfigError, GeometryError};
use crate::snake::input::KeyAliases;
use crate::snake::logic::FoodPolicy;
use crate::snake::types::Geometry;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for one engine instance.
///
/// Every field is optional in the file; missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cells per side of the square board
    pub grid_size: i16,

    /// Pixels per tile on the drawing surface
    pub tile_size: u32,

    /// Pixels per side of the drawing surface
    pub canvas_size: u32,

    /// Milliseconds between movement steps
    pub tick_interval_ms: u64,

    /// Where food may appear after it is eaten
    pub food_policy: FoodPolicy,

    /// Extra key bindings layered over the built-in table
    pub key_aliases: KeyAliases,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            tile_size: TILE_SIZE,
            canvas_size: CANVAS_SIZE,
            tick_interval_ms: TICK_INTERVAL_MS,
            food_policy: FoodPolicy::Anywhere,
            key_aliases: KeyAliases::empty(),
        }
    }
}

impl EngineConfig {
    /// Check the dimensions and timing, returning the board geometry.
    pub fn validate(&self) -> Result<Geometry, GeometryError> {
        if self.tick_interval_ms == 0 {
            return Err(GeometryError::ZeroTickInterval);
        }
        Geometry::new(self.grid_size, self.tile_size, self.canvas_size)
    }

    /// Built-in bindings with the configured extras applied on top.
    pub fn resolved_aliases(&self) -> KeyAliases {
        let mut aliases = KeyAliases::default();
        aliases.merge(&self.key_aliases);
        aliases
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: EngineConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config file from the platform config directory, or defaults if
    /// there is none.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// `config.json` inside the platform config directory, if one can be resolved.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "serpent")
}
