//! Serpent - tile-grid snake engine with a terminal host.
//!
//! The `snake` module is the engine and has no terminal dependency; `app`,
//! `input`, and `ui` make up the crossterm/ratatui host around it.

pub mod app;
pub mod build_info;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod snake;
pub mod terminal;
pub mod ui;

pub use config::EngineConfig;
pub use constants::TICK_INTERVAL_MS;
pub use error::{ConfigError, GeometryError};
pub use snake::{Engine, GameListener, GameState};
