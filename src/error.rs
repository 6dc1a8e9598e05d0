//! Error types for engine construction and configuration loading.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Board or surface dimensions that cannot describe a square tile grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("grid size {grid_size} is below the minimum of {min}")]
    GridTooSmall { grid_size: i16, min: i16 },
    #[error("tile size must be at least one pixel")]
    ZeroTileSize,
    #[error("canvas size {canvas_size}px is not a multiple of tile size {tile_size}px")]
    UnevenCanvas { canvas_size: u32, tile_size: u32 },
    #[error("canvas {canvas_size}px / tile {tile_size}px does not equal grid size {grid_size}")]
    GridMismatch {
        canvas_size: u32,
        tile_size: u32,
        grid_size: i16,
    },
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error("state is for a {state}x{state} grid but the board is {board}x{board}")]
    StateGridMismatch { state: i16, board: i16 },
    #[error("snake has no cells")]
    EmptySnake,
    #[error("cell ({x}, {y}) is off the board")]
    CellOutOfBounds { x: i16, y: i16 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
