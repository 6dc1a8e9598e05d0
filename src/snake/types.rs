//! Snake data structures: grid cells, headings, and the game state.

use crate::constants::INITIAL_SNAKE_LEN;
use crate::error::GeometryError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Cardinal heading for snake movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    /// Returns the opposite heading.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the (dx, dy) delta for this heading. Screen coordinates: y grows downward.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// A position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i16,
    pub y: i16,
}

impl Cell {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step along `heading`. May lie off the board.
    pub fn step(&self, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Running,
    Over,
}

/// Checked board and drawing-surface dimensions.
///
/// The surface is `canvas_size × canvas_size` pixels split into square tiles of
/// `tile_size` pixels, and the tile count per side is exactly `grid_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    grid_size: i16,
    tile_size: u32,
    canvas_size: u32,
}

impl Geometry {
    pub fn new(grid_size: i16, tile_size: u32, canvas_size: u32) -> Result<Self, GeometryError> {
        if grid_size < crate::constants::MIN_GRID_SIZE {
            return Err(GeometryError::GridTooSmall {
                grid_size,
                min: crate::constants::MIN_GRID_SIZE,
            });
        }
        if tile_size == 0 {
            return Err(GeometryError::ZeroTileSize);
        }
        if canvas_size % tile_size != 0 {
            return Err(GeometryError::UnevenCanvas {
                canvas_size,
                tile_size,
            });
        }
        if canvas_size / tile_size != grid_size as u32 {
            return Err(GeometryError::GridMismatch {
                canvas_size,
                tile_size,
                grid_size,
            });
        }
        Ok(Self {
            grid_size,
            tile_size,
            canvas_size,
        })
    }

    pub fn grid_size(&self) -> i16 {
        self.grid_size
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn canvas_size(&self) -> u32 {
        self.canvas_size
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.grid_size).contains(&cell.x) && (0..self.grid_size).contains(&cell.y)
    }

    /// Total number of cells on the board.
    pub fn cell_count(&self) -> usize {
        let n = self.grid_size as usize;
        n * n
    }
}

/// Main game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub grid_size: i16,
    pub status: GameStatus,

    /// Snake body segments. Head is at the front (index 0).
    pub snake: VecDeque<Cell>,
    /// Last committed heading. Input is validated against this one.
    pub heading: Heading,
    /// Heading applied on the next step.
    pub pending_heading: Heading,

    pub food: Cell,
    pub score: u32,
    /// Total movement steps elapsed.
    pub tick_count: u64,
}

impl GameState {
    /// Canonical starting state: a 3-cell snake in the middle of the board moving
    /// right, with food on the lower-right diagonal.
    pub fn new(grid_size: i16) -> Self {
        let center = grid_size / 2;
        let snake: VecDeque<Cell> = (0..INITIAL_SNAKE_LEN as i16)
            .map(|i| Cell::new(center - i, center))
            .collect();

        Self {
            grid_size,
            status: GameStatus::Running,
            snake,
            heading: Heading::Right,
            pending_heading: Heading::Right,
            food: initial_food(grid_size),
            score: 0,
            tick_count: 0,
        }
    }

    /// Panics on an empty snake; the engine never holds one.
    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    pub fn tail(&self) -> Cell {
        self.snake[self.snake.len() - 1]
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }
}

/// Where the first food of every game sits: (15, 15) on a 20×20 board.
pub fn initial_food(grid_size: i16) -> Cell {
    let at = grid_size * 3 / 4;
    Cell::new(at, at)
}
