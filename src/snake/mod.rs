//! Snake: a tile-grid snake simulation driven by host frames and key events.

pub mod engine;
pub mod input;
pub mod logic;
pub mod render;
pub mod scheduler;
pub mod types;

pub use engine::{Engine, GameListener, HostBinding, TickOutcome};
pub use input::KeyAliases;
pub use logic::{DeathCause, FoodPolicy, StepEvent};
pub use render::{render, DrawCommand, Rgb};
pub use types::{Cell, GameState, GameStatus, Geometry, Heading};
