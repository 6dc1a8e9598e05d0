// Board geometry
pub const GRID_SIZE: i16 = 20;
pub const TILE_SIZE: u32 = 20;
pub const CANVAS_SIZE: u32 = 400;
/// Smallest board that fits the starting snake and its first food.
pub const MIN_GRID_SIZE: i16 = 4;

// Timing
pub const TICK_INTERVAL_MS: u64 = 100;
/// How long the terminal host waits for input before painting the next frame.
pub const FRAME_POLL_MS: u64 = 16;

// Starting snake
pub const INITIAL_SNAKE_LEN: usize = 3;

// Drawing (pixel sizes relative to a 20px tile)
pub const BORDER_WIDTH: f64 = 4.0;
pub const HEAD_RADIUS_RATIO: f64 = 0.75;
pub const BODY_RADIUS_RATIO: f64 = 0.4;
pub const TAIL_RADIUS_RATIO: f64 = 0.35;
pub const EYE_RADIUS_RATIO: f64 = 0.125;
pub const PUPIL_RADIUS_RATIO: f64 = 0.075;

// Files
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = "serpent.log";
