//! The engine: owns one game, throttles host frames into steps, and reports
//! score and game-over events back to the host.
//!
//! The host wires its own frame and input sources to [`Engine::tick`] and
//! [`Engine::handle_key`] / [`Engine::handle_input`], registers those
//! subscriptions once with [`Engine::bind`], and calls [`Engine::teardown`]
//! (or drops the engine) when it is done.

use super::input::KeyAliases;
use super::logic::{step_snake, submit_heading, FoodPolicy, StepEvent};
use super::render::{render, DrawCommand};
use super::scheduler::{FrameAction, TickScheduler};
use super::types::{GameState, Geometry, Heading};
use crate::config::EngineConfig;
use crate::error::GeometryError;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Host-side receiver of game notifications.
pub trait GameListener {
    /// Fired once per food eaten with the new score, and once per reset with 0.
    fn on_score_update(&mut self, score: u32);

    /// Fired once, when the game ends.
    fn on_game_over(&mut self);
}

/// Listener that ignores everything.
impl GameListener for () {
    fn on_score_update(&mut self, _score: u32) {}
    fn on_game_over(&mut self) {}
}

/// A host registration (frame source, key listener) that the engine releases
/// on teardown.
pub trait HostBinding {
    fn unbind(&mut self);
}

/// Result of one frame signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No step this frame.
    Idle,
    /// One movement step ran.
    Stepped(StepEvent),
    /// Game is over or the engine is torn down; no further frames are needed.
    Halted,
}

impl TickOutcome {
    /// Whether the host should keep delivering frame signals.
    pub fn wants_next_frame(&self) -> bool {
        !matches!(self, TickOutcome::Halted)
    }
}

pub struct Engine<L: GameListener, R: Rng = StdRng> {
    geometry: Geometry,
    food_policy: FoodPolicy,
    aliases: KeyAliases,

    state: GameState,
    scheduler: TickScheduler,
    rng: R,
    listener: L,

    bindings: Vec<Box<dyn HostBinding>>,
    /// Last level seen on the external reset line.
    reset_asserted: bool,
    torn_down: bool,
}

impl<L: GameListener> Engine<L, StdRng> {
    /// Create an engine with an entropy-seeded food RNG.
    pub fn new(config: &EngineConfig, listener: L) -> Result<Self, GeometryError> {
        Self::with_rng(config, listener, StdRng::from_entropy())
    }
}

impl<L: GameListener, R: Rng> Engine<L, R> {
    /// Create an engine drawing food positions from `rng`.
    ///
    /// Fails if the configured board and surface do not line up.
    pub fn with_rng(config: &EngineConfig, listener: L, rng: R) -> Result<Self, GeometryError> {
        let geometry = config.validate()?;
        Ok(Self {
            geometry,
            food_policy: config.food_policy,
            aliases: config.resolved_aliases(),
            state: GameState::new(geometry.grid_size()),
            scheduler: TickScheduler::new(config.tick_interval_ms),
            rng,
            listener,
            bindings: Vec::new(),
            reset_asserted: false,
            torn_down: false,
        })
    }

    /// Start from a prepared state instead of the canonical one. Reset still
    /// returns to the canonical state.
    ///
    /// The state must match the board size, have at least one snake cell, and
    /// keep the snake and food on the board.
    pub fn with_state(mut self, state: GameState) -> Result<Self, GeometryError> {
        if state.grid_size != self.geometry.grid_size() {
            return Err(GeometryError::StateGridMismatch {
                state: state.grid_size,
                board: self.geometry.grid_size(),
            });
        }
        if state.snake.is_empty() {
            return Err(GeometryError::EmptySnake);
        }
        if let Some(cell) = state
            .snake
            .iter()
            .chain(std::iter::once(&state.food))
            .find(|cell| !self.geometry.contains(**cell))
        {
            return Err(GeometryError::CellOutOfBounds {
                x: cell.x,
                y: cell.y,
            });
        }
        self.state = state;
        Ok(self)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn aliases(&self) -> &KeyAliases {
        &self.aliases
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.scheduler.interval_ms()
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Register a host subscription to release on teardown.
    pub fn bind(&mut self, mut binding: Box<dyn HostBinding>) {
        if self.torn_down {
            binding.unbind();
            return;
        }
        debug!("host binding registered ({} total)", self.bindings.len() + 1);
        self.bindings.push(binding);
    }

    /// Queue a heading for the next step. Reversals are dropped silently.
    pub fn handle_input(&mut self, heading: Heading) -> bool {
        if self.torn_down {
            return false;
        }
        submit_heading(&mut self.state, heading)
    }

    /// Resolve a raw key identifier through the alias table and queue it.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match self.aliases.resolve(key) {
            Some(heading) => self.handle_input(heading),
            None => false,
        }
    }

    /// Frame signal from the host with a monotonic timestamp in milliseconds.
    pub fn tick(&mut self, timestamp_ms: u64) -> TickOutcome {
        if self.torn_down {
            return TickOutcome::Halted;
        }

        match self.scheduler.on_frame(timestamp_ms, self.state.status) {
            FrameAction::Halt => TickOutcome::Halted,
            FrameAction::Wait => TickOutcome::Idle,
            FrameAction::Step => {
                let Some(event) = step_snake(&mut self.state, self.food_policy, &mut self.rng)
                else {
                    return TickOutcome::Halted;
                };
                match event {
                    StepEvent::Ate { score } => {
                        debug!("food eaten, score {}, next food at {:?}", score, self.state.food);
                        self.listener.on_score_update(score);
                    }
                    StepEvent::Died(cause) => {
                        info!(
                            "game over ({:?}) after {} steps with score {}",
                            cause, self.state.tick_count, self.state.score
                        );
                        self.listener.on_game_over();
                    }
                    StepEvent::Moved => {}
                }
                TickOutcome::Stepped(event)
            }
        }
    }

    /// Back to the canonical starting state.
    pub fn reset(&mut self) {
        if self.torn_down {
            return;
        }
        self.state = GameState::new(self.geometry.grid_size());
        self.scheduler.rearm();
        debug!("game reset");
        self.listener.on_score_update(0);
    }

    /// Level-triggered reset line. Resets on the rising edge only and returns
    /// whether a reset happened.
    pub fn set_reset_signal(&mut self, asserted: bool) -> bool {
        let rising = asserted && !self.reset_asserted;
        self.reset_asserted = asserted;
        if rising && !self.torn_down {
            self.reset();
            return true;
        }
        false
    }

    /// Release every host binding. All later calls leave the state untouched.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        for mut binding in self.bindings.drain(..) {
            binding.unbind();
        }
        info!("engine torn down at score {}", self.state.score);
    }

    /// Drawing commands for the current state.
    pub fn render(&self) -> Vec<DrawCommand> {
        render(&self.state, &self.geometry)
    }
}

impl<L: GameListener, R: Rng> Drop for Engine<L, R> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::types::{Cell, GameStatus};
    use rand_chacha::ChaCha8Rng;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        scores: Vec<u32>,
        game_overs: u32,
    }

    impl GameListener for Recorder {
        fn on_score_update(&mut self, score: u32) {
            self.scores.push(score);
        }
        fn on_game_over(&mut self) {
            self.game_overs += 1;
        }
    }

    struct FlagBinding(Rc<RefCell<u32>>);

    impl HostBinding for FlagBinding {
        fn unbind(&mut self) {
            *self.0.borrow_mut() += 1;
        }
    }

    fn engine() -> Engine<Recorder, ChaCha8Rng> {
        Engine::with_rng(
            &EngineConfig::default(),
            Recorder::default(),
            ChaCha8Rng::seed_from_u64(42),
        )
        .unwrap()
    }

    #[test]
    fn test_construction_fails_fast_on_bad_geometry() {
        let config = EngineConfig {
            canvas_size: 410,
            ..Default::default()
        };
        assert!(matches!(
            Engine::new(&config, ()),
            Err(GeometryError::UnevenCanvas { .. })
        ));
    }

    #[test]
    fn test_tick_throttles_to_interval() {
        let mut engine = engine();
        assert_eq!(engine.tick(0), TickOutcome::Idle);
        assert_eq!(engine.tick(50), TickOutcome::Idle);
        assert_eq!(engine.state().head(), Cell::new(10, 10));
        assert_eq!(engine.tick(100), TickOutcome::Stepped(StepEvent::Moved));
        assert_eq!(engine.state().head(), Cell::new(11, 10));
    }

    #[test]
    fn test_handle_key_through_aliases() {
        let mut engine = engine();
        assert!(engine.handle_key("w"));
        assert_eq!(engine.state().pending_heading, Heading::Up);

        // Only the committed heading (Right) can be reversed.
        assert!(engine.handle_key("ArrowDown"));
        assert_eq!(engine.state().pending_heading, Heading::Down);
        assert!(!engine.handle_key("a"));
        assert!(!engine.handle_key("ArrowLeft"));
        assert_eq!(engine.state().pending_heading, Heading::Down);

        assert!(!engine.handle_key("x"));
    }

    #[test]
    fn test_with_state_rejects_unusable_states() {
        let mut empty = GameState::new(20);
        empty.snake.clear();
        assert_eq!(
            engine().with_state(empty).err(),
            Some(GeometryError::EmptySnake)
        );

        assert_eq!(
            engine().with_state(GameState::new(10)).err(),
            Some(GeometryError::StateGridMismatch {
                state: 10,
                board: 20
            })
        );

        let mut off_board = GameState::new(20);
        off_board.food = Cell::new(20, 3);
        assert_eq!(
            engine().with_state(off_board).err(),
            Some(GeometryError::CellOutOfBounds { x: 20, y: 3 })
        );

        let mut start = GameState::new(20);
        start.snake.push_front(Cell::new(11, 10));
        let engine = engine().with_state(start.clone()).unwrap();
        assert_eq!(*engine.state(), start);
        assert_eq!(engine.render().len(), 3 + 5 + 3);
    }

    #[test]
    fn test_game_over_fires_once_and_halts() {
        let mut engine = engine();
        engine.tick(0);
        // Head at x=10 reaches the wall on the 10th step.
        let mut t = 0;
        while engine.state().status == GameStatus::Running {
            t += 100;
            engine.tick(t);
        }
        assert_eq!(engine.listener().game_overs, 1);
        assert_eq!(engine.state().head(), Cell::new(19, 10));

        assert_eq!(engine.tick(t + 100), TickOutcome::Halted);
        assert!(!engine.tick(t + 200).wants_next_frame());
        assert_eq!(engine.listener().game_overs, 1);
    }

    #[test]
    fn test_reset_notifies_zero_and_rearms() {
        let mut engine = engine();
        engine.tick(0);
        engine.tick(100);
        engine.reset();

        assert_eq!(engine.listener().scores, vec![0]);
        assert_eq!(*engine.state(), GameState::new(20));
        // First frame after reset only primes the clock.
        assert_eq!(engine.tick(150), TickOutcome::Idle);
    }

    #[test]
    fn test_reset_signal_rising_edge_only() {
        let mut engine = engine();
        assert!(engine.set_reset_signal(true));
        assert!(!engine.set_reset_signal(true));
        assert!(!engine.set_reset_signal(true));
        assert!(!engine.set_reset_signal(false));
        assert!(engine.set_reset_signal(true));
        assert_eq!(engine.listener().scores, vec![0, 0]);
    }

    #[test]
    fn test_teardown_unbinds_once_and_freezes_state() {
        let unbinds = Rc::new(RefCell::new(0));
        let mut engine = engine();
        engine.bind(Box::new(FlagBinding(unbinds.clone())));
        engine.bind(Box::new(FlagBinding(unbinds.clone())));
        engine.tick(0);

        engine.teardown();
        engine.teardown();
        assert_eq!(*unbinds.borrow(), 2);

        let frozen = engine.state().clone();
        assert_eq!(engine.tick(1_000), TickOutcome::Halted);
        assert!(!engine.handle_input(Heading::Up));
        engine.reset();
        assert!(!engine.set_reset_signal(true));
        assert_eq!(*engine.state(), frozen);
        assert!(engine.listener().scores.is_empty());
    }

    #[test]
    fn test_bind_after_teardown_unbinds_immediately() {
        let unbinds = Rc::new(RefCell::new(0));
        let mut engine = engine();
        engine.teardown();
        engine.bind(Box::new(FlagBinding(unbinds.clone())));
        assert_eq!(*unbinds.borrow(), 1);
    }

    #[test]
    fn test_drop_unbinds() {
        let unbinds = Rc::new(RefCell::new(0));
        {
            let mut engine = engine();
            engine.bind(Box::new(FlagBinding(unbinds.clone())));
        }
        assert_eq!(*unbinds.borrow(), 1);
    }
}
