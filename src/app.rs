//! Terminal host state: the engine, the scoreboard it reports to, and the
//! frame/input subscriptions the engine holds while it is mounted.

use crate::input::HostAction;
use crate::snake::{Engine, GameListener, HostBinding, TickOutcome};
use log::debug;
use std::cell::Cell as FlagCell;
use std::rc::Rc;

/// Score and game-over flag shown beside the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u32,
    pub game_over: bool,
}

impl Scoreboard {
    pub fn clear(&mut self) {
        self.score = 0;
        self.game_over = false;
    }
}

impl GameListener for Scoreboard {
    fn on_score_update(&mut self, score: u32) {
        self.score = score;
    }

    fn on_game_over(&mut self) {
        self.game_over = true;
    }
}

/// A host subscription backed by a shared on/off flag that the frame loop polls.
struct Subscription {
    name: &'static str,
    active: Rc<FlagCell<bool>>,
}

impl HostBinding for Subscription {
    fn unbind(&mut self) {
        debug!("{} subscription released", self.name);
        self.active.set(false);
    }
}

pub struct App {
    engine: Engine<Scoreboard>,
    frames_active: Rc<FlagCell<bool>>,
    input_active: Rc<FlagCell<bool>>,
    /// Play Again holds the reset line high for exactly one frame.
    reset_requested: bool,
    /// The engine asked for no more frames. Only a pending reset wakes it.
    halted: bool,
    quit: bool,
}

impl App {
    /// Mount `engine`: subscribe it to frames and key input once.
    pub fn new(mut engine: Engine<Scoreboard>) -> Self {
        let frames_active = Rc::new(FlagCell::new(true));
        let input_active = Rc::new(FlagCell::new(true));
        engine.bind(Box::new(Subscription {
            name: "frame",
            active: frames_active.clone(),
        }));
        engine.bind(Box::new(Subscription {
            name: "input",
            active: input_active.clone(),
        }));
        Self {
            engine,
            frames_active,
            input_active,
            reset_requested: false,
            halted: false,
            quit: false,
        }
    }

    pub fn engine(&self) -> &Engine<Scoreboard> {
        &self.engine
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        self.engine.listener()
    }

    pub fn wants_frames(&self) -> bool {
        self.frames_active.get()
    }

    pub fn accepts_input(&self) -> bool {
        self.input_active.get()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle_action(&mut self, action: HostAction) {
        if !self.accepts_input() {
            return;
        }
        match action {
            HostAction::Key(key) => {
                self.engine.handle_key(&key);
            }
            HostAction::PlayAgain => {
                if self.scoreboard().game_over {
                    self.engine.listener_mut().clear();
                    self.reset_requested = true;
                }
            }
            HostAction::Quit => self.quit = true,
            HostAction::Ignore => {}
        }
    }

    /// One host frame at `now_ms` on a monotonic clock.
    pub fn frame(&mut self, now_ms: u64) -> TickOutcome {
        if !self.wants_frames() || (self.halted && !self.reset_requested) {
            return TickOutcome::Halted;
        }
        let asserted = std::mem::take(&mut self.reset_requested);
        self.engine.set_reset_signal(asserted);
        let outcome = self.engine.tick(now_ms);
        self.halted = !outcome.wants_next_frame();
        outcome
    }

    /// Unmount the engine. No frame or key reaches it afterwards.
    pub fn teardown(&mut self) {
        self.engine.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::snake::{GameStatus, Heading};

    fn app() -> App {
        App::new(Engine::new(&EngineConfig::default(), Scoreboard::default()).unwrap())
    }

    fn run_until_over(app: &mut App) -> u64 {
        let mut t = 0;
        app.frame(t);
        while app.engine().state().status == GameStatus::Running {
            t += 100;
            app.frame(t);
        }
        t
    }

    #[test]
    fn test_keys_reach_engine() {
        let mut app = app();
        app.handle_action(HostAction::Key("ArrowUp".to_string()));
        assert_eq!(app.engine().state().pending_heading, Heading::Up);
    }

    #[test]
    fn test_play_again_ignored_while_running() {
        let mut app = app();
        app.handle_action(HostAction::PlayAgain);
        assert!(!app.reset_requested);
    }

    #[test]
    fn test_play_again_resets_on_next_frame_once() {
        let mut app = app();
        let t = run_until_over(&mut app);
        assert!(app.scoreboard().game_over);

        app.handle_action(HostAction::PlayAgain);
        assert!(!app.scoreboard().game_over);
        assert_eq!(app.engine().state().status, GameStatus::Over);

        app.frame(t + 10);
        assert_eq!(app.engine().state().status, GameStatus::Running);
        assert_eq!(app.scoreboard().score, 0);

        // The line drops on the next frame; the game keeps running normally.
        app.frame(t + 20);
        app.frame(t + 120);
        assert_eq!(app.engine().state().head().x, 11);
    }

    #[test]
    fn test_frames_stop_after_game_over_until_play_again() {
        let mut app = app();
        let t = run_until_over(&mut app);
        assert!(!app.is_halted());

        // The engine reports it wants no more frames, so the host parks.
        assert_eq!(app.frame(t + 100), TickOutcome::Halted);
        assert!(app.is_halted());
        let parked = app.engine().state().clone();
        for i in 2..10 {
            assert_eq!(app.frame(t + i * 100), TickOutcome::Halted);
        }
        assert_eq!(*app.engine().state(), parked);

        // Keys do not wake it either; only the reset line does.
        app.handle_action(HostAction::Key("ArrowUp".to_string()));
        assert_eq!(app.frame(t + 1_000), TickOutcome::Halted);

        app.handle_action(HostAction::PlayAgain);
        assert_eq!(app.frame(t + 1_100), TickOutcome::Idle);
        assert!(!app.is_halted());
        assert!(matches!(app.frame(t + 1_200), TickOutcome::Stepped(_)));
    }

    #[test]
    fn test_quit_sets_flag() {
        let mut app = app();
        app.handle_action(HostAction::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn test_teardown_releases_subscriptions() {
        let mut app = app();
        assert!(app.wants_frames() && app.accepts_input());
        app.teardown();
        assert!(!app.wants_frames());
        assert!(!app.accepts_input());

        let frozen = app.engine().state().clone();
        app.handle_action(HostAction::Key("ArrowUp".to_string()));
        assert_eq!(app.frame(10_000), TickOutcome::Halted);
        assert_eq!(*app.engine().state(), frozen);
    }
}
