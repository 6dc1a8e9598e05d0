//! Terminal key handling.
//!
//! Turns crossterm key events into host actions. Movement keys are passed on
//! as raw key identifiers so the engine's alias table decides what they mean.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the host should do with one key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    /// Forward a raw key identifier to the engine.
    Key(String),
    /// The "Play Again" control. Only offered while the game is over.
    PlayAgain,
    Quit,
    Ignore,
}

/// Browser-style identifier for a key (`ArrowUp`, `w`, `ص`, ...).
pub fn key_identifier(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Up => Some("ArrowUp".to_string()),
        KeyCode::Down => Some("ArrowDown".to_string()),
        KeyCode::Left => Some("ArrowLeft".to_string()),
        KeyCode::Right => Some("ArrowRight".to_string()),
        KeyCode::Char(c) => Some(c.to_string()),
        _ => None,
    }
}

/// Map a key event to a host action. `game_over` controls whether the
/// Play Again keys are live.
pub fn map_key_event(key: KeyEvent, game_over: bool) -> HostAction {
    // Windows reports releases too; only presses count.
    if key.kind != KeyEventKind::Press {
        return HostAction::Ignore;
    }

    match key.code {
        KeyCode::Esc => return HostAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return HostAction::Quit
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => return HostAction::Quit,
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') if game_over => {
            return HostAction::PlayAgain
        }
        _ => {}
    }

    match key_identifier(key.code) {
        Some(id) => HostAction::Key(id),
        None => HostAction::Ignore,
    }
}
