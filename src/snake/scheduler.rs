//! Fixed-rate stepping on top of an unthrottled frame signal.

use super::types::GameStatus;

/// What the engine should do with one frame signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAction {
    /// Game is over: leave state alone and stop asking for frames.
    Halt,
    /// Interval not yet elapsed: leave state alone, ask for the next frame.
    Wait,
    /// Run one movement step, then ask for the next frame.
    Step,
}

/// Throttles host frame signals down to one step per `interval_ms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickScheduler {
    interval_ms: u64,
    /// Timestamp of the last step. `None` until the first frame primes it.
    last_step_ms: Option<u64>,
}

impl TickScheduler {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_step_ms: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn last_step_ms(&self) -> Option<u64> {
        self.last_step_ms
    }

    /// Forget the last step time; the next frame primes the clock again.
    pub fn rearm(&mut self) {
        self.last_step_ms = None;
    }

    pub fn on_frame(&mut self, timestamp_ms: u64, status: GameStatus) -> FrameAction {
        if status == GameStatus::Over {
            return FrameAction::Halt;
        }

        let Some(last) = self.last_step_ms else {
            self.last_step_ms = Some(timestamp_ms);
            return FrameAction::Wait;
        };

        // A clock that runs backwards counts as no time passing.
        let elapsed = timestamp_ms.saturating_sub(last);
        if elapsed < self.interval_ms {
            return FrameAction::Wait;
        }

        self.last_step_ms = Some(timestamp_ms);
        FrameAction::Step
    }
}
