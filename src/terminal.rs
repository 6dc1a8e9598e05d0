//! Raw mode and alternate screen, restored on every exit path.

use crossterm::cursor::Show;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use std::io::{self, Write};

/// Owns the terminal modes the game switches on. Dropping it puts the
/// terminal back even if setup failed halfway or the frame loop errored.
pub struct TerminalSession<W: Write> {
    out: W,
    active: bool,
}

impl<W: Write> TerminalSession<W> {
    /// Enter raw mode and the alternate screen on `out`.
    pub fn enter(out: W) -> io::Result<Self> {
        enable_raw_mode()?;
        // Armed before the next step so a failure there still restores raw mode.
        let mut session = Self { out, active: true };
        session.out.execute(EnterAlternateScreen)?;
        Ok(session)
    }

    /// Undo everything `enter` did. Every step runs even if an earlier one
    /// fails; the first error is returned. Later calls do nothing.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let raw = disable_raw_mode();
        let screen = self.out.execute(LeaveAlternateScreen).map(|_| ());
        let cursor = self.out.execute(Show).map(|_| ());
        raw.and(screen).and(cursor)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl<W: Write> Drop for TerminalSession<W> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEAVE_ALT_SCREEN: &str = "\x1b[?1049l";
    const SHOW_CURSOR: &str = "\x1b[?25h";

    /// A session that is already "entered" without touching the real tty.
    fn armed<W: Write>(out: W) -> TerminalSession<W> {
        TerminalSession { out, active: true }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_restore_leaves_screen_and_shows_cursor() {
        let mut session = armed(Vec::new());
        session.restore().unwrap();

        let written = String::from_utf8(session.out.clone()).unwrap();
        assert!(written.contains(LEAVE_ALT_SCREEN));
        assert!(written.contains(SHOW_CURSOR));
        assert!(!session.is_active());
    }

    #[test]
    fn test_restore_runs_once() {
        let mut session = armed(Vec::new());
        session.restore().unwrap();
        let len = session.out.len();

        session.restore().unwrap();
        assert_eq!(session.out.len(), len);
    }

    #[test]
    fn test_drop_restores() {
        let mut out = Vec::new();
        drop(armed(&mut out));
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains(LEAVE_ALT_SCREEN));
    }

    #[test]
    fn test_failed_restore_reports_error_and_disarms() {
        let mut session = armed(BrokenPipe);
        assert!(session.restore().is_err());
        assert!(!session.is_active());
        assert!(session.restore().is_ok());
    }
}
