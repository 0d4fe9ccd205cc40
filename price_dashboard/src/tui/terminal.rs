//! Raw mode and alternate screen setup, undone on every exit path.

use std::io::{self, Stdout};

use crossterm::{
    cursor::Show,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Puts the terminal into raw mode on the alternate screen. If any step
/// fails the terminal is restored before the error is returned.
pub fn init() -> io::Result<Tui> {
    enable_raw_mode()?;
    enter_or_restore(
        || {
            execute!(io::stdout(), EnterAlternateScreen)?;
            Terminal::new(CrosstermBackend::new(io::stdout()))
        },
        restore,
    )
}

pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

// Runs `enter`; on failure runs `leave` and returns the original error.
fn enter_or_restore<T>(
    enter: impl FnOnce() -> io::Result<T>,
    leave: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    enter().inspect_err(|e| {
        if let Err(restore_err) = leave() {
            tracing::warn!(error = %restore_err, setup_error = %e, "failed to restore terminal");
        }
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn failed_setup_restores() {
        let restored = Cell::new(false);
        let result: io::Result<()> = enter_or_restore(
            || Err(io::Error::other("no alternate screen")),
            || {
                restored.set(true);
                Ok(())
            },
        );
        assert_eq!(result.unwrap_err().to_string(), "no alternate screen");
        assert!(restored.get());
    }

    #[test]
    fn successful_setup_keeps_terminal() {
        let restored = Cell::new(false);
        let value = enter_or_restore(
            || Ok(7),
            || {
                restored.set(true);
                Ok(())
            },
        )
        .unwrap();
        assert_eq!(value, 7);
        assert!(!restored.get());
    }

    #[test]
    fn restore_failure_keeps_setup_error() {
        let result: io::Result<()> = enter_or_restore(
            || Err(io::Error::other("setup")),
            || Err(io::Error::other("restore")),
        );
        assert_eq!(result.unwrap_err().to_string(), "setup");
    }
}
