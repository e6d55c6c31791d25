use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size,
};
use crossterm::tty::IsTty;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::error::GameError;

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Owns terminal lifecycle (raw mode + alternate screen) for one game session.
///
/// On drop, this type restores terminal state best-effort.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Checks the render target, then enters raw mode and the alternate screen.
    ///
    /// Fails without touching the terminal when stdout is not a TTY or is
    /// smaller than `needed` (`columns`, `rows`).
    pub fn enter(needed: (u16, u16)) -> Result<Self, GameError> {
        ensure_render_target(needed)?;

        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error.into());
        }

        let backend = CrosstermBackend::new(stdout);
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let _ = cleanup_terminal_best_effort();
                Err(error.into())
            }
        }
    }

    /// Returns mutable access to the inner ratatui terminal.
    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = cleanup_terminal_best_effort();
    }
}

fn ensure_render_target((needed_cols, needed_rows): (u16, u16)) -> Result<(), GameError> {
    if !io::stdout().is_tty() {
        return Err(GameError::MissingTerminal);
    }

    let (available_cols, available_rows) = size()?;
    if available_cols < needed_cols || available_rows < needed_rows {
        return Err(GameError::TerminalTooSmall {
            needed_cols,
            needed_rows,
            available_cols,
            available_rows,
        });
    }

    Ok(())
}

/// Leaves raw mode and the alternate screen, ignoring individual failures.
pub fn cleanup_terminal_best_effort() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}
