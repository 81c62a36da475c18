//! Terminal session setup and teardown.

use std::io::Stdout;

use crossterm::event::DisableBracketedPaste;
use crossterm::event::EnableBracketedPaste;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Owns the terminal session for the duration of the app.
///
/// Restores the terminal on Drop so an early return or panic unwind does not
/// leave the user's shell in raw mode.
pub struct RecastTui {
    pub(crate) terminal: Tui,
}

impl RecastTui {
    /// Enter raw mode + alternate screen with bracketed paste enabled.
    pub fn new() -> anyhow::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        crossterm::execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        Ok(Self { terminal })
    }
}

impl Drop for RecastTui {
    fn drop(&mut self) {
        // Always attempt to restore the terminal, even if the caller exits early.
        let _ = restore();
    }
}

fn restore() -> anyhow::Result<()> {
    crossterm::execute!(
        std::io::stdout(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    disable_raw_mode()?;
    Ok(())
}
