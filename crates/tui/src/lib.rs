//! Terminal User Interface for Bookshelf

mod app;
mod error;
mod events;
mod state;
pub mod ui;

pub use app::App;
pub use error::{TuiError, TuiResult};
pub use state::{AddField, AddForm, AppState, Dialog, Screen};

use bookshelf_config::Config;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

/// Main TUI application wrapper: owns terminal setup and teardown
pub struct TuiApp {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
}

impl TuiApp {
    /// Creates and initializes a new TUI application
    pub fn new(config: &Config) -> TuiResult<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            app: App::new(config),
        })
    }

    /// Runs the TUI application
    pub fn run(&mut self) -> TuiResult<()> {
        let result = self.app.run(&mut self.terminal);
        self.cleanup()?;
        result
    }

    /// Cleans up terminal state
    fn cleanup(&mut self) -> TuiResult<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_exports_accessible() {
        let _: AppState = AppState::new();
        let _: Screen = Screen::MainMenu;
        let _ = App::new(&Config::default());
    }
}
