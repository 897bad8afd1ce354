//! Event handling for TUI

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

/// Application events
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Key press event
    Key(KeyEvent),
    /// Tick event for updates
    Tick,
    /// Quit application
    Quit,
    /// Resize event
    Resize(u16, u16),
}

/// Event handler
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new event handler
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Polls for the next event.
    ///
    /// Only Ctrl-C is a hard quit here; plain characters must reach the
    /// screens, several of which are text inputs.
    pub fn next(&self) -> crate::error::TuiResult<AppEvent> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => {
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        Ok(AppEvent::Quit)
                    } else {
                        Ok(AppEvent::Key(key))
                    }
                }
                CrosstermEvent::Resize(w, h) => Ok(AppEvent::Resize(w, h)),
                _ => Ok(AppEvent::Tick),
            }
        } else {
            Ok(AppEvent::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}
