//! Main application logic
//!
//! Owns the event loop: every key is dispatched to a state transition, and
//! every operation outcome has already been converted to a dialog by the
//! time rendering happens. The ISBN lookup is the one blocking call made
//! from this loop; it holds the interface for at most the configured
//! timeout.

use crate::{
    error::TuiResult,
    events::{AppEvent, EventHandler},
    state::{AppState, Dialog, Screen},
    ui,
};
use bookshelf_config::Config;
use bookshelf_lookup::{MetadataSource, OpenLibrarySource};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;

/// The main TUI application
pub struct App {
    state: AppState,
    event_handler: EventHandler,
    lookup: Option<Box<dyn MetadataSource>>,
}

impl App {
    /// Creates a new application from the loaded configuration
    pub fn new(config: &Config) -> Self {
        let lookup: Option<Box<dyn MetadataSource>> = if config.lookup.enabled {
            Some(Box::new(OpenLibrarySource::with_options(
                config.lookup.base_url.clone(),
                Duration::from_secs(config.lookup.timeout_secs),
            )))
        } else {
            None
        };

        Self {
            state: AppState::with_default_directory(
                config.general.default_collection_dir.clone(),
            ),
            event_handler: EventHandler::default(),
            lookup,
        }
    }

    /// Runs the application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> TuiResult<()> {
        while !self.state.should_quit {
            terminal.draw(|frame| ui::render(frame, &self.state))?;

            match self.event_handler.next()? {
                AppEvent::Key(key) => self.handle_key(key.code, key.modifiers),
                AppEvent::Quit => self.state.quit(),
                AppEvent::Tick | AppEvent::Resize(_, _) => {}
            }
        }

        Ok(())
    }

    /// Handles key events. An open dialog swallows everything first.
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if let Some(dialog) = self.state.dialog.clone() {
            self.handle_dialog_key(dialog, code);
            return;
        }

        match self.state.screen {
            Screen::MainMenu => self.handle_main_menu_keys(code),
            Screen::CollectionMenu => self.handle_collection_menu_keys(code),
            Screen::ViewCollection => self.handle_view_keys(code),
            Screen::AddBook => self.handle_add_keys(code, modifiers),
            Screen::Instructions | Screen::Credits => {
                if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                    self.state.back_to_main_menu();
                }
            }
        }
    }

    fn handle_dialog_key(&mut self, dialog: Dialog, code: KeyCode) {
        match dialog {
            Dialog::ConfirmDelete { id, .. } => match code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.state.dismiss_dialog();
                    self.state.confirm_delete(id);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.state.dismiss_dialog();
                }
                _ => {}
            },
            Dialog::Info { .. } | Dialog::Error { .. } => {
                if matches!(code, KeyCode::Enter | KeyCode::Esc) {
                    self.state.dismiss_dialog();
                }
            }
        }
    }

    fn handle_main_menu_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.state.menu_up(),
            KeyCode::Down => self.state.menu_down(),
            KeyCode::Enter => match self.state.menu_index {
                0 => self.state.open_collection(),
                1 => self.state.show_instructions(),
                2 => self.state.show_credits(),
                _ => self.state.quit(),
            },
            // Typing edits the directory path while "Open collection" is selected
            KeyCode::Char(c) if self.state.menu_index == 0 => self.state.path_input.push(c),
            KeyCode::Backspace if self.state.menu_index == 0 => {
                self.state.path_input.pop();
            }
            KeyCode::Char('q') => self.state.quit(),
            KeyCode::Esc => self.state.quit(),
            _ => {}
        }
    }

    fn handle_collection_menu_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.state.menu_up(),
            KeyCode::Down => self.state.menu_down(),
            KeyCode::Enter => match self.state.menu_index {
                0 => self.state.view_collection(),
                1 => self.state.start_add(),
                _ => self.state.close_collection(),
            },
            KeyCode::Esc => self.state.close_collection(),
            _ => {}
        }
    }

    fn handle_view_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Up => self.state.previous_book(),
            KeyCode::Right | KeyCode::Down => self.state.next_book(),
            KeyCode::Char('s') => self.state.cycle_sort(),
            KeyCode::Char('d') => self.state.request_delete(),
            KeyCode::Esc => self.state.back_to_collection_menu(),
            _ => {}
        }
    }

    fn handle_add_keys(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Tab | KeyCode::Down => self.state.add_form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.state.add_form.focus_previous(),
            KeyCode::Enter => {
                if self.state.add_form.focus == crate::state::AddField::Isbn {
                    self.run_lookup();
                } else {
                    self.state.submit_add();
                }
            }
            KeyCode::Backspace => self.state.add_form.backspace(),
            KeyCode::Esc => self.state.back_to_collection_menu(),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.add_form.insert_char(c);
            }
            _ => {}
        }
    }

    /// Runs the blocking ISBN lookup and applies its outcome to the form
    fn run_lookup(&mut self) {
        let isbn = self.state.add_form.isbn.trim().to_string();
        if isbn.is_empty() {
            self.state.add_form.status = Some("No ISBN number was entered.".to_string());
            return;
        }

        match &self.lookup {
            Some(source) => {
                let result = source.lookup(&isbn);
                self.state.apply_lookup(result);
            }
            None => {
                self.state.add_form.status =
                    Some("ISBN lookup is disabled in the configuration.".to_string());
            }
        }
    }
}
