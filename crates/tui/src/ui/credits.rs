//! Credits rendering

use crate::state::AppState;
use crate::ui::text_style;
use ratatui::{
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const CREDITS: &str = "\
CREDITS

Book metadata courtesy of the Open Library API
https://openlibrary.org/dev/docs/api/books

Built with ratatui and crossterm.";

/// Renders the credits screen
pub fn render(frame: &mut Frame, area: Rect, _state: &AppState) {
    let body = Paragraph::new(CREDITS)
        .alignment(Alignment::Center)
        .style(text_style())
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(body, area);
}
