//! Main menu rendering

use crate::state::{AppState, MAIN_MENU_ENTRIES};
use crate::ui::{caption_style, highlight_style, text_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Renders the main menu: the entry list plus the directory input used by
/// "Open collection"
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    render_entries(frame, chunks[0], state);
    render_path_input(frame, chunks[1], state);
}

fn render_entries(frame: &mut Frame, area: Rect, state: &AppState) {
    let items: Vec<ListItem> = MAIN_MENU_ENTRIES
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == state.menu_index {
                highlight_style()
            } else {
                text_style()
            };
            ListItem::new(Line::from(Span::styled(*entry, style)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Welcome! Select an option"),
    );

    frame.render_widget(list, area);
}

fn render_path_input(frame: &mut Frame, area: Rect, state: &AppState) {
    // The input is live only while "Open collection" is selected
    let style = if state.menu_index == 0 {
        text_style()
    } else {
        caption_style()
    };

    let input = Paragraph::new(Line::from(state.path_input.as_str()))
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Collection directory"),
        );

    frame.render_widget(input, area);
}
