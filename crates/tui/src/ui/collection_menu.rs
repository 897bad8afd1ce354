//! Collection menu rendering

use crate::state::{AppState, COLLECTION_MENU_ENTRIES};
use crate::ui::{caption_style, highlight_style, text_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Renders the collection menu
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let items: Vec<ListItem> = COLLECTION_MENU_ENTRIES
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
            .title("Collection loaded — select an option"),
    );

    frame.render_widget(list, chunks[0]);

    let info = match &state.collection {
        Some(collection) => format!(
            "{} | {} book(s)",
            collection.path().display(),
            collection.len()
        ),
        None => String::new(),
    };

    let summary = Paragraph::new(Line::from(info))
        .style(caption_style())
        .block(Block::default().borders(Borders::ALL).title("Collection"));

    frame.render_widget(summary, chunks[1]);
}
