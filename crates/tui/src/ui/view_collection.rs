//! View collection rendering: one book at a time with the sort selector

use crate::state::AppState;
use crate::ui::{caption_style, highlight_style, text_style};
use bookshelf_core::Book;
use bookshelf_store::SortOrder;
use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Renders the view collection screen
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    render_book_card(frame, chunks[0], state);
    render_sort_bar(frame, chunks[1], state);
}

/// Formats the date-added identifier as a local calendar date
fn format_date_added(book: &Book) -> String {
    let micros = book.date_added.as_micros();
    DateTime::from_timestamp(
        (micros / 1_000_000) as i64,
        ((micros % 1_000_000) * 1_000) as u32,
    )
    .map(|utc| {
        utc.with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    })
    .unwrap_or_else(|| book.date_added.to_string())
}

fn render_book_card(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(collection) = &state.collection else {
        return;
    };

    let position = format!("Book {} of {}", state.book_index + 1, collection.len());

    let lines = match collection.get(state.book_index) {
        Some(book) => vec![
            Line::from(Span::styled(book.title.clone(), highlight_style())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Author:         ", caption_style()),
                Span::styled(book.author.clone(), text_style()),
            ]),
            Line::from(vec![
                Span::styled("Year published: ", caption_style()),
                Span::styled(book.year_published.to_string(), text_style()),
            ]),
            Line::from(vec![
                Span::styled("Page count:     ", caption_style()),
                Span::styled(book.page_count.to_string(), text_style()),
            ]),
            Line::from(vec![
                Span::styled("Date added:     ", caption_style()),
                Span::styled(format_date_added(book), text_style()),
            ]),
        ],
        None => vec![Line::from("")],
    };

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(position),
    );

    frame.render_widget(card, area);
}

fn render_sort_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![Span::styled("Sorted by: ", caption_style())];
    for (i, order) in SortOrder::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", caption_style()));
        }
        let style = if *order == state.sort_order {
            highlight_style()
        } else {
            text_style()
        };
        spans.push(Span::styled(order.label(), style));
    }

    let bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Sort"));

    frame.render_widget(bar, area);
}
