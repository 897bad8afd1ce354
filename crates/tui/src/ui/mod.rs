//! UI rendering modules

pub mod add_book;
pub mod collection_menu;
pub mod credits;
pub mod instructions;
pub mod main_menu;
pub mod view_collection;

use crate::state::{AppState, Dialog, Screen};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Style for the selected entry of a list or form
pub(crate) fn highlight_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Style for ordinary text
pub(crate) fn text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for captions and key hints
pub(crate) fn caption_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Renders the main UI
pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0], state);
    render_content(frame, chunks[1], state);
    render_status_bar(frame, chunks[2], state);

    if let Some(dialog) = &state.dialog {
        render_dialog(frame, dialog);
    }
}

fn screen_title(screen: Screen) -> &'static str {
    match screen {
        Screen::MainMenu => "Main Menu",
        Screen::CollectionMenu => "Collection Menu",
        Screen::ViewCollection => "View Collection",
        Screen::AddBook => "Add Book",
        Screen::Instructions => "Instructions",
        Screen::Credits => "Credits",
    }
}

fn render_title_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = Paragraph::new(Line::from(format!(
        "Library Collection Manager — {}",
        screen_title(state.screen)
    )))
    .alignment(Alignment::Center)
    .style(text_style())
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(title, area);
}

/// Renders the current screen content
fn render_content(frame: &mut Frame, area: Rect, state: &AppState) {
    match state.screen {
        Screen::MainMenu => main_menu::render(frame, area, state),
        Screen::CollectionMenu => collection_menu::render(frame, area, state),
        Screen::ViewCollection => view_collection::render(frame, area, state),
        Screen::AddBook => add_book::render(frame, area, state),
        Screen::Instructions => instructions::render(frame, area, state),
        Screen::Credits => credits::render(frame, area, state),
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let hints = if state.dialog.is_some() {
        match state.dialog {
            Some(Dialog::ConfirmDelete { .. }) => "y: Confirm | n/Esc: Cancel",
            _ => "Enter/Esc: Dismiss",
        }
    } else {
        match state.screen {
            Screen::MainMenu => "↑/↓: Select | Enter: Choose | type to edit the directory path",
            Screen::CollectionMenu => "↑/↓: Select | Enter: Choose | Esc: Main menu",
            Screen::ViewCollection => {
                "←/→: Previous/Next book | s: Change sort | d: Delete | Esc: Back"
            }
            Screen::AddBook => "Tab/↑/↓: Move between fields | Enter: Add (on ISBN: pull) | Esc: Back",
            Screen::Instructions | Screen::Credits => "Esc/Enter: Back",
        }
    };

    let status = Paragraph::new(Line::from(hints))
        .style(caption_style())
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(status, area);
}

/// Renders the modal dialog over the screen
fn render_dialog(frame: &mut Frame, dialog: &Dialog) {
    let (title, message, color) = match dialog {
        Dialog::Info { title, message } => (title.as_str(), message.clone(), Color::Green),
        Dialog::Error { title, message } => (title.as_str(), message.clone(), Color::Red),
        Dialog::ConfirmDelete { title, .. } => (
            "CONFIRM DELETE",
            format!("Delete '{}' from the collection? This removes its file.", title),
            Color::Yellow,
        ),
    };

    let area = centered_rect(60, 30, frame.area());
    let body = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .style(text_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(body, area);
}

/// A centered rectangle taking the given percentages of the screen
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 30, area);
        assert!(rect.x >= area.x && rect.right() <= area.right());
        assert!(rect.y >= area.y && rect.bottom() <= area.bottom());
    }

    #[test]
    fn test_screen_titles_are_distinct() {
        let titles = [
            screen_title(Screen::MainMenu),
            screen_title(Screen::CollectionMenu),
            screen_title(Screen::ViewCollection),
            screen_title(Screen::AddBook),
            screen_title(Screen::Instructions),
            screen_title(Screen::Credits),
        ];
        let unique: std::collections::HashSet<_> = titles.iter().collect();
        assert_eq!(unique.len(), titles.len());
    }
}
