//! Add book rendering: the ISBN input plus the four record fields

use crate::state::{AddField, AppState};
use crate::ui::{caption_style, highlight_style, text_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Renders the add book screen
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // ISBN
            Constraint::Length(3), // Title
            Constraint::Length(3), // Author
            Constraint::Length(3), // Year
            Constraint::Length(3), // Pages
            Constraint::Min(0),    // Status
        ])
        .split(area);

    let form = &state.add_form;
    let fields = [
        (AddField::Isbn, &form.isbn),
        (AddField::Title, &form.title),
        (AddField::Author, &form.author),
        (AddField::Year, &form.year),
        (AddField::Pages, &form.pages),
    ];

    for (i, (field, value)) in fields.iter().enumerate() {
        render_input(frame, chunks[i], field.label(), value, form.focus == *field);
    }

    let status = form.status.as_deref().unwrap_or(
        "Enter the book's details, or type an ISBN and press Enter on it to pull them \
         from the catalog.",
    );
    let status_line = Paragraph::new(Line::from(status))
        .wrap(Wrap { trim: true })
        .style(caption_style())
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_line, chunks[5]);
}

fn render_input(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let style = if focused {
        highlight_style()
    } else {
        text_style()
    };

    // A visible caret marks the live input
    let text = if focused {
        format!("{}_", value)
    } else {
        value.to_string()
    };

    let input = Paragraph::new(Line::from(Span::styled(text, style))).block(
        Block::default()
            .borders(Borders::ALL)
            .title(label.to_string()),
    );

    frame.render_widget(input, area);
}
