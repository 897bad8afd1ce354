//! Instructions rendering

use crate::state::AppState;
use crate::ui::text_style;
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const INSTRUCTIONS: &str = "\
Welcome to the Library Collection Manager!

Opening a collection:
  From the main menu, select 'Open collection', type the path of a directory \
that holds (or will hold) your book records, and press Enter. The directory \
must already exist.

Viewing a collection:
  'View collection' shows one book at a time. Use the left and right arrows \
to move between books and 's' to switch between the five sort orders: title, \
author, year published, page length, and date added.

Adding a book:
  'Add a book' asks for a title, author, year published, and page count. If \
you know the book's ISBN you can type it in the ISBN field and press Enter to \
pull the details from the online catalog; anything the catalog does not know \
you can fill in by hand. A lookup failure never blocks manual entry.

Deleting a book:
  While viewing a book, press 'd' and confirm. The book's record file is \
removed from the collection directory.

Every book is stored as one small text file in your collection directory, so \
a collection can be backed up or moved by copying the directory.";

/// Renders the instructions screen
pub fn render(frame: &mut Frame, area: Rect, _state: &AppState) {
    let body = Paragraph::new(INSTRUCTIONS)
        .wrap(Wrap { trim: false })
        .style(text_style())
        .block(Block::default().borders(Borders::ALL).title("How to use"));

    frame.render_widget(body, area);
}
