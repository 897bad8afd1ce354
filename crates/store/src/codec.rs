//! On-disk record format
//!
//! A record file holds the five fields of one book, one per line, in fixed
//! order: title, author, year published, page count, date added. Plain UTF-8
//! text, no escaping; the format predates this implementation and is shared
//! with files written by earlier tools.

use bookshelf_core::{Book, BookId, ParseBookIdError};
use thiserror::Error;

/// Number of fields in a record file
const FIELD_COUNT: usize = 5;

/// Errors from decoding a record file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordParseError {
    #[error("expected {FIELD_COUNT} lines, found {0}")]
    MissingFields(usize),

    #[error("year is not a whole number: '{0}'")]
    InvalidYear(String),

    #[error("page count is not a whole number: '{0}'")]
    InvalidPageCount(String),

    #[error("invalid date-added value: {0}")]
    InvalidId(#[from] ParseBookIdError),
}

/// Encodes a book into record-file contents
pub fn encode(book: &Book) -> String {
    format!(
        "{}\n{}\n{}\n{}\n{}",
        book.title, book.author, book.year_published, book.page_count, book.date_added
    )
}

/// Decodes record-file contents into a book.
///
/// Lines past the fifth are ignored; fewer than five lines is an error.
pub fn decode(contents: &str) -> Result<Book, RecordParseError> {
    let lines: Vec<&str> = contents.lines().map(str::trim_end).collect();
    if lines.len() < FIELD_COUNT {
        return Err(RecordParseError::MissingFields(lines.len()));
    }

    let year: i32 = lines[2]
        .trim()
        .parse()
        .map_err(|_| RecordParseError::InvalidYear(lines[2].to_string()))?;
    let pages: u32 = lines[3]
        .trim()
        .parse()
        .map_err(|_| RecordParseError::InvalidPageCount(lines[3].to_string()))?;
    let id = BookId::from_string(lines[4])?;

    Ok(Book::new(
        id,
        lines[0].to_string(),
        lines[1].to_string(),
        year,
        pages,
    ))
}
