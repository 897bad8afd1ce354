//! Book domain model and its timestamp identifier

use crate::types::Validator;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// File extension that marks a record file on disk
pub const RECORD_EXTENSION: &str = "book";

const MICROS_PER_SECOND: u64 = 1_000_000;

// Last identifier handed out by `BookId::now()`. Successive calls must never
// produce the same value even when the clock has not advanced a microsecond.
static LAST_ISSUED: AtomicU64 = AtomicU64::new(0);

/// Errors from parsing the text form of a [`BookId`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBookIdError {
    #[error("book id is empty")]
    Empty,
    #[error("book id contains a non-digit character")]
    InvalidDigit,
    #[error("book id is out of range")]
    OutOfRange,
}

/// Unique identifier for a book: the moment it was added to its collection,
/// in microseconds since the Unix epoch.
///
/// The canonical text form is `<seconds>.<micros>` with exactly six
/// fractional digits (e.g. `1690000000.123456`), and doubles as the stem of
/// the record's filename on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookId(u64);

impl BookId {
    /// Creates an identifier for the current moment.
    ///
    /// Monotonic within the process: if the clock reading would collide with
    /// (or run behind) the last issued identifier, the value is bumped by one
    /// microsecond instead.
    pub fn now() -> Self {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_micros() as u64;

        let mut last = LAST_ISSUED.load(Ordering::Relaxed);
        loop {
            let next = wall.max(last + 1);
            match LAST_ISSUED.compare_exchange_weak(last, next, Ordering::SeqCst, Ordering::Relaxed)
            {
                Ok(_) => return Self(next),
                Err(observed) => last = observed,
            }
        }
    }

    /// Creates a BookId from its text form.
    ///
    /// Accepts any number of fractional digits; digits past microsecond
    /// precision are truncated. Record files written by earlier tools carry
    /// longer fractions.
    pub fn from_string(s: &str) -> Result<Self, ParseBookIdError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseBookIdError::Empty);
        }

        let (secs_part, frac_part) = match s.split_once('.') {
            Some((secs, frac)) => (secs, frac),
            None => (s, ""),
        };

        if secs_part.is_empty() || !secs_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseBookIdError::InvalidDigit);
        }
        if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseBookIdError::InvalidDigit);
        }

        let secs: u64 = secs_part
            .parse()
            .map_err(|_| ParseBookIdError::OutOfRange)?;

        let mut micros: u64 = 0;
        let mut scale = MICROS_PER_SECOND / 10;
        for digit in frac_part.bytes().take(6) {
            micros += u64::from(digit - b'0') * scale;
            scale /= 10;
        }

        secs.checked_mul(MICROS_PER_SECOND)
            .and_then(|v| v.checked_add(micros))
            .map(Self)
            .ok_or(ParseBookIdError::OutOfRange)
    }

    /// Creates a BookId from raw microseconds since the Unix epoch
    pub fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Returns the identifier as microseconds since the Unix epoch
    pub fn as_micros(&self) -> u64 {
        self.0
    }

    /// Returns the whole-second part of the identifier
    pub fn seconds(&self) -> u64 {
        self.0 / MICROS_PER_SECOND
    }

    /// Returns the canonical text form
    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:06}",
            self.0 / MICROS_PER_SECOND,
            self.0 % MICROS_PER_SECOND
        )
    }
}

impl std::str::FromStr for BookId {
    type Err = ParseBookIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl Serialize for BookId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_string(&s).map_err(serde::de::Error::custom)
    }
}

/// Represents one book in a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub date_added: BookId,
    pub title: String,
    pub author: String,
    pub year_published: i32,
    pub page_count: u32,
}

impl Book {
    /// Creates a book with all fields supplied
    pub fn new(
        date_added: BookId,
        title: String,
        author: String,
        year_published: i32,
        page_count: u32,
    ) -> Self {
        Self {
            date_added,
            title,
            author,
            year_published,
            page_count,
        }
    }

    /// Returns the filename of this book's backing record file
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.date_added, RECORD_EXTENSION)
    }
}

impl Validator for Book {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("Title cannot be empty".to_string());
        }

        if self.author.trim().is_empty() {
            errors.push("Author cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> Book {
        Book::new(
            BookId::from_micros(1_690_000_000_123_456),
            "The Left Hand of Darkness".to_string(),
            "Ursula K. Le Guin".to_string(),
            1969,
            304,
        )
    }

    #[test]
    fn test_book_id_now_unique() {
        let id1 = BookId::now();
        let id2 = BookId::now();
        assert_ne!(id1, id2);
        assert!(id2 > id1);
    }

    #[test]
    fn test_book_id_now_burst_is_strictly_increasing() {
        let mut prev = BookId::now();
        for _ in 0..1000 {
            let next = BookId::now();
            assert!(next > prev);
            prev = next;
        }
    }

    #[test]
    fn test_book_id_round_trip() {
        let id = BookId::from_micros(1_690_000_000_123_456);
        assert_eq!(id.to_string(), "1690000000.123456");
        assert_eq!(BookId::from_string(&id.to_string()), Ok(id));
    }

    #[test]
    fn test_book_id_pads_short_fractions() {
        let id = BookId::from_string("1690000000.5").unwrap();
        assert_eq!(id.as_micros(), 1_690_000_000_500_000);
        assert_eq!(id.to_string(), "1690000000.500000");
    }

    #[test]
    fn test_book_id_truncates_long_fractions() {
        // Python float reprs carry seven or more digits
        let id = BookId::from_string("1587573822.9760792").unwrap();
        assert_eq!(id.as_micros(), 1_587_573_822_976_079);
    }

    #[test]
    fn test_book_id_without_fraction() {
        let id = BookId::from_string("1690000000").unwrap();
        assert_eq!(id.as_micros(), 1_690_000_000_000_000);
    }

    #[test]
    fn test_book_id_rejects_garbage() {
        assert_eq!(BookId::from_string(""), Err(ParseBookIdError::Empty));
        assert_eq!(
            BookId::from_string("   "),
            Err(ParseBookIdError::Empty)
        );
        assert_eq!(
            BookId::from_string("not-a-number"),
            Err(ParseBookIdError::InvalidDigit)
        );
        assert_eq!(
            BookId::from_string("16900.12a"),
            Err(ParseBookIdError::InvalidDigit)
        );
        assert_eq!(
            BookId::from_string(".123"),
            Err(ParseBookIdError::InvalidDigit)
        );
        assert_eq!(
            BookId::from_string("-5.0"),
            Err(ParseBookIdError::InvalidDigit)
        );
    }

    #[test]
    fn test_book_id_rejects_overflow() {
        assert_eq!(
            BookId::from_string("99999999999999999999.0"),
            Err(ParseBookIdError::OutOfRange)
        );
    }

    #[test]
    fn test_book_id_seconds() {
        let id = BookId::from_micros(1_690_000_000_123_456);
        assert_eq!(id.seconds(), 1_690_000_000);
    }

    #[test]
    fn test_book_id_ordering_matches_time() {
        let earlier = BookId::from_micros(1_000_000);
        let later = BookId::from_micros(2_000_000);
        assert!(earlier < later);
    }

    #[test]
    fn test_book_file_name() {
        let book = sample_book();
        assert_eq!(book.file_name(), "1690000000.123456.book");
    }

    #[test]
    fn test_book_validation_success() {
        assert!(sample_book().is_valid());
    }

    #[test]
    fn test_book_validation_empty_title() {
        let mut book = sample_book();
        book.title = "   ".to_string();
        assert!(!book.is_valid());
    }

    #[test]
    fn test_book_validation_empty_author() {
        let mut book = sample_book();
        book.author = String::new();
        assert!(!book.is_valid());
    }

    #[test]
    fn test_book_id_serde_as_string() {
        let book = sample_book();
        let json = serde_json::to_string(&book).unwrap();
        assert!(json.contains("\"1690000000.123456\""));

        let back: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(back, book);
    }
}
