//! Directory-backed book collection
//!
//! A [`Collection`] pairs the in-memory book list with the directory that
//! backs it. The two mutating operations keep list and directory in step but
//! are not atomic across them; an interruption between the file operation and
//! the list update is resolved by the next [`Collection::reload`].

use crate::codec;
use crate::error::{StoreError, StoreResult};
use bookshelf_core::{Book, BookId, RECORD_EXTENSION};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// The set of book records backed by one directory
#[derive(Debug)]
pub struct Collection {
    path: PathBuf,
    books: Vec<Book>,
    skipped: usize,
}

impl Collection {
    /// Loads a collection from a directory.
    ///
    /// Scans immediate entries for record files; subdirectories are not
    /// descended into. Malformed record files are skipped with a warning
    /// rather than failing the whole load — see [`Collection::skipped`].
    pub fn load(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(StoreError::BadPath(dir.to_path_buf()));
        }

        let mut books = Vec::new();
        let mut skipped = 0;

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }

            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) => {
                    warn!("Skipping unreadable record {}: {}", path.display(), e);
                    skipped += 1;
                    continue;
                }
            };

            match codec::decode(&contents) {
                Ok(book) => books.push(book),
                Err(e) => {
                    warn!("Skipping malformed record {}: {}", path.display(), e);
                    skipped += 1;
                }
            }
        }

        info!(
            "Loaded {} books from {} ({} skipped)",
            books.len(),
            dir.display(),
            skipped
        );

        Ok(Self {
            path: dir.to_path_buf(),
            books,
            skipped,
        })
    }

    /// The backing directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The books, ordered per the last applied sort
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub(crate) fn books_mut(&mut self) -> &mut Vec<Book> {
        &mut self.books
    }

    /// Number of record files skipped as malformed during the last load
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    /// Finds a book by its date-added identifier
    pub fn find(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.date_added == id)
    }

    /// Validates and adds a book, persisting its record file.
    ///
    /// Year and page count arrive as text from the input surface and are
    /// coerced here. Returns the identifier assigned to the new book.
    pub fn add_book(
        &mut self,
        title: &str,
        author: &str,
        year: &str,
        pages: &str,
    ) -> StoreResult<BookId> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::InvalidInput {
                field: "title",
                reason: "must not be empty".to_string(),
            });
        }

        let author = author.trim();
        if author.is_empty() {
            return Err(StoreError::InvalidInput {
                field: "author",
                reason: "must not be empty".to_string(),
            });
        }

        let year: i32 = year
            .trim()
            .parse()
            .map_err(|_| StoreError::InvalidInput {
                field: "year",
                reason: format!("'{}' is not a whole number", year.trim()),
            })?;

        let pages: u32 = pages
            .trim()
            .parse()
            .map_err(|_| StoreError::InvalidInput {
                field: "page count",
                reason: format!("'{}' is not a whole number", pages.trim()),
            })?;

        let book = Book::new(
            BookId::now(),
            title.to_string(),
            author.to_string(),
            year,
            pages,
        );
        let id = book.date_added;

        fs::write(self.path.join(book.file_name()), codec::encode(&book))?;
        info!("Added '{}' to {}", book.title, self.path.display());
        self.books.push(book);

        Ok(id)
    }

    /// Deletes the book with the given identifier and its record file.
    ///
    /// Returns the removed book. Fails with [`StoreError::BookNotFound`] when
    /// the backing file or the in-memory record is missing — typically
    /// because the directory was modified outside the application.
    pub fn delete_book(&mut self, id: BookId) -> StoreResult<Book> {
        if self.books.is_empty() {
            return Err(StoreError::EmptyCollection);
        }

        let file = self
            .path
            .join(format!("{}.{}", id, RECORD_EXTENSION));
        if !file.is_file() {
            return Err(StoreError::BookNotFound(id.to_string()));
        }

        let index = self
            .books
            .iter()
            .position(|b| b.date_added == id)
            .ok_or_else(|| StoreError::BookNotFound(id.to_string()))?;

        fs::remove_file(&file)?;
        let book = self.books.remove(index);
        info!("Deleted '{}' from {}", book.title, self.path.display());

        Ok(book)
    }

    /// Re-reads the backing directory, replacing the in-memory list.
    ///
    /// The recovery path after the directory changed outside the
    /// application.
    pub fn reload(&mut self) -> StoreResult<()> {
        let fresh = Self::load(&self.path)?;
        self.books = fresh.books;
        self.skipped = fresh.skipped;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn open_temp_collection() -> (Collection, TempDir) {
        let dir = TempDir::new().unwrap();
        let collection = Collection::load(dir.path()).unwrap();
        (collection, dir)
    }

    #[test]
    fn test_load_missing_path() {
        let result = Collection::load("/no/such/directory");
        assert!(matches!(result, Err(StoreError::BadPath(_))));
    }

    #[test]
    fn test_load_plain_file_is_bad_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not-a-dir");
        fs::write(&file, "contents").unwrap();

        let result = Collection::load(&file);
        assert!(matches!(result, Err(StoreError::BadPath(_))));
    }

    #[test]
    fn test_load_empty_directory() {
        let (collection, _dir) = open_temp_collection();
        assert!(collection.is_empty());
        assert_eq!(collection.skipped(), 0);
    }

    #[test]
    fn test_add_book_round_trip() {
        let (mut collection, dir) = open_temp_collection();

        let id = collection
            .add_book("Dune", "Frank Herbert", "1965", "412")
            .unwrap();

        assert_eq!(collection.len(), 1);
        let book = collection.find(id).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.year_published, 1965);
        assert_eq!(book.page_count, 412);

        // The backing file reads back into an equal record
        let reloaded = Collection::load(dir.path()).unwrap();
        assert_eq!(reloaded.books(), collection.books());
    }

    #[test]
    fn test_add_book_trims_fields() {
        let (mut collection, _dir) = open_temp_collection();

        let id = collection
            .add_book("  Dune  ", " Frank Herbert ", " 1965 ", " 412 ")
            .unwrap();

        let book = collection.find(id).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
    }

    #[test]
    fn test_add_book_empty_title() {
        let (mut collection, dir) = open_temp_collection();

        let result = collection.add_book("   ", "Frank Herbert", "1965", "412");
        assert!(matches!(
            result,
            Err(StoreError::InvalidInput { field: "title", .. })
        ));

        // Nothing changed in memory or on disk
        assert!(collection.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_add_book_bad_year() {
        let (mut collection, _dir) = open_temp_collection();

        let result = collection.add_book("Dune", "Frank Herbert", "MCMLXV", "412");
        assert!(matches!(
            result,
            Err(StoreError::InvalidInput { field: "year", .. })
        ));
        assert!(collection.is_empty());
    }

    #[test]
    fn test_add_book_bad_page_count() {
        let (mut collection, _dir) = open_temp_collection();

        let result = collection.add_book("Dune", "Frank Herbert", "1965", "-10");
        assert!(matches!(
            result,
            Err(StoreError::InvalidInput {
                field: "page count",
                ..
            })
        ));
    }

    #[test]
    fn test_delete_book() {
        let (mut collection, dir) = open_temp_collection();

        let id = collection
            .add_book("Dune", "Frank Herbert", "1965", "412")
            .unwrap();
        let keep = collection
            .add_book("Emma", "Jane Austen", "1815", "474")
            .unwrap();

        let removed = collection.delete_book(id).unwrap();
        assert_eq!(removed.title, "Dune");
        assert_eq!(collection.len(), 1);
        assert!(collection.find(id).is_none());
        assert!(collection.find(keep).is_some());

        // The backing file is gone
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_delete_from_empty_collection() {
        let (mut collection, _dir) = open_temp_collection();

        let result = collection.delete_book(BookId::from_micros(1));
        assert!(matches!(result, Err(StoreError::EmptyCollection)));
    }

    #[test]
    fn test_delete_unknown_id() {
        let (mut collection, _dir) = open_temp_collection();
        collection
            .add_book("Dune", "Frank Herbert", "1965", "412")
            .unwrap();

        let result = collection.delete_book(BookId::from_micros(1));
        assert!(matches!(result, Err(StoreError::BookNotFound(_))));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_delete_when_file_removed_externally() {
        let (mut collection, dir) = open_temp_collection();
        let id = collection
            .add_book("Dune", "Frank Herbert", "1965", "412")
            .unwrap();

        // Simulate another process removing the record file
        fs::remove_file(dir.path().join(format!("{}.book", id))).unwrap();

        let result = collection.delete_book(id);
        assert!(matches!(result, Err(StoreError::BookNotFound(_))));

        // Reload resynchronizes with the directory
        collection.reload().unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_load_skips_malformed_records() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("1690000000.000001.book"),
            "Dune\nFrank Herbert\n1965\n412\n1690000000.000001",
        )
        .unwrap();
        fs::write(dir.path().join("1690000000.000002.book"), "only one line").unwrap();
        fs::write(
            dir.path().join("1690000000.000003.book"),
            "Emma\nJane Austen\nnot-a-year\n474\n1690000000.000003",
        )
        .unwrap();

        let collection = Collection::load(dir.path()).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.skipped(), 2);
        assert_eq!(collection.books()[0].title, "Dune");
    }

    #[test]
    fn test_load_ignores_foreign_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "not a record").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(
            dir.path().join("nested").join("1690000000.000001.book"),
            "Dune\nFrank Herbert\n1965\n412\n1690000000.000001",
        )
        .unwrap();

        // Non-record files and nested directories are ignored
        let collection = Collection::load(dir.path()).unwrap();
        assert!(collection.is_empty());
        assert_eq!(collection.skipped(), 0);
    }
}
