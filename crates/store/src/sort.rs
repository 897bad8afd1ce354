//! Sort routines for display order
//!
//! Five stable ascending orders over a collection's book list. Author, year,
//! and pages break ties by title so books group predictably; the date-added
//! order needs no tie-break because identifiers are unique.

use crate::collection::Collection;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Sorts titles in lexicographic order
pub fn sort_by_title(collection: &mut Collection) {
    collection.books_mut().sort_by(|a, b| a.title.cmp(&b.title));
}

/// Sorts by author, then title within an author
pub fn sort_by_author(collection: &mut Collection) {
    collection
        .books_mut()
        .sort_by(|a, b| a.author.cmp(&b.author).then_with(|| a.title.cmp(&b.title)));
}

/// Sorts from oldest to newest publishing year, then title within a year
pub fn sort_by_year(collection: &mut Collection) {
    collection.books_mut().sort_by(|a, b| {
        a.year_published
            .cmp(&b.year_published)
            .then_with(|| a.title.cmp(&b.title))
    });
}

/// Sorts from smallest to largest page count, then title within a count
pub fn sort_by_pages(collection: &mut Collection) {
    collection.books_mut().sort_by(|a, b| {
        a.page_count
            .cmp(&b.page_count)
            .then_with(|| a.title.cmp(&b.title))
    });
}

/// Sorts from oldest to newest by when the book was added
pub fn sort_by_date_added(collection: &mut Collection) {
    collection
        .books_mut()
        .sort_by(|a, b| a.date_added.cmp(&b.date_added));
}

/// The five selectable display orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Title,
    Author,
    Year,
    Pages,
    DateAdded,
}

impl SortOrder {
    /// All orders, in selector display order
    pub const ALL: [SortOrder; 5] = [
        SortOrder::Title,
        SortOrder::Author,
        SortOrder::Year,
        SortOrder::Pages,
        SortOrder::DateAdded,
    ];

    /// Applies this order to the collection
    pub fn apply(&self, collection: &mut Collection) {
        match self {
            SortOrder::Title => sort_by_title(collection),
            SortOrder::Author => sort_by_author(collection),
            SortOrder::Year => sort_by_year(collection),
            SortOrder::Pages => sort_by_pages(collection),
            SortOrder::DateAdded => sort_by_date_added(collection),
        }
    }

    /// Human-readable label for selectors
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Title => "Title",
            SortOrder::Author => "Author",
            SortOrder::Year => "Year Published",
            SortOrder::Pages => "Page Length",
            SortOrder::DateAdded => "Date Added",
        }
    }

    /// The order after this one, cycling
    pub fn next(&self) -> SortOrder {
        match self {
            SortOrder::Title => SortOrder::Author,
            SortOrder::Author => SortOrder::Year,
            SortOrder::Year => SortOrder::Pages,
            SortOrder::Pages => SortOrder::DateAdded,
            SortOrder::DateAdded => SortOrder::Title,
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Title
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort order: {0}")]
pub struct ParseSortOrderError(String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(SortOrder::Title),
            "author" => Ok(SortOrder::Author),
            "year" => Ok(SortOrder::Year),
            "pages" => Ok(SortOrder::Pages),
            "added" | "date" => Ok(SortOrder::DateAdded),
            other => Err(ParseSortOrderError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_core::Book;
    use tempfile::TempDir;

    fn collection_with(fixtures: &[(&str, &str, i32, u32)]) -> (Collection, TempDir) {
        let dir = TempDir::new().unwrap();
        let mut collection = Collection::load(dir.path()).unwrap();
        for (title, author, year, pages) in fixtures {
            collection
                .add_book(title, author, &year.to_string(), &pages.to_string())
                .unwrap();
        }
        (collection, dir)
    }

    fn titles(collection: &Collection) -> Vec<&str> {
        collection.books().iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn test_sort_by_title() {
        let (mut collection, _dir) =
            collection_with(&[("Beta", "X", 2001, 10), ("Alpha", "Y", 1999, 20), ("Gamma", "Z", 1990, 30)]);

        sort_by_title(&mut collection);
        assert_eq!(titles(&collection), ["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn test_sort_by_year() {
        let (mut collection, _dir) =
            collection_with(&[("Beta", "X", 2001, 10), ("Alpha", "Y", 1999, 20), ("Gamma", "Z", 1990, 30)]);

        sort_by_year(&mut collection);
        assert_eq!(titles(&collection), ["Gamma", "Alpha", "Beta"]);
    }

    #[test]
    fn test_sort_by_year_breaks_ties_by_title() {
        let (mut collection, _dir) =
            collection_with(&[("Zebra", "X", 2000, 10), ("Aardvark", "Y", 2000, 20)]);

        sort_by_year(&mut collection);
        assert_eq!(titles(&collection), ["Aardvark", "Zebra"]);
    }

    #[test]
    fn test_sort_by_author_breaks_ties_by_title() {
        let (mut collection, _dir) = collection_with(&[
            ("Zed", "Smith", 2001, 10),
            ("Able", "Smith", 1999, 20),
            ("Middle", "Jones", 2010, 30),
        ]);

        sort_by_author(&mut collection);
        assert_eq!(titles(&collection), ["Middle", "Able", "Zed"]);
    }

    #[test]
    fn test_sort_by_pages() {
        let (mut collection, _dir) = collection_with(&[
            ("Long", "X", 2001, 900),
            ("Short", "Y", 1999, 90),
            ("Medium", "Z", 1990, 400),
        ]);

        sort_by_pages(&mut collection);
        assert_eq!(titles(&collection), ["Short", "Medium", "Long"]);
    }

    #[test]
    fn test_sort_by_date_added() {
        let (mut collection, _dir) = collection_with(&[
            ("Third", "X", 2001, 10),
            ("First", "Y", 1999, 20),
            ("Second", "Z", 1990, 30),
        ]);

        // add order is Third, First, Second; ids increase per add
        sort_by_title(&mut collection);
        sort_by_date_added(&mut collection);
        assert_eq!(titles(&collection), ["Third", "First", "Second"]);
    }

    #[test]
    fn test_sorts_are_permutations_and_idempotent() {
        let (mut collection, _dir) = collection_with(&[
            ("Taco", "Aba", 2019, 500),
            ("Food", "Aba", 2019, 378),
            ("Pizza", "Aba", 2017, 500),
            ("AllyBaba", "William Shakespeare", 1700, 996),
            ("Superman", "Albert Roe", 1967, 679),
        ]);

        let mut expected: Vec<Book> = collection.books().to_vec();
        expected.sort_by(|a, b| a.date_added.cmp(&b.date_added));

        for order in SortOrder::ALL {
            order.apply(&mut collection);
            let once: Vec<Book> = collection.books().to_vec();

            order.apply(&mut collection);
            assert_eq!(collection.books(), once.as_slice(), "{} not idempotent", order);

            // Same multiset of records
            let mut sorted_back: Vec<Book> = once;
            sorted_back.sort_by(|a, b| a.date_added.cmp(&b.date_added));
            assert_eq!(sorted_back, expected, "{} lost or altered records", order);
        }
    }

    #[test]
    fn test_sort_does_not_touch_disk() {
        let (mut collection, dir) = collection_with(&[("Beta", "X", 2001, 10), ("Alpha", "Y", 1999, 20)]);

        sort_by_title(&mut collection);

        let reloaded = Collection::load(dir.path()).unwrap();
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn test_sort_order_cycle_visits_all() {
        let mut seen = vec![SortOrder::default()];
        let mut current = SortOrder::default();
        for _ in 0..4 {
            current = current.next();
            seen.push(current);
        }
        assert_eq!(seen, SortOrder::ALL.to_vec());
        assert_eq!(current.next(), SortOrder::Title);
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!("title".parse(), Ok(SortOrder::Title));
        assert_eq!("Author".parse(), Ok(SortOrder::Author));
        assert_eq!("YEAR".parse(), Ok(SortOrder::Year));
        assert_eq!("pages".parse(), Ok(SortOrder::Pages));
        assert_eq!("added".parse(), Ok(SortOrder::DateAdded));
        assert!("alphabetical".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_sort_empty_collection() {
        let dir = TempDir::new().unwrap();
        let mut collection = Collection::load(dir.path()).unwrap();
        for order in SortOrder::ALL {
            order.apply(&mut collection);
        }
        assert!(collection.is_empty());
    }

    #[test]
    fn test_fixture_from_legacy_records() {
        // Year and title orders disagree once Gamma(1990) joins
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("1690000000.000001.book"),
            "Beta\nSomeone\n2001\n100\n1690000000.000001",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("1690000000.000002.book"),
            "Alpha\nSomeone\n1999\n100\n1690000000.000002",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("1690000000.000003.book"),
            "Gamma\nSomeone\n1990\n100\n1690000000.000003",
        )
        .unwrap();

        let mut collection = Collection::load(dir.path()).unwrap();

        sort_by_year(&mut collection);
        assert_eq!(titles(&collection), ["Gamma", "Alpha", "Beta"]);

        sort_by_title(&mut collection);
        assert_eq!(titles(&collection), ["Alpha", "Beta", "Gamma"]);
    }
}
