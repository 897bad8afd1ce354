//! Bookshelf record store
//!
//! Translates between on-disk record files and in-memory [`Collection`]s,
//! and provides the sort routines used for display. One book maps to one
//! plain-text file in the collection directory; nothing here is cached or
//! held open across operations.

pub mod codec;
pub mod collection;
pub mod error;
pub mod sort;

pub use codec::RecordParseError;
pub use collection::Collection;
pub use error::{StoreError, StoreResult};
pub use sort::{
    sort_by_author, sort_by_date_added, sort_by_pages, sort_by_title, sort_by_year,
    ParseSortOrderError, SortOrder,
};
