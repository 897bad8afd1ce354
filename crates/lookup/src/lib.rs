//! Metadata lookup against a remote book catalog
//!
//! Given an ISBN, produces a best-effort partial record for pre-filling an
//! add form. Every failure kind here is non-fatal to callers: the user can
//! always fall back to manual entry.

mod open_library;
mod traits;

pub use open_library::OpenLibrarySource;
pub use traits::{BookDraft, MetadataSource, SourceMetadata};

use thiserror::Error;

/// Result type for lookup operations
pub type LookupResult<T> = Result<T, LookupError>;

/// Errors from catalog lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The request could not be completed (connectivity, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The catalog has no entry for the identifier
    #[error("Book not found in the catalog")]
    NotFound,

    /// The catalog answered with something undecodable
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The identifier was rejected before any request was made
    #[error("Invalid ISBN: {0}")]
    InvalidQuery(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert!(LookupError::NotFound.to_string().contains("not found"));
        assert!(LookupError::Network("timed out".to_string())
            .to_string()
            .contains("timed out"));
    }
}
