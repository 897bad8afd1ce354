use crate::LookupResult;

/// A catalog that can resolve an ISBN to book metadata
pub trait MetadataSource {
    /// Looks up an ISBN, returning whatever fields the catalog has
    fn lookup(&self, isbn: &str) -> LookupResult<BookDraft>;

    /// Metadata about the source itself
    fn metadata(&self) -> SourceMetadata;

    /// Check if the source can currently be queried
    fn is_available(&self) -> bool;
}

/// A partial book record from a catalog lookup.
///
/// Fields are the text a user would otherwise type; any of them may be empty
/// when the catalog lacks the data or a secondary request failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub year: String,
    pub pages: String,
}

impl BookDraft {
    /// True if the lookup produced nothing usable
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.author.is_empty()
            && self.year.is_empty()
            && self.pages.is_empty()
    }
}

/// Source metadata
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    pub name: String,
    pub description: String,
    pub base_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_default_is_empty() {
        assert!(BookDraft::default().is_empty());
    }

    #[test]
    fn test_draft_with_any_field_is_not_empty() {
        let draft = BookDraft {
            pages: "412".to_string(),
            ..Default::default()
        };
        assert!(!draft.is_empty());
    }
}
