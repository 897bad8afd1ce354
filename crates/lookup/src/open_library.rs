use crate::{BookDraft, LookupError, LookupResult, MetadataSource, SourceMetadata};
use log::debug;
use serde::Deserialize;
use std::time::Duration;

/// Open Library catalog source.
///
/// Resolves an ISBN via the edition endpoint; if the edition references an
/// author record, one secondary request resolves the author's name. The
/// secondary request is best-effort: its failure leaves the author field
/// empty rather than failing the lookup.
pub struct OpenLibrarySource {
    base_url: String,
    client: Option<reqwest::blocking::Client>,
}

impl OpenLibrarySource {
    const API_BASE: &'static str = "https://openlibrary.org";
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a source against the public Open Library API
    pub fn new() -> Self {
        Self::with_options(Self::API_BASE, Self::DEFAULT_TIMEOUT)
    }

    /// Create a source with a custom base URL and request timeout
    pub fn with_options(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION"),
            ))
            .build()
            .ok();

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn client(&self) -> LookupResult<&reqwest::blocking::Client> {
        self.client
            .as_ref()
            .ok_or_else(|| LookupError::Network("HTTP client not available".to_string()))
    }

    fn fetch_edition(&self, isbn: &str) -> LookupResult<Edition> {
        let url = format!("{}/isbn/{}.json", self.base_url, isbn);

        let response = self
            .client()?
            .get(&url)
            .send()
            .map_err(|e| LookupError::Network(format!("Request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound);
        }
        if !response.status().is_success() {
            return Err(LookupError::Network(format!(
                "HTTP {}",
                response.status().as_u16()
            )));
        }

        response
            .json()
            .map_err(|e| LookupError::Malformed(format!("JSON decode error: {}", e)))
    }

    /// Resolves an author reference to a name. Best-effort: any failure is
    /// reported as `None`.
    fn fetch_author_name(&self, key: &str) -> Option<String> {
        let client = self.client().ok()?;
        let url = format!("{}{}.json", self.base_url, key);

        let result = client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json::<AuthorRecord>());

        match result {
            Ok(author) => Some(author.name),
            Err(e) => {
                debug!("Author resolve for {} failed: {}", key, e);
                None
            }
        }
    }

    /// Check if the catalog is reachable
    pub fn check_availability(&self) -> bool {
        let client = match &self.client {
            Some(c) => c,
            None => return false,
        };

        client
            .get(format!("{}/isbn/9780441013593.json", self.base_url))
            .timeout(Duration::from_secs(5))
            .send()
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }
}

impl Default for OpenLibrarySource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataSource for OpenLibrarySource {
    fn lookup(&self, isbn: &str) -> LookupResult<BookDraft> {
        let isbn = normalize_isbn(isbn)?;

        let edition = self.fetch_edition(&isbn)?;

        let author = edition
            .authors
            .first()
            .and_then(|reference| self.fetch_author_name(&reference.key));

        Ok(draft_from(edition, author))
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Open Library".to_string(),
            description: "Open, editable library catalog by the Internet Archive".to_string(),
            base_url: self.base_url.clone(),
        }
    }

    fn is_available(&self) -> bool {
        self.client.is_some()
    }
}

/// Strips separators and validates the identifier shape.
///
/// Accepts 10- or 13-character forms; the final character of a 10-digit ISBN
/// may be `X`. No checksum verification — the catalog is the authority.
fn normalize_isbn(raw: &str) -> LookupResult<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if cleaned.is_empty() {
        return Err(LookupError::InvalidQuery("empty identifier".to_string()));
    }

    let valid_shape = cleaned
        .chars()
        .enumerate()
        .all(|(i, c)| c.is_ascii_digit() || (c.eq_ignore_ascii_case(&'X') && i == cleaned.len() - 1));

    if !valid_shape || !(cleaned.len() == 10 || cleaned.len() == 13) {
        return Err(LookupError::InvalidQuery(format!(
            "'{}' is not a 10- or 13-digit ISBN",
            raw.trim()
        )));
    }

    Ok(cleaned)
}

/// Edition record as Open Library returns it, reduced to the fields used
#[derive(Debug, Clone, Deserialize)]
struct Edition {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    authors: Vec<AuthorReference>,
    #[serde(default)]
    publish_date: Option<String>,
    #[serde(default)]
    number_of_pages: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
struct AuthorReference {
    key: String,
}

#[derive(Debug, Clone, Deserialize)]
struct AuthorRecord {
    name: String,
}

fn draft_from(edition: Edition, author: Option<String>) -> BookDraft {
    BookDraft {
        title: edition.title.unwrap_or_default(),
        author: author.unwrap_or_default(),
        year: edition
            .publish_date
            .as_deref()
            .and_then(year_from_publish_date)
            .unwrap_or_default(),
        pages: edition
            .number_of_pages
            .map(|n| n.to_string())
            .unwrap_or_default(),
    }
}

/// Extracts the publishing year from the catalog's date field.
///
/// The upstream format varies ("1965", "May 1, 1965", "05/01/1965") but the
/// last four characters are consistently the year.
fn year_from_publish_date(date: &str) -> Option<String> {
    let trimmed = date.trim();
    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() < 4 {
        return None;
    }

    let year: String = chars[chars.len() - 4..].iter().collect();
    if year.chars().all(|c| c.is_ascii_digit()) {
        Some(year)
    } else {
        None
    }
}
