use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Path does not exist or is not a directory: {}", .0.display())]
    BadPath(PathBuf),

    #[error("The collection has no books")]
    EmptyCollection,

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
