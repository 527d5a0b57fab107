//! Error types for the recommendation engine.

use thiserror::Error;

/// Crate-wide error type.
///
/// Only `TitleNotFound` is raised by the pure ranking core; malformed text or
/// metadata never fails and degrades to empty output instead. The remaining
/// variants belong to the dataset loader and the poster client.
#[derive(Error, Debug)]
pub enum Error {
    /// Query title absent from the loaded corpus
    #[error("title not found in corpus: {0}")]
    TitleNotFound(String),

    /// Dataset CSV error
    #[error("dataset error: {0}")]
    Dataset(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Poster lookup HTTP error
    #[error("poster lookup failed: {0}")]
    Poster(#[from] reqwest::Error),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;
