//! Error types for wikiconflict-core

use thiserror::Error;

/// Result type alias using wikiconflict-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in wikiconflict-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An action references a revision that is not in the revision table
    #[error("Revision {0} referenced by an action is missing from the revision table")]
    MissingRevision(i64),

    /// No stopword list is configured for the requested language
    #[error("Unsupported stopword language: {0}")]
    UnsupportedLanguage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
