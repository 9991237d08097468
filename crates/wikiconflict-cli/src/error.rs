use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] wikiconflict_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid stopword list '{0}', expected LANG=PATH")]
    InvalidStopwordList(String),
    #[error("Editor id cannot be empty")]
    EmptyEditor,
    #[error("{0} must be at least 1")]
    ZeroLimit(&'static str),
}
