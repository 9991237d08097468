//! wikiconflict-core - Core library for wikiconflict
//!
//! Quantifies editorial conflict and token survival on a single Wikipedia
//! article from the per-token action log exported by WikiWho. The CLI and any
//! other front end build on the conflict scorer and survival classifier here.

pub mod config;
pub mod conflict;
pub mod error;
pub mod export;
pub mod history;
pub mod models;
pub mod ownership;
pub mod source;
pub mod stopwords;
pub mod survival;
pub mod timeline;

pub use config::{AnalysisConfig, FirstInsertion};
pub use conflict::{ConflictManager, EditorConflict, OpponentRecord, ScoredAction};
pub use error::{Error, Result};
pub use export::{AnalysisReport, ExportFormat};
pub use history::ActionHistory;
pub use models::{Action, ActionKind, ActionRecord, ContentRow, Revision, RevisionTable};
pub use stopwords::{StopwordCatalog, StopwordSet, UnsupportedLanguage};
pub use survival::{SurvivalRecord, SurvivalTables, TokenSummary, TokensManager};
pub use timeline::Granularity;

#[cfg(test)]
mod fixtures;
