//! Data models for wikiconflict

mod action;
mod revision;

pub use action::{wide_to_long, Action, ActionKind, ActionRecord, ContentRow, SENTINEL_REV_ID};
pub use revision::{Revision, RevisionTable};

use serde::{Deserialize, Deserializer};

/// Editor identifiers arrive either as strings or as bare user ids.
pub(crate) fn deserialize_editor<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawEditor {
        Text(String),
        Id(i64),
    }

    Ok(match RawEditor::deserialize(deserializer)? {
        RawEditor::Text(text) => text,
        RawEditor::Id(id) => id.to_string(),
    })
}
