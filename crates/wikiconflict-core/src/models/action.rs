//! Token action models

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::FirstInsertion;

/// Revision id WikiWho uses for "no revision" in the `in`/`out` columns.
pub const SENTINEL_REV_ID: i64 = -1;

/// Whether a token was put into or taken out of the article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Inserted or reinserted
    In,
    /// Deleted
    Out,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => write!(f, "in"),
            Self::Out => write!(f, "out"),
        }
    }
}

/// One row of the WikiWho "all content" export.
///
/// A row describes one in/out cycle of a token: the revision that (re)inserted
/// it and the revision that deleted it again. The original insertion carries
/// `in == -1`; a token that is still present carries `out == -1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRow {
    pub token_id: i64,
    pub token: String,
    pub o_rev_id: i64,
    #[serde(deserialize_with = "super::deserialize_editor")]
    pub o_editor: String,
    #[serde(rename = "in")]
    pub in_rev: i64,
    #[serde(rename = "out")]
    pub out_rev: i64,
}

/// A single insertion or deletion of a token, before revision metadata is joined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub token_id: i64,
    pub token: String,
    pub action: ActionKind,
    pub rev_id: i64,
    pub o_rev_id: i64,
    #[serde(deserialize_with = "super::deserialize_editor")]
    pub o_editor: String,
}

impl Action {
    fn from_row(row: &ContentRow, action: ActionKind, rev_id: i64) -> Self {
        Self {
            token_id: row.token_id,
            token: row.token.clone(),
            action,
            rev_id,
            o_rev_id: row.o_rev_id,
            o_editor: row.o_editor.clone(),
        }
    }
}

/// An action joined with the time and editor of its revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub token_id: i64,
    pub token: String,
    pub action: ActionKind,
    pub rev_id: i64,
    pub o_rev_id: i64,
    pub o_editor: String,
    pub editor: String,
    pub rev_time: DateTime<Utc>,
}

impl ActionRecord {
    /// True for the row that first brought the token into the article
    pub const fn is_original_insertion(&self) -> bool {
        self.rev_id == self.o_rev_id
    }

    pub const fn is_deletion(&self) -> bool {
        matches!(self.action, ActionKind::Out)
    }
}

/// Expand wide in/out rows into one action per recorded revision.
///
/// Every row yields an `in` action followed by an `out` action. Missing
/// deletions (`out == -1`) are dropped. The original insertion sentinel
/// (`in == -1`) is rewritten to `o_rev_id` under [`FirstInsertion::Backfill`]
/// and dropped under [`FirstInsertion::Sentinel`].
pub fn wide_to_long(rows: &[ContentRow], first_insertion: FirstInsertion) -> Vec<Action> {
    let mut actions = Vec::with_capacity(rows.len() * 2);

    for row in rows {
        let in_rev = match (row.in_rev, first_insertion) {
            (SENTINEL_REV_ID, FirstInsertion::Backfill) => Some(row.o_rev_id),
            (SENTINEL_REV_ID, FirstInsertion::Sentinel) => None,
            (rev_id, _) => Some(rev_id),
        };
        if let Some(rev_id) = in_rev {
            actions.push(Action::from_row(row, ActionKind::In, rev_id));
        }
        if row.out_rev != SENTINEL_REV_ID {
            actions.push(Action::from_row(row, ActionKind::Out, row.out_rev));
        }
    }

    actions
}
