//! Revision model

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One edit of the article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    pub rev_id: i64,
    pub rev_time: DateTime<Utc>,
    /// Upstream exports call this column `o_editor`
    #[serde(alias = "o_editor", deserialize_with = "super::deserialize_editor")]
    pub editor: String,
}

/// Revisions of one article, looked up by id
#[derive(Debug, Clone, Default)]
pub struct RevisionTable {
    revisions: Vec<Revision>,
    by_id: HashMap<i64, usize>,
}

impl RevisionTable {
    /// Build a table ordered by revision time.
    ///
    /// Duplicate revision ids are rejected since every action must join to
    /// exactly one revision.
    pub fn new(mut revisions: Vec<Revision>) -> Result<Self> {
        revisions.sort_by(|a, b| a.rev_time.cmp(&b.rev_time).then(a.rev_id.cmp(&b.rev_id)));

        let mut by_id = HashMap::with_capacity(revisions.len());
        for (index, revision) in revisions.iter().enumerate() {
            if by_id.insert(revision.rev_id, index).is_some() {
                return Err(Error::InvalidInput(format!(
                    "duplicate revision id {}",
                    revision.rev_id
                )));
            }
        }

        Ok(Self { revisions, by_id })
    }

    pub fn get(&self, rev_id: i64) -> Option<&Revision> {
        self.by_id.get(&rev_id).map(|&index| &self.revisions[index])
    }

    /// Revisions in chronological order
    pub fn iter(&self) -> impl Iterator<Item = &Revision> {
        self.revisions.iter()
    }

    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }
}
