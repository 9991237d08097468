//! Builders for small article histories used by unit tests

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::models::{ContentRow, Revision, RevisionTable};

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
}

pub fn at_hours(hours: f64) -> DateTime<Utc> {
    epoch() + Duration::seconds((hours * 3600.0).round() as i64)
}

#[derive(Default)]
pub struct Article {
    revisions: Vec<Revision>,
    rows: Vec<ContentRow>,
}

impl Article {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revision(mut self, rev_id: i64, hours: f64, editor: &str) -> Self {
        self.revisions.push(Revision {
            rev_id,
            rev_time: at_hours(hours),
            editor: editor.to_string(),
        });
        self
    }

    /// Add one in/out cycle of a token; `o_editor` is taken from `o_rev_id`
    pub fn row(
        mut self,
        token_id: i64,
        token: &str,
        o_rev_id: i64,
        in_rev: i64,
        out_rev: i64,
    ) -> Self {
        let o_editor = self
            .revisions
            .iter()
            .find(|revision| revision.rev_id == o_rev_id)
            .map(|revision| revision.editor.clone())
            .unwrap_or_default();
        self.rows.push(ContentRow {
            token_id,
            token: token.to_string(),
            o_rev_id,
            o_editor,
            in_rev,
            out_rev,
        });
        self
    }

    pub fn rows(&self) -> &[ContentRow] {
        &self.rows
    }

    pub fn revisions(&self) -> RevisionTable {
        RevisionTable::new(self.revisions.clone()).unwrap()
    }
}
