//! Actions joined with revision metadata, ordered per token.

use crate::error::{Error, Result};
use crate::models::{Action, ActionRecord, RevisionTable};
use crate::stopwords::StopwordSet;

/// Action records sorted by `(token_id, rev_time)`.
///
/// Every windowed computation (time differences, conflict detection,
/// survival) walks [`ActionHistory::groups`], so the ordering is established
/// here rather than assumed from the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionHistory {
    records: Vec<ActionRecord>,
}

impl ActionHistory {
    /// Join actions to their revisions and sort them.
    ///
    /// An action whose revision is absent from `revisions` is an error: a row
    /// without a timestamp cannot be ordered.
    pub fn join(actions: Vec<Action>, revisions: &RevisionTable) -> Result<Self> {
        let records = actions
            .into_iter()
            .map(|action| {
                let revision = revisions
                    .get(action.rev_id)
                    .ok_or(Error::MissingRevision(action.rev_id))?;
                Ok(ActionRecord {
                    token_id: action.token_id,
                    token: action.token,
                    action: action.action,
                    rev_id: action.rev_id,
                    o_rev_id: action.o_rev_id,
                    o_editor: action.o_editor,
                    editor: revision.editor.clone(),
                    rev_time: revision.rev_time,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_records(records))
    }

    /// Wrap already-joined records, sorting them.
    pub fn from_records(mut records: Vec<ActionRecord>) -> Self {
        // revision ids grow over time and break timestamp ties; the sort is
        // stable so an in and an out of one revision keep input order
        records.sort_by(|a, b| {
            a.token_id
                .cmp(&b.token_id)
                .then_with(|| a.rev_time.cmp(&b.rev_time))
                .then_with(|| a.rev_id.cmp(&b.rev_id))
        });
        Self { records }
    }

    pub fn records(&self) -> &[ActionRecord] {
        &self.records
    }

    /// Consecutive runs of records sharing a `token_id`
    pub fn groups(&self) -> impl Iterator<Item = &[ActionRecord]> {
        self.records.chunk_by(|a, b| a.token_id == b.token_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Copy of the history without actions on stopword tokens
    pub fn without_stopwords(&self, stopwords: &StopwordSet) -> Self {
        Self {
            records: self
                .records
                .iter()
                .filter(|record| !stopwords.contains(&record.token))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActionKind, Revision};
    use chrono::{TimeZone, Utc};

    fn revisions() -> RevisionTable {
        let at = |hour| Utc.with_ymd_and_hms(2020, 1, 1, hour, 0, 0).unwrap();
        RevisionTable::new(vec![
            Revision {
                rev_id: 1,
                rev_time: at(0),
                editor: "a".to_string(),
            },
            Revision {
                rev_id: 2,
                rev_time: at(1),
                editor: "b".to_string(),
            },
            Revision {
                rev_id: 3,
                rev_time: at(2),
                editor: "a".to_string(),
            },
        ])
        .unwrap()
    }

    fn action(token_id: i64, token: &str, action: ActionKind, rev_id: i64) -> Action {
        Action {
            token_id,
            token: token.to_string(),
            action,
            rev_id,
            o_rev_id: 1,
            o_editor: "a".to_string(),
        }
    }

    #[test]
    fn join_sorts_by_token_then_time() {
        let history = ActionHistory::join(
            vec![
                action(2, "y", ActionKind::In, 1),
                action(1, "x", ActionKind::Out, 3),
                action(1, "x", ActionKind::In, 1),
                action(1, "x", ActionKind::Out, 2),
            ],
            &revisions(),
        )
        .unwrap();

        let order: Vec<(i64, i64)> = history
            .records()
            .iter()
            .map(|r| (r.token_id, r.rev_id))
            .collect();
        assert_eq!(order, vec![(1, 1), (1, 2), (1, 3), (2, 1)]);
        assert_eq!(history.records()[1].editor, "b");
        assert_eq!(history.groups().count(), 2);
    }

    #[test]
    fn same_instant_revisions_sort_by_id() {
        let at = Utc.with_ymd_and_hms(2020, 1, 1, 5, 0, 0).unwrap();
        let mut table: Vec<Revision> = revisions().iter().cloned().collect();
        table.extend([5, 4].map(|rev_id| Revision {
            rev_id,
            rev_time: at,
            editor: "c".to_string(),
        }));
        let history = ActionHistory::join(
            vec![
                action(1, "x", ActionKind::Out, 5),
                action(1, "x", ActionKind::In, 4),
            ],
            &RevisionTable::new(table).unwrap(),
        )
        .unwrap();

        let order: Vec<i64> = history.records().iter().map(|r| r.rev_id).collect();
        assert_eq!(order, vec![4, 5]);
    }

    #[test]
    fn join_fails_on_unknown_revision() {
        let result = ActionHistory::join(vec![action(1, "x", ActionKind::In, 99)], &revisions());
        assert!(matches!(result, Err(Error::MissingRevision(99))));
    }

    #[test]
    fn stopwords_are_filtered_without_touching_the_original() {
        let history = ActionHistory::join(
            vec![
                action(1, "the", ActionKind::In, 1),
                action(2, "castle", ActionKind::In, 1),
            ],
            &revisions(),
        )
        .unwrap();
        let filtered = history.without_stopwords(&StopwordSet::from_words(["the"]));
        assert_eq!(filtered.len(), 1);
        assert_eq!(history.len(), 2);
    }
}
