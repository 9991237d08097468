//! Tokens owned by an editor over time.
//!
//! A token is present at an instant when its last action at or before that
//! instant is an insertion; it is owned by the editor who originally added it.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::ActionHistory;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedSnapshot {
    pub cutoff: DateTime<Utc>,
    /// Present tokens originally inserted by the editor
    pub owned: usize,
    /// All present tokens
    pub present: usize,
    /// `100 * owned / present`, 0 when nothing is present
    pub percent: f64,
}

/// Count present and owned tokens at each cutoff.
pub fn tokens_owned(
    history: &ActionHistory,
    editor: &str,
    cutoffs: &[DateTime<Utc>],
) -> Vec<OwnedSnapshot> {
    cutoffs
        .iter()
        .map(|&cutoff| {
            let mut owned = 0;
            let mut present = 0;
            for group in history.groups() {
                let seen = group.partition_point(|record| record.rev_time <= cutoff);
                let Some(last) = seen.checked_sub(1).map(|index| &group[index]) else {
                    continue;
                };
                if last.is_deletion() {
                    continue;
                }
                present += 1;
                if last.o_editor == editor {
                    owned += 1;
                }
            }
            OwnedSnapshot {
                cutoff,
                owned,
                present,
                percent: if present == 0 {
                    0.0
                } else {
                    100.0 * owned as f64 / present as f64
                },
            }
        })
        .collect()
}

/// End-of-day cutoffs for every day on which a token of `editor` was touched,
/// plus the day of `until`, newest first.
pub fn daily_cutoffs(
    history: &ActionHistory,
    editor: &str,
    until: DateTime<Utc>,
) -> Vec<DateTime<Utc>> {
    let days: BTreeSet<_> = history
        .records()
        .iter()
        .filter(|record| record.o_editor == editor)
        .map(|record| record.rev_time.date_naive())
        .chain(std::iter::once(until.date_naive()))
        .collect();

    days.into_iter()
        .rev()
        .map(|day| (day + Duration::days(1)).and_time(NaiveTime::MIN).and_utc())
        .collect()
}
