//! Conflict scoring formula and scored action rows

use serde::{Deserialize, Serialize};

use crate::models::ActionRecord;

/// Inverse log-time weight of an undo.
///
/// `ln(base) / ln(seconds + 2)`: undos faster than `base` seconds score above
/// one and slower ones below. The `+ 2` keeps the denominator positive, so an
/// instantaneous undo (`seconds == 0`) scores the finite maximum
/// `ln(base) / ln(2)`.
pub fn conflict_score(time_diff_seconds: i64, base_seconds: f64) -> f64 {
    base_seconds.ln() / (time_diff_seconds.max(0) as f64 + 2.0).ln()
}

/// Largest score any single action can receive for a given base
pub fn max_conflict_score(base_seconds: f64) -> f64 {
    conflict_score(0, base_seconds)
}

/// An action of the scoring stream with its time difference and score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAction {
    #[serde(flatten)]
    pub record: ActionRecord,
    /// Seconds since the previous action on the same token; `None` for the
    /// original insertion and for the first action of each token
    pub time_diff: Option<i64>,
    /// Set only on conflicting actions
    pub conflict: Option<f64>,
}

impl ScoredAction {
    /// Eligible actions could have been undos
    pub const fn is_eligible(&self) -> bool {
        self.time_diff.is_some()
    }

    pub const fn is_conflict(&self) -> bool {
        self.conflict.is_some()
    }
}

/// Score one token's ordered actions.
///
/// Each action is compared with its predecessor on the same token: it is a
/// conflict when it is eligible and its editor differs from the predecessor's.
pub(crate) fn score_token(actions: &[ActionRecord], base_seconds: f64) -> Vec<ScoredAction> {
    let mut scored = Vec::with_capacity(actions.len());
    let mut previous: Option<&ActionRecord> = None;

    for record in actions {
        let time_diff = previous
            .filter(|_| !record.is_original_insertion())
            .map(|prev| (record.rev_time - prev.rev_time).num_seconds());

        let conflict = match (previous, time_diff) {
            (Some(prev), Some(seconds)) if prev.editor != record.editor => {
                Some(conflict_score(seconds, base_seconds))
            }
            _ => None,
        };

        scored.push(ScoredAction {
            record: record.clone(),
            time_diff,
            conflict,
        });
        previous = Some(record);
    }

    scored
}
