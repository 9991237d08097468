//! Conflict and survival totals per time period.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::conflict::ConflictManager;
use crate::survival::SurvivalTables;

/// Width of the time buckets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    /// Weeks start on Monday
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl Granularity {
    /// First day of the period containing `time`
    pub fn bucket(self, time: DateTime<Utc>) -> NaiveDate {
        let date = time.date_naive();
        match self {
            Self::Daily => date,
            Self::Weekly => date - Duration::days(i64::from(date.weekday().num_days_from_monday())),
            Self::Monthly => date.with_day(1).unwrap_or(date),
            Self::Yearly => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    revisions: usize,
    actions: usize,
    survived: usize,
    elegibles: usize,
    conflicts: usize,
    conflict_sum: f64,
}

impl Tally {
    fn conflict_score(&self) -> Option<f64> {
        (self.elegibles > 0).then(|| self.conflict_sum / self.elegibles as f64)
    }

    fn conflict_ratio(&self) -> Option<f64> {
        (self.elegibles > 0).then(|| self.conflicts as f64 / self.elegibles as f64)
    }
}

/// Article-wide totals of one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodConflicts {
    pub period: NaiveDate,
    pub revisions: usize,
    pub actions: usize,
    pub elegibles: usize,
    pub conflicts: usize,
    pub conflict_sum: f64,
    /// `None` when the period has no eligible actions
    pub conflict_score: Option<f64>,
    pub conflict_ratio: Option<f64>,
}

/// Totals of one editor in one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorPeriod {
    pub period: NaiveDate,
    pub editor: String,
    /// Classified actions (adds, dels and reins)
    pub actions: usize,
    /// Actions that survived the threshold
    pub survived: usize,
    pub elegibles: usize,
    pub conflicts: usize,
    pub conflict_sum: f64,
    pub conflict_score: Option<f64>,
    pub conflict_ratio: Option<f64>,
    /// `survived / actions`
    pub productivity: Option<f64>,
}

fn tally_conflicts<'a, K: Ord>(
    tallies: &mut BTreeMap<K, Tally>,
    manager: &'a ConflictManager,
    key: impl Fn(&'a str, DateTime<Utc>) -> K,
) {
    for action in manager.elegible_actions() {
        let tally = tallies
            .entry(key(action.record.editor.as_str(), action.record.rev_time))
            .or_default();
        tally.elegibles += 1;
        if let Some(conflict) = action.conflict {
            tally.conflicts += 1;
            tally.conflict_sum += conflict;
        }
    }
}

/// Conflict totals of the whole article per period, oldest first.
pub fn conflict_timeline(
    manager: &ConflictManager,
    granularity: Granularity,
) -> Vec<PeriodConflicts> {
    let mut tallies: BTreeMap<NaiveDate, Tally> = BTreeMap::new();

    for revision in manager.revisions().iter() {
        tallies
            .entry(granularity.bucket(revision.rev_time))
            .or_default()
            .revisions += 1;
    }
    for record in manager.all_actions().records() {
        tallies
            .entry(granularity.bucket(record.rev_time))
            .or_default()
            .actions += 1;
    }
    tally_conflicts(&mut tallies, manager, |_, time| granularity.bucket(time));

    tallies
        .into_iter()
        .map(|(period, tally)| PeriodConflicts {
            period,
            revisions: tally.revisions,
            actions: tally.actions,
            elegibles: tally.elegibles,
            conflicts: tally.conflicts,
            conflict_sum: tally.conflict_sum,
            conflict_score: tally.conflict_score(),
            conflict_ratio: tally.conflict_ratio(),
        })
        .collect()
}

/// Conflict and survival totals per period and editor, ordered by period
/// then editor.
pub fn editor_timeline(
    manager: &ConflictManager,
    survival: &SurvivalTables,
    granularity: Granularity,
) -> Vec<EditorPeriod> {
    let mut tallies: BTreeMap<(NaiveDate, &str), Tally> = BTreeMap::new();

    for survival_record in survival.iter() {
        let record = &survival_record.record;
        let tally = tallies
            .entry((granularity.bucket(record.rev_time), record.editor.as_str()))
            .or_default();
        tally.actions += 1;
        if survival_record.survive {
            tally.survived += 1;
        }
    }
    tally_conflicts(&mut tallies, manager, |editor, time| {
        (granularity.bucket(time), editor)
    });

    tallies
        .into_iter()
        .map(|((period, editor), tally)| EditorPeriod {
            period,
            editor: editor.to_string(),
            actions: tally.actions,
            survived: tally.survived,
            elegibles: tally.elegibles,
            conflicts: tally.conflicts,
            conflict_sum: tally.conflict_sum,
            conflict_score: tally.conflict_score(),
            conflict_ratio: tally.conflict_ratio(),
            productivity: (tally.actions > 0)
                .then(|| tally.survived as f64 / tally.actions as f64),
        })
        .collect()
}
