//! Conflict scoring.
//!
//! A conflict is an action on a token by a different editor than the one who
//! acted on that token immediately before: an undo of someone else's edit.
//! Each conflict is weighted by how quickly it followed the previous action
//! (see [`score::conflict_score`]).

mod score;

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use score::{conflict_score, max_conflict_score, ScoredAction};

use crate::config::{AnalysisConfig, FirstInsertion};
use crate::error::Result;
use crate::history::ActionHistory;
use crate::models::{wide_to_long, Action, ContentRow, RevisionTable};
use crate::stopwords::StopwordSet;

/// Conflict totals of one editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConflict {
    pub editor: String,
    /// Number of conflicting actions
    pub conflict_n: usize,
    /// Sum of conflict scores
    pub conflict: f64,
    /// Number of eligible actions
    pub actions: usize,
    /// `conflict / actions`
    pub conflict_score: f64,
    /// `conflict_n / actions`
    pub conflict_ratio: f64,
}

/// A conflicting action paired with the action it undid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentRecord {
    pub token_id: i64,
    pub token: String,
    pub rev_id: i64,
    pub editor: String,
    pub edit_time: DateTime<Utc>,
    pub opponent: String,
    pub opponent_rev_id: i64,
    pub opponent_time: DateTime<Utc>,
    pub time_diff: i64,
    pub conflict: f64,
}

/// Computes conflict measurements for one article and keeps the
/// intermediate tables around for reporting.
#[derive(Debug, Clone)]
pub struct ConflictManager {
    config: AnalysisConfig,
    revisions: RevisionTable,
    elegible: Vec<ScoredAction>,
    all_actions: ActionHistory,
}

impl ConflictManager {
    /// Run the analysis, loading the stopword list from the configured
    /// catalog unless stopwords are included.
    pub fn new(
        content: &[ContentRow],
        revisions: RevisionTable,
        config: AnalysisConfig,
    ) -> Result<Self> {
        config.validate()?;
        let stopwords = if config.include_stopwords {
            StopwordSet::default()
        } else {
            config.stopword_catalog().load(&config.language)?
        };
        Self::with_stopwords(content, revisions, config, &stopwords)
    }

    /// Run the analysis with a pre-loaded stopword list.
    ///
    /// The list is ignored when `config.include_stopwords` is set.
    pub fn with_stopwords(
        content: &[ContentRow],
        revisions: RevisionTable,
        config: AnalysisConfig,
        stopwords: &StopwordSet,
    ) -> Result<Self> {
        config.validate()?;
        let stopwords = (!config.include_stopwords).then_some(stopwords);

        info!(rows = content.len(), "preparing eligible token actions");
        let candidates = retain_recurring_tokens(wide_to_long(content, config.first_insertion));
        let candidates = remove_stopwords(candidates, stopwords);

        info!(actions = candidates.len(), "merging eligible actions and revisions");
        let history = ActionHistory::join(candidates, &revisions)?;

        info!("scoring conflicts");
        let elegible: Vec<ScoredAction> = history
            .groups()
            .flat_map(|group| score::score_token(group, config.score_base_seconds))
            .collect();

        let all_actions =
            remove_stopwords(wide_to_long(content, FirstInsertion::Backfill), stopwords);
        let all_actions = ActionHistory::join(all_actions, &revisions)?;

        let manager = Self {
            config,
            revisions,
            elegible,
            all_actions,
        };
        debug!(
            elegible = manager.elegible.len(),
            elegible_actions = manager.elegible_actions().count(),
            conflicts = manager.conflicts().count(),
            all_actions = manager.all_actions.len(),
            "conflict analysis complete"
        );
        Ok(manager)
    }

    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub const fn revisions(&self) -> &RevisionTable {
        &self.revisions
    }

    /// Every action of the recurring tokens, scored, in `(token_id, rev_time)` order
    pub fn elegible(&self) -> &[ScoredAction] {
        &self.elegible
    }

    /// Actions that had the potential of being undos
    pub fn elegible_actions(&self) -> impl Iterator<Item = &ScoredAction> {
        self.elegible.iter().filter(|action| action.is_eligible())
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &ScoredAction> {
        self.elegible.iter().filter(|action| action.is_conflict())
    }

    /// Full action history (original insertions backfilled), including tokens
    /// with a single action. Stopwords are removed unless configured otherwise.
    pub const fn all_actions(&self) -> &ActionHistory {
        &self.all_actions
    }

    /// Sum of all conflict scores over the number of eligible actions.
    ///
    /// Returns 0 when there are no eligible actions.
    pub fn get_page_conflict_score(&self) -> f64 {
        let elegible = self.elegible_actions().count();
        if elegible == 0 {
            return 0.0;
        }
        let total: f64 = self.conflicts().filter_map(|action| action.conflict).sum();
        total / elegible as f64
    }

    /// Conflict totals per editor who was involved in at least one conflict,
    /// highest `conflict_score` first.
    pub fn get_conflict_score_per_editor(&self) -> Vec<EditorConflict> {
        let mut actions: HashMap<&str, usize> = HashMap::new();
        for action in self.elegible_actions() {
            *actions.entry(action.record.editor.as_str()).or_default() += 1;
        }

        let mut totals: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
        for action in self.conflicts() {
            let entry = totals.entry(action.record.editor.as_str()).or_default();
            entry.0 += 1;
            entry.1 += action.conflict.unwrap_or_default();
        }

        let mut editors: Vec<EditorConflict> = totals
            .into_iter()
            .map(|(editor, (conflict_n, conflict))| {
                // conflicts are eligible, so the count is never zero here
                let elegible = actions.get(editor).copied().unwrap_or(conflict_n).max(1);
                EditorConflict {
                    editor: editor.to_string(),
                    conflict_n,
                    conflict,
                    actions: elegible,
                    conflict_score: conflict / elegible as f64,
                    conflict_ratio: conflict_n as f64 / elegible as f64,
                }
            })
            .collect();

        editors.sort_by(|a, b| {
            b.conflict_score
                .total_cmp(&a.conflict_score)
                .then_with(|| a.editor.cmp(&b.editor))
        });
        editors
    }

    /// Actions whose immediate successor on the same token is a conflict
    /// performed by `editor`: the edits `editor` undid.
    pub fn get_conflicting_actions(&self, editor: &str) -> Vec<&ScoredAction> {
        self.elegible
            .windows(2)
            .filter(|pair| {
                let (prev, next) = (&pair[0], &pair[1]);
                prev.record.token_id == next.record.token_id
                    && next.is_conflict()
                    && next.record.editor == editor
            })
            .map(|pair| &pair[0])
            .collect()
    }

    /// Every conflict with the editor and time of the action it undid,
    /// ordered by token and then by descending score.
    pub fn opponents(&self) -> Vec<OpponentRecord> {
        let mut opponents: Vec<OpponentRecord> = self
            .elegible
            .windows(2)
            .filter(|pair| pair[0].record.token_id == pair[1].record.token_id)
            .filter_map(|pair| {
                let (prev, next) = (&pair[0].record, &pair[1]);
                let conflict = next.conflict?;
                Some(OpponentRecord {
                    token_id: next.record.token_id,
                    token: next.record.token.clone(),
                    rev_id: next.record.rev_id,
                    editor: next.record.editor.clone(),
                    edit_time: next.record.rev_time,
                    opponent: prev.editor.clone(),
                    opponent_rev_id: prev.rev_id,
                    opponent_time: prev.rev_time,
                    time_diff: next.time_diff.unwrap_or_default(),
                    conflict,
                })
            })
            .collect();

        opponents.sort_by(|a, b| {
            a.token_id
                .cmp(&b.token_id)
                .then_with(|| b.conflict.total_cmp(&a.conflict))
        });
        opponents
    }
}

/// Keep only actions of tokens that occur more than once; a single action
/// can never be part of an undo cycle.
fn retain_recurring_tokens(actions: Vec<Action>) -> Vec<Action> {
    let mut occurrences: HashMap<i64, usize> = HashMap::new();
    for action in &actions {
        *occurrences.entry(action.token_id).or_default() += 1;
    }
    actions
        .into_iter()
        .filter(|action| occurrences.get(&action.token_id).copied().unwrap_or_default() > 1)
        .collect()
}

fn remove_stopwords(actions: Vec<Action>, stopwords: Option<&StopwordSet>) -> Vec<Action> {
    match stopwords {
        Some(stopwords) if !stopwords.is_empty() => actions
            .into_iter()
            .filter(|action| !stopwords.contains(&action.token))
            .collect(),
        _ => actions,
    }
}

#[cfg(test)]
mod tests;
