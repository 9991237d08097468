//! Token survival classification.
//!
//! Every action on a token is labelled as an addition (the first action seen
//! for the token), a deletion, or a reinsertion, and is said to survive when
//! no further action touches the token within the survival threshold
//! (48 hours by default).
//!
//! The last action recorded for a token always survives. Histories cut off at
//! a time window therefore overstate survival for tokens touched near the end
//! of the window; this is a known property of the measure and is preserved.

mod ranking;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::info;

pub use ranking::{RankedToken, SurvivalRatios, TokenCount, TokenCounts, TokenSummary};

use crate::config::AnalysisConfig;
use crate::history::ActionHistory;
use crate::models::ActionRecord;
use crate::stopwords::StopwordSet;

/// Mutually exclusive action categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionCategory {
    /// First action seen for the token
    Add,
    /// Any later deletion
    Del,
    /// Any later insertion
    Reins,
}

/// Classification of one action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionState {
    #[serde(flatten)]
    pub record: ActionRecord,
    pub category: ActionCategory,
    /// Seconds until the next action on the same token
    pub next_gap: Option<i64>,
    pub is_last: bool,
    pub survive: bool,
}

/// An action of one category with its survival flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurvivalRecord {
    #[serde(flatten)]
    pub record: ActionRecord,
    pub survive: bool,
}

/// Classified actions split by category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurvivalTables {
    pub adds: Vec<SurvivalRecord>,
    pub dels: Vec<SurvivalRecord>,
    pub reins: Vec<SurvivalRecord>,
}

impl SurvivalTables {
    /// Copy of the tables without actions on stopword tokens
    pub fn without_stopwords(&self, stopwords: &StopwordSet) -> Self {
        let keep = |records: &[SurvivalRecord]| {
            records
                .iter()
                .filter(|survival| !stopwords.contains(&survival.record.token))
                .cloned()
                .collect()
        };
        Self {
            adds: keep(&self.adds),
            dels: keep(&self.dels),
            reins: keep(&self.reins),
        }
    }

    pub fn len(&self) -> usize {
        self.adds.len() + self.dels.len() + self.reins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All records of every category
    pub fn iter(&self) -> impl Iterator<Item = &SurvivalRecord> {
        self.adds.iter().chain(&self.dels).chain(&self.reins)
    }
}

/// Classifies action survival and ranks the most touched token strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokensManager {
    max_words: usize,
    threshold: Duration,
}

impl TokensManager {
    pub const fn new(max_words: usize, threshold: Duration) -> Self {
        Self {
            max_words,
            threshold,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.max_words, config.survival_threshold())
    }

    pub const fn max_words(&self) -> usize {
        self.max_words
    }

    /// Label every action of the complete (unfiltered) history.
    pub fn get_states(&self, history: &ActionHistory) -> Vec<ActionState> {
        let mut states = Vec::with_capacity(history.len());

        for group in history.groups() {
            for (index, record) in group.iter().enumerate() {
                let category = if index == 0 {
                    ActionCategory::Add
                } else if record.is_deletion() {
                    ActionCategory::Del
                } else {
                    ActionCategory::Reins
                };

                let gap = group.get(index + 1).map(|next| next.rev_time - record.rev_time);
                let survive = !matches!(gap, Some(gap) if gap < self.threshold);

                states.push(ActionState {
                    record: record.clone(),
                    category,
                    next_gap: gap.map(|gap| gap.num_seconds()),
                    is_last: gap.is_none(),
                    survive,
                });
            }
        }

        states
    }

    /// Classify the history and split it into additions, deletions and
    /// reinsertions.
    pub fn token_survive(&self, history: &ActionHistory) -> SurvivalTables {
        info!(actions = history.len(), "classifying token survival");
        let mut tables = SurvivalTables::default();

        for state in self.get_states(history) {
            let survival = SurvivalRecord {
                record: state.record,
                survive: state.survive,
            };
            match state.category {
                ActionCategory::Add => tables.adds.push(survival),
                ActionCategory::Del => tables.dels.push(survival),
                ActionCategory::Reins => tables.reins.push(survival),
            }
        }

        tables
    }

    /// Occurrences and survivals per token string
    pub fn count(&self, records: &[SurvivalRecord]) -> TokenCounts {
        ranking::count(records)
    }

    pub fn join_and_rank(&self, counts: &TokenCounts) -> Vec<RankedToken> {
        ranking::join_and_rank(counts, self.max_words)
    }

    /// Rank the most frequent token strings of each category together.
    pub fn get_all_tokens(&self, tables: &SurvivalTables) -> Vec<TokenSummary> {
        ranking::summarize(tables, self.max_words)
    }
}
