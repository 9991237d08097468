//! Token string frequency and survival rankings

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::{SurvivalRecord, SurvivalTables};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    pub token: String,
    pub count: usize,
}

/// Occurrences per token string, most frequent first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCounts {
    /// All occurrences
    pub total: Vec<TokenCount>,
    /// Occurrences that survived
    pub survival: Vec<TokenCount>,
}

impl TokenCounts {
    fn lookup(counts: &[TokenCount]) -> HashMap<&str, usize> {
        counts
            .iter()
            .map(|count| (count.token.as_str(), count.count))
            .collect()
    }

    fn top(counts: &[TokenCount], n: usize) -> impl Iterator<Item = &str> {
        counts.iter().take(n).map(|count| count.token.as_str())
    }
}

/// A token string with its total and surviving occurrences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedToken {
    pub token: String,
    pub total: usize,
    pub survival: usize,
}

/// Survival counts of one token string across the three action categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSummary {
    pub token: String,
    pub adds: usize,
    pub adds_48h: usize,
    pub dels: usize,
    pub dels_48h: usize,
    pub reins: usize,
    pub reins_48h: usize,
}

/// Survived over total per category, rounded to two decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalRatios {
    pub adds_48h_ratio: f64,
    pub dels_48h_ratio: f64,
    pub reins_48h_ratio: f64,
}

impl TokenSummary {
    pub fn ratios(&self) -> SurvivalRatios {
        SurvivalRatios {
            adds_48h_ratio: ratio(self.adds_48h, self.adds),
            dels_48h_ratio: ratio(self.dels_48h, self.dels),
            reins_48h_ratio: ratio(self.reins_48h, self.reins),
        }
    }

    fn sort_key(&self) -> [usize; 6] {
        [
            self.adds,
            self.adds_48h,
            self.dels,
            self.dels_48h,
            self.reins,
            self.reins_48h,
        ]
    }
}

fn ratio(survived: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (survived as f64 / total as f64 * 100.0).round() / 100.0
}

/// Count occurrences of every token string, and the surviving ones.
pub fn count(records: &[SurvivalRecord]) -> TokenCounts {
    let mut total: HashMap<&str, usize> = HashMap::new();
    let mut survival: HashMap<&str, usize> = HashMap::new();

    for survival_record in records {
        let token = survival_record.record.token.as_str();
        *total.entry(token).or_default() += 1;
        if survival_record.survive {
            *survival.entry(token).or_default() += 1;
        }
    }

    TokenCounts {
        total: sorted_counts(total),
        survival: sorted_counts(survival),
    }
}

fn sorted_counts(counts: HashMap<&str, usize>) -> Vec<TokenCount> {
    let mut counts: Vec<TokenCount> = counts
        .into_iter()
        .map(|(token, count)| TokenCount {
            token: token.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.token.cmp(&b.token)));
    counts
}

/// Join the `max_words` most frequent tokens with the `max_words` most
/// frequently surviving ones, filling either side from the full counts.
pub fn join_and_rank(counts: &TokenCounts, max_words: usize) -> Vec<RankedToken> {
    let totals = TokenCounts::lookup(&counts.total);
    let survivals = TokenCounts::lookup(&counts.survival);

    let tokens: BTreeSet<&str> = TokenCounts::top(&counts.total, max_words)
        .chain(TokenCounts::top(&counts.survival, max_words))
        .collect();

    let mut ranked: Vec<RankedToken> = tokens
        .into_iter()
        .map(|token| RankedToken {
            token: token.to_string(),
            total: totals.get(token).copied().unwrap_or_default(),
            survival: survivals.get(token).copied().unwrap_or_default(),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| b.survival.cmp(&a.survival))
            .then_with(|| a.token.cmp(&b.token))
    });
    ranked
}

pub(super) fn summarize(tables: &SurvivalTables, max_words: usize) -> Vec<TokenSummary> {
    let adds = count(&tables.adds);
    let dels = count(&tables.dels);
    let reins = count(&tables.reins);

    let tokens: BTreeSet<String> = [&adds, &dels, &reins]
        .into_iter()
        .flat_map(|counts| join_and_rank(counts, max_words))
        .map(|ranked| ranked.token)
        .collect();

    let lookups = [&adds, &dels, &reins].map(|counts| {
        (
            TokenCounts::lookup(&counts.total),
            TokenCounts::lookup(&counts.survival),
        )
    });
    let get = |index: usize, token: &str| {
        let (total, survival) = &lookups[index];
        (
            total.get(token).copied().unwrap_or_default(),
            survival.get(token).copied().unwrap_or_default(),
        )
    };

    let mut summaries: Vec<TokenSummary> = tokens
        .into_iter()
        .map(|token| {
            let (adds, adds_48h) = get(0, &token);
            let (dels, dels_48h) = get(1, &token);
            let (reins, reins_48h) = get(2, &token);
            TokenSummary {
                token,
                adds,
                adds_48h,
                dels,
                dels_48h,
                reins,
                reins_48h,
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.sort_key()
            .cmp(&a.sort_key())
            .then_with(|| a.token.cmp(&b.token))
    });
    summaries
}
