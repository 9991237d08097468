use std::collections::HashMap;

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use wikiconflict_core::conflict::{conflict_score, max_conflict_score};
use wikiconflict_core::models::wide_to_long;
use wikiconflict_core::{
    ActionHistory, AnalysisConfig, ConflictManager, ContentRow, FirstInsertion, Revision,
    RevisionTable, StopwordSet, TokensManager,
};

const EDITORS: [&str; 3] = ["alice", "bob", "carol"];
const WORDS: [&str; 4] = ["castle", "moat", "gate", "tower"];

#[derive(Debug, Clone)]
struct Article {
    revisions: Vec<Revision>,
    rows: Vec<ContentRow>,
}

impl Article {
    fn table(&self) -> RevisionTable {
        RevisionTable::new(self.revisions.clone()).unwrap()
    }

    fn history(&self) -> ActionHistory {
        ActionHistory::join(
            wide_to_long(&self.rows, FirstInsertion::Backfill),
            &self.table(),
        )
        .unwrap()
    }

    fn manager(&self) -> ConflictManager {
        let config = AnalysisConfig {
            include_stopwords: true,
            ..Default::default()
        };
        ConflictManager::with_stopwords(&self.rows, self.table(), config, &StopwordSet::default())
            .unwrap()
    }
}

/// Alternating in/out actions per token over a shared, time-ordered
/// revision list.
fn arb_article() -> impl Strategy<Value = Article> {
    prop::collection::vec((0i64..300_000, 0usize..EDITORS.len()), 2..25).prop_flat_map(|revs| {
        let n = revs.len();
        let tokens = prop::collection::vec(
            (0usize..WORDS.len(), prop::collection::vec(0..n, 1..7)),
            1..8,
        );
        (Just(revs), tokens).prop_map(|(revs, tokens)| {
            let start = Utc.with_ymd_and_hms(2015, 6, 1, 0, 0, 0).unwrap();
            let mut time = start;
            let revisions: Vec<Revision> = revs
                .iter()
                .enumerate()
                .map(|(index, &(gap, editor))| {
                    time += Duration::seconds(gap);
                    Revision {
                        rev_id: index as i64 + 1,
                        rev_time: time,
                        editor: EDITORS[editor].to_string(),
                    }
                })
                .collect();

            let mut rows = Vec::new();
            for (token_id, (word, mut picks)) in tokens.into_iter().enumerate() {
                picks.sort_unstable();
                picks.dedup();
                let rev_ids: Vec<i64> = picks.iter().map(|&index| index as i64 + 1).collect();
                let o_rev_id = rev_ids[0];
                let o_editor = revisions[picks[0]].editor.clone();
                for (cycle, chunk) in rev_ids.chunks(2).enumerate() {
                    rows.push(ContentRow {
                        token_id: token_id as i64,
                        token: WORDS[word].to_string(),
                        o_rev_id,
                        o_editor: o_editor.clone(),
                        in_rev: if cycle == 0 { -1 } else { chunk[0] },
                        out_rev: chunk.get(1).copied().unwrap_or(-1),
                    });
                }
            }
            Article { revisions, rows }
        })
    })
}

proptest! {
    #[test]
    fn single_action_tokens_are_never_eligible(article in arb_article()) {
        let history = article.history();
        let mut actions: HashMap<i64, usize> = HashMap::new();
        for record in history.records() {
            *actions.entry(record.token_id).or_default() += 1;
        }
        let manager = article.manager();
        for row in manager.elegible() {
            prop_assert!(actions[&row.record.token_id] > 1);
        }
    }

    #[test]
    fn original_insertions_have_no_score(article in arb_article()) {
        for row in article.manager().elegible() {
            if row.record.is_original_insertion() {
                prop_assert!(row.time_diff.is_none());
                prop_assert!(row.conflict.is_none());
            }
        }
    }

    #[test]
    fn conflicts_require_an_editor_change(article in arb_article()) {
        let manager = article.manager();
        for pair in manager.elegible().windows(2) {
            if pair[1].is_conflict() {
                prop_assert_eq!(pair[0].record.token_id, pair[1].record.token_id);
                prop_assert_ne!(&pair[0].record.editor, &pair[1].record.editor);
            }
        }
        if let Some(first) = manager.elegible().first() {
            prop_assert!(!first.is_conflict());
        }
    }

    #[test]
    fn faster_undos_score_higher(a in 0i64..10_000_000, delta in 1i64..10_000_000) {
        prop_assert!(conflict_score(a, 3600.0) > conflict_score(a + delta, 3600.0));
    }

    #[test]
    fn survival_follows_last_action_and_threshold(article in arb_article()) {
        let threshold = Duration::hours(48);
        let states = TokensManager::new(100, threshold).get_states(&article.history());
        for pair in states.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            if current.record.token_id == next.record.token_id {
                prop_assert!(!current.is_last);
                let gap = next.record.rev_time - current.record.rev_time;
                prop_assert_eq!(current.survive, gap >= threshold);
            } else {
                prop_assert!(current.is_last);
                prop_assert!(current.survive);
            }
        }
        if let Some(last) = states.last() {
            prop_assert!(last.is_last && last.survive);
        }
    }

    #[test]
    fn categories_partition_the_history(article in arb_article()) {
        let history = article.history();
        let tables = TokensManager::new(100, Duration::hours(48)).token_survive(&history);
        prop_assert_eq!(tables.len(), history.len());
        prop_assert_eq!(tables.adds.len(), history.groups().count());
        prop_assert!(tables.dels.iter().all(|survival| survival.record.is_deletion()));
        prop_assert!(tables.reins.iter().all(|survival| !survival.record.is_deletion()));
    }

    #[test]
    fn editor_scores_are_bounded(article in arb_article()) {
        let manager = article.manager();
        // averages of scores at the maximum may round up by an ulp
        let max = max_conflict_score(3600.0) + 1e-9;
        let page = manager.get_page_conflict_score();
        prop_assert!((0.0..=max).contains(&page));
        for editor in manager.get_conflict_score_per_editor() {
            prop_assert!((0.0..=max).contains(&editor.conflict_score));
            prop_assert!((0.0..=1.0).contains(&editor.conflict_ratio));
            prop_assert!(editor.conflict_n <= editor.actions);
        }
    }
}
