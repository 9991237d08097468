use pretty_assertions::assert_eq;

use super::*;
use crate::error::Error;
use crate::fixtures::Article;
use crate::stopwords::UnsupportedLanguage;

fn analyze(article: &Article, config: AnalysisConfig) -> ConflictManager {
    ConflictManager::with_stopwords(
        article.rows(),
        article.revisions(),
        config,
        &StopwordSet::from_words(["the"]),
    )
    .unwrap()
}

fn score(seconds: i64) -> f64 {
    3600f64.ln() / (seconds as f64 + 2.0).ln()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// insert by a, delete by b half an hour later, reinsert by a after an hour
fn revert_war() -> Article {
    Article::new()
        .revision(1, 0.0, "a")
        .revision(2, 0.5, "b")
        .revision(3, 1.0, "a")
        .row(1, "castle", 1, -1, 2)
        .row(1, "castle", 1, 3, -1)
}

#[test]
fn revert_war_scores_both_undos() {
    let manager = analyze(&revert_war(), AnalysisConfig::default());
    let rows = manager.elegible();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].record.rev_id, 1);
    assert_eq!(rows[0].time_diff, None);
    assert_eq!(rows[0].conflict, None);

    assert_eq!(rows[1].time_diff, Some(1800));
    assert_close(rows[1].conflict.unwrap(), score(1800));

    assert_eq!(rows[2].record.editor, "a");
    assert_eq!(rows[2].time_diff, Some(1800));
    assert_close(rows[2].conflict.unwrap(), score(1800));
}

#[test]
fn single_action_token_is_not_eligible() {
    let article = revert_war().revision(5, 2.0, "c").row(2, "moat", 5, -1, -1);
    let manager = analyze(&article, AnalysisConfig::default());
    assert!(manager.elegible().iter().all(|row| row.record.token_id != 2));
    // still part of the full history
    assert!(manager.all_actions().records().iter().any(|row| row.token_id == 2));
}

#[test]
fn same_editor_deletion_is_not_a_conflict() {
    let article = Article::new()
        .revision(1, 0.0, "a")
        .revision(2, 50.0, "a")
        .row(3, "tower", 1, -1, 2);
    let manager = analyze(&article, AnalysisConfig::default());
    let rows = manager.elegible();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].time_diff, Some(50 * 3600));
    assert_eq!(rows[1].conflict, None);
    assert_eq!(manager.conflicts().count(), 0);
}

#[test]
fn deletion_by_other_editor_is_a_conflict() {
    let article = Article::new()
        .revision(1, 0.0, "a")
        .revision(2, 10.0, "b")
        .row(4, "gate", 1, -1, 2);
    let manager = analyze(&article, AnalysisConfig::default());
    let conflicts: Vec<_> = manager.conflicts().collect();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].time_diff, Some(36_000));
    assert_close(conflicts[0].conflict.unwrap(), score(36_000));
}

#[test]
fn page_score_is_zero_without_eligible_actions() {
    let article = Article::new().revision(1, 0.0, "a").row(1, "keep", 1, -1, -1);
    let manager = analyze(&article, AnalysisConfig::default());
    assert_eq!(manager.elegible_actions().count(), 0);
    assert_eq!(manager.get_page_conflict_score(), 0.0);
    assert!(manager.get_conflict_score_per_editor().is_empty());

    let empty = analyze(&Article::new(), AnalysisConfig::default());
    assert_eq!(empty.get_page_conflict_score(), 0.0);
}

#[test]
fn page_score_averages_over_eligible_actions() {
    let article = revert_war()
        .revision(4, 100.0, "a")
        .row(4, "gate", 1, -1, 4);
    let manager = analyze(&article, AnalysisConfig::default());
    // eligible: two undos in the war plus a's own deletion of "gate"
    assert_eq!(manager.elegible_actions().count(), 3);
    assert_close(manager.get_page_conflict_score(), 2.0 * score(1800) / 3.0);
}

#[test]
fn per_editor_scores_are_sorted_and_normalised() {
    let article = revert_war()
        .revision(4, 100.0, "a")
        .row(4, "gate", 1, -1, 4);
    let editors = analyze(&article, AnalysisConfig::default()).get_conflict_score_per_editor();

    assert_eq!(editors.len(), 2);
    assert_eq!(editors[0].editor, "b");
    assert_eq!(editors[0].conflict_n, 1);
    assert_eq!(editors[0].actions, 1);
    assert_close(editors[0].conflict_score, score(1800));
    assert_close(editors[0].conflict_ratio, 1.0);

    assert_eq!(editors[1].editor, "a");
    assert_eq!(editors[1].actions, 2);
    assert_close(editors[1].conflict_score, score(1800) / 2.0);
    assert_close(editors[1].conflict_ratio, 0.5);
}

#[test]
fn conflicting_actions_are_the_undone_edits() {
    let manager = analyze(&revert_war(), AnalysisConfig::default());

    let undone_by_b = manager.get_conflicting_actions("b");
    assert_eq!(undone_by_b.len(), 1);
    assert_eq!(undone_by_b[0].record.rev_id, 1);

    let undone_by_a = manager.get_conflicting_actions("a");
    assert_eq!(undone_by_a.len(), 1);
    assert_eq!(undone_by_a[0].record.rev_id, 2);

    assert!(manager.get_conflicting_actions("nobody").is_empty());
}

#[test]
fn opponents_pair_each_conflict_with_the_undone_editor() {
    let manager = analyze(&revert_war(), AnalysisConfig::default());
    let opponents = manager.opponents();
    let pairs: Vec<(&str, &str)> = opponents
        .iter()
        .map(|o| (o.editor.as_str(), o.opponent.as_str()))
        .collect();
    assert_eq!(pairs, vec![("b", "a"), ("a", "b")]);
    assert_eq!(opponents[0].opponent_rev_id, 1);
    assert_eq!(opponents[0].time_diff, 1800);
}

#[test]
fn sentinel_policy_never_scores_the_first_deletion() {
    let config = AnalysisConfig {
        first_insertion: FirstInsertion::Sentinel,
        ..Default::default()
    };
    let manager = analyze(&revert_war(), config);
    let rows = manager.elegible();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].record.rev_id, 2);
    assert!(!rows[0].is_eligible());
    assert!(rows[1].is_conflict());
    assert_close(manager.get_page_conflict_score(), score(1800));
}

#[test]
fn stopwords_are_excluded_unless_included() {
    let article = revert_war()
        .row(7, "the", 1, -1, 2)
        .row(7, "the", 1, 3, -1);

    let excluded = analyze(&article, AnalysisConfig::default());
    assert!(excluded.elegible().iter().all(|row| row.record.token != "the"));

    let included = analyze(
        &article,
        AnalysisConfig {
            include_stopwords: true,
            ..Default::default()
        },
    );
    assert_eq!(
        included
            .elegible()
            .iter()
            .filter(|row| row.record.token == "the")
            .count(),
        3
    );
}

#[test]
fn unknown_revision_aborts_the_analysis() {
    let article = revert_war().row(9, "ghost", 1, -1, 99);
    let result = ConflictManager::with_stopwords(
        article.rows(),
        article.revisions(),
        AnalysisConfig::default(),
        &StopwordSet::default(),
    );
    assert!(matches!(result, Err(Error::MissingRevision(99))));
}

#[test]
fn missing_stopword_list_fails_fast() {
    let article = revert_war();
    let result = ConflictManager::new(article.rows(), article.revisions(), AnalysisConfig::default());
    assert!(matches!(result, Err(Error::UnsupportedLanguage(language)) if language == "en"));

    let config = AnalysisConfig {
        include_stopwords: true,
        on_unsupported_language: UnsupportedLanguage::Error,
        ..Default::default()
    };
    assert!(ConflictManager::new(article.rows(), article.revisions(), config).is_ok());
}
