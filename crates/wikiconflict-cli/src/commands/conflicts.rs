use serde::Serialize;
use wikiconflict_core::EditorConflict;

use crate::commands::common::{format_score, truncate, Analysis};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct ConflictsOutput<'a> {
    pub page_conflict_score: f64,
    pub elegible_actions: usize,
    pub conflicts: usize,
    pub editors: &'a [EditorConflict],
}

pub fn run_conflicts(limit: usize, as_json: bool, analysis: &Analysis) -> Result<(), CliError> {
    if limit == 0 {
        return Err(CliError::ZeroLimit("limit"));
    }

    let manager = &analysis.manager;
    let mut editors = manager.get_conflict_score_per_editor();
    editors.truncate(limit);

    let output = ConflictsOutput {
        page_conflict_score: manager.get_page_conflict_score(),
        elegible_actions: manager.elegible_actions().count(),
        conflicts: manager.conflicts().count(),
        editors: &editors,
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for line in format_conflict_lines(&output) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn format_conflict_lines(output: &ConflictsOutput<'_>) -> Vec<String> {
    let mut lines = vec![format!(
        "Page conflict score: {} ({} conflicts in {} eligible actions)",
        format_score(output.page_conflict_score),
        output.conflicts,
        output.elegible_actions
    )];

    if output.editors.is_empty() {
        lines.push("No conflicting editors.".to_string());
        return lines;
    }

    lines.push(String::new());
    lines.push(format!(
        "{:<24}  {:>9}  {:>7}  {:>8}  {:>6}",
        "editor", "conflicts", "actions", "score", "ratio"
    ));
    lines.extend(output.editors.iter().map(|editor| {
        format!(
            "{:<24}  {:>9}  {:>7}  {:>8}  {:>6.2}",
            truncate(&editor.editor, 24),
            editor.conflict_n,
            editor.actions,
            format_score(editor.conflict_score),
            editor.conflict_ratio
        )
    }));
    lines
}
