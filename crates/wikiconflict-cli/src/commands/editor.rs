use serde::Serialize;
use wikiconflict_core::{EditorConflict, OpponentRecord, ScoredAction};

use crate::commands::common::{format_duration, format_score, normalize_editor, truncate, Analysis};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct EditorOutput<'a> {
    pub editor: &'a str,
    pub summary: Option<EditorConflict>,
    /// Actions of other editors that this editor undid
    pub undone_actions: Vec<&'a ScoredAction>,
    pub opponents: Vec<OpponentRecord>,
}

pub fn run_editor(editor: &str, as_json: bool, analysis: &Analysis) -> Result<(), CliError> {
    let editor = normalize_editor(editor)?;
    let manager = &analysis.manager;

    let output = EditorOutput {
        editor,
        summary: manager
            .get_conflict_score_per_editor()
            .into_iter()
            .find(|summary| summary.editor == editor),
        undone_actions: manager.get_conflicting_actions(editor),
        opponents: manager
            .opponents()
            .into_iter()
            .filter(|record| record.editor == editor)
            .collect(),
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for line in format_editor_lines(&output) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn format_editor_lines(output: &EditorOutput<'_>) -> Vec<String> {
    let Some(summary) = &output.summary else {
        return vec![format!("No conflicts for editor {}.", output.editor)];
    };

    let mut lines = vec![format!(
        "Editor {}: {} conflicts in {} actions, score {}, ratio {:.2}",
        output.editor,
        summary.conflict_n,
        summary.actions,
        format_score(summary.conflict_score),
        summary.conflict_ratio
    )];

    lines.extend(output.opponents.iter().map(|record| {
        format!(
            "{}  rev {:<10}  {:<20}  undid {} after {}  conflict {}",
            record.edit_time.format("%Y-%m-%d %H:%M"),
            record.rev_id,
            truncate(&record.token, 20),
            record.opponent,
            format_duration(record.time_diff),
            format_score(record.conflict)
        )
    }));
    lines
}
