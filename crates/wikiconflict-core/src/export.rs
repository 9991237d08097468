//! Report rendering shared by CLI output modes.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::conflict::{ConflictManager, EditorConflict};
use crate::survival::{SurvivalTables, TokenSummary, TokensManager};

/// Output format of a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Markdown,
}

/// Page-level summary of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub page_conflict_score: f64,
    pub elegible_actions: usize,
    pub conflicts: usize,
    pub editors: Vec<EditorConflict>,
    pub tokens: Vec<TokenSummary>,
}

impl AnalysisReport {
    pub fn build(
        manager: &ConflictManager,
        tokens: &TokensManager,
        survival: &SurvivalTables,
    ) -> Self {
        Self {
            page_conflict_score: manager.get_page_conflict_score(),
            elegible_actions: manager.elegible_actions().count(),
            conflicts: manager.conflicts().count(),
            editors: manager.get_conflict_score_per_editor(),
            tokens: tokens.get_all_tokens(survival),
        }
    }
}

pub fn render_report_json(report: &AnalysisReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Render the report as Markdown tables.
#[must_use]
pub fn render_report_markdown(report: &AnalysisReport) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Conflict report");
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "- Page conflict score: {:.4}",
        report.page_conflict_score
    );
    let _ = writeln!(output, "- Eligible actions: {}", report.elegible_actions);
    let _ = writeln!(output, "- Conflicts: {}", report.conflicts);
    let _ = writeln!(output);

    let _ = writeln!(output, "## Editors");
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "| editor | conflicts | conflict | actions | conflict_score | conflict_ratio |"
    );
    let _ = writeln!(output, "|---|---:|---:|---:|---:|---:|");
    for editor in &report.editors {
        let _ = writeln!(
            output,
            "| {} | {} | {:.4} | {} | {:.4} | {:.4} |",
            escape_cell(&editor.editor),
            editor.conflict_n,
            editor.conflict,
            editor.actions,
            editor.conflict_score,
            editor.conflict_ratio
        );
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Tokens");
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "| token | adds | adds_48h | dels | dels_48h | reins | reins_48h |"
    );
    let _ = writeln!(output, "|---|---:|---:|---:|---:|---:|---:|");
    for token in &report.tokens {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} | {} | {} | {} |",
            escape_cell(&token.token),
            token.adds,
            token.adds_48h,
            token.dels,
            token.dels_48h,
            token.reins,
            token.reins_48h
        );
    }

    output
}

/// Render a report based on selected export format.
pub fn render_report(report: &AnalysisReport, format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_report_json(report),
        ExportFormat::Markdown => Ok(render_report_markdown(report)),
    }
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}
