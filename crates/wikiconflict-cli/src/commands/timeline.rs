use wikiconflict_core::timeline::{
    conflict_timeline, editor_timeline, EditorPeriod, PeriodConflicts,
};

use crate::cli::Granularity;
use crate::commands::common::{format_optional_score, normalize_editor, Analysis};
use crate::error::CliError;

pub fn run_timeline(
    granularity: Granularity,
    editor: Option<&str>,
    as_json: bool,
    analysis: &Analysis,
) -> Result<(), CliError> {
    let granularity = granularity.into();

    if let Some(editor) = editor {
        let editor = normalize_editor(editor)?;
        let tables = analysis.tokens.token_survive(analysis.manager.all_actions());
        let periods: Vec<EditorPeriod> = editor_timeline(&analysis.manager, &tables, granularity)
            .into_iter()
            .filter(|period| period.editor == editor)
            .collect();

        if as_json {
            println!("{}", serde_json::to_string_pretty(&periods)?);
        } else if periods.is_empty() {
            println!("No activity for editor {editor}.");
        } else {
            for line in format_editor_period_lines(&periods) {
                println!("{line}");
            }
        }
        return Ok(());
    }

    let periods = conflict_timeline(&analysis.manager, granularity);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&periods)?);
    } else if periods.is_empty() {
        println!("No revisions found.");
    } else {
        for line in format_period_lines(&periods) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn format_period_lines(periods: &[PeriodConflicts]) -> Vec<String> {
    let header = format!(
        "{:<10}  {:>9}  {:>7}  {:>9}  {:>9}  {:>8}  {:>6}",
        "period", "revisions", "actions", "eligible", "conflicts", "score", "ratio"
    );
    let rows = periods.iter().map(|period| {
        format!(
            "{:<10}  {:>9}  {:>7}  {:>9}  {:>9}  {:>8}  {:>6}",
            period.period,
            period.revisions,
            period.actions,
            period.elegibles,
            period.conflicts,
            format_optional_score(period.conflict_score),
            format_optional_ratio(period.conflict_ratio)
        )
    });
    std::iter::once(header).chain(rows).collect()
}

pub fn format_editor_period_lines(periods: &[EditorPeriod]) -> Vec<String> {
    let header = format!(
        "{:<10}  {:>7}  {:>8}  {:>9}  {:>8}  {:>12}",
        "period", "actions", "survived", "conflicts", "score", "productivity"
    );
    let rows = periods.iter().map(|period| {
        format!(
            "{:<10}  {:>7}  {:>8}  {:>9}  {:>8}  {:>12}",
            period.period,
            period.actions,
            period.survived,
            period.conflicts,
            format_optional_score(period.conflict_score),
            format_optional_ratio(period.productivity)
        )
    });
    std::iter::once(header).chain(rows).collect()
}

fn format_optional_ratio(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |value| format!("{value:.2}"))
}
