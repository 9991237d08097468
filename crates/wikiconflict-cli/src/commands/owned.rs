use chrono::Utc;
use wikiconflict_core::ownership::{daily_cutoffs, tokens_owned, OwnedSnapshot};

use crate::commands::common::{normalize_editor, Analysis};
use crate::error::CliError;

pub fn run_owned(editor: &str, as_json: bool, analysis: &Analysis) -> Result<(), CliError> {
    let editor = normalize_editor(editor)?;
    let history = analysis.manager.all_actions();

    // Revisions are kept in time order, so the last one closes the history.
    let until = analysis
        .manager
        .revisions()
        .iter()
        .last()
        .map_or_else(Utc::now, |revision| revision.rev_time);
    let cutoffs = daily_cutoffs(history, editor, until);
    let snapshots = tokens_owned(history, editor, &cutoffs);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
    } else {
        for line in format_owned_lines(&snapshots) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn format_owned_lines(snapshots: &[OwnedSnapshot]) -> Vec<String> {
    snapshots
        .iter()
        .map(|snapshot| {
            format!(
                "{}  {:>6} / {:<6}  {:>6.2}%",
                snapshot.cutoff.format("%Y-%m-%d %H:%M UTC"),
                snapshot.owned,
                snapshot.present,
                snapshot.percent
            )
        })
        .collect()
}
