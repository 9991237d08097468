use serde::Serialize;
use wikiconflict_core::survival::SurvivalRatios;
use wikiconflict_core::{TokenSummary, TokensManager};

use crate::commands::common::{truncate, Analysis};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct SurvivalItem<'a> {
    #[serde(flatten)]
    pub summary: &'a TokenSummary,
    #[serde(flatten)]
    pub ratios: SurvivalRatios,
}

pub fn run_survival(
    max_words: Option<usize>,
    show_counts: bool,
    as_json: bool,
    analysis: &Analysis,
) -> Result<(), CliError> {
    let tokens = match max_words {
        Some(0) => return Err(CliError::ZeroLimit("max-words")),
        Some(max_words) => TokensManager::new(max_words, analysis.config().survival_threshold()),
        None => analysis.tokens,
    };

    let tables = tokens.token_survive(analysis.manager.all_actions());
    let summaries = tokens.get_all_tokens(&tables);

    if as_json {
        let items: Vec<SurvivalItem<'_>> = summaries
            .iter()
            .map(|summary| SurvivalItem {
                summary,
                ratios: summary.ratios(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if summaries.is_empty() {
        println!("No token actions found.");
    } else {
        for line in format_survival_lines(&summaries, show_counts) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn format_survival_lines(summaries: &[TokenSummary], show_counts: bool) -> Vec<String> {
    let header = format!(
        "{:<20}  {:>11}  {:>11}  {:>11}",
        "token", "adds", "dels", "reins"
    );
    let rows = summaries.iter().map(|summary| {
        let token = truncate(&summary.token, 20);
        if show_counts {
            format!(
                "{token:<20}  {:>11}  {:>11}  {:>11}",
                fraction(summary.adds_48h, summary.adds),
                fraction(summary.dels_48h, summary.dels),
                fraction(summary.reins_48h, summary.reins)
            )
        } else {
            let ratios = summary.ratios();
            format!(
                "{token:<20}  {:>11.2}  {:>11.2}  {:>11.2}",
                ratios.adds_48h_ratio, ratios.dels_48h_ratio, ratios.reins_48h_ratio
            )
        }
    });

    std::iter::once(header).chain(rows).collect()
}

fn fraction(survived: usize, total: usize) -> String {
    format!("{survived}/{total}")
}
