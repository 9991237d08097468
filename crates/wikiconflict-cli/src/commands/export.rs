use std::path::Path;

use wikiconflict_core::export::render_report;
use wikiconflict_core::AnalysisReport;

use crate::cli::ExportFormat;
use crate::commands::common::Analysis;
use crate::error::CliError;

pub fn run_export(
    format: ExportFormat,
    output_path: Option<&Path>,
    analysis: &Analysis,
) -> Result<(), CliError> {
    let tables = analysis.tokens.token_survive(analysis.manager.all_actions());
    let report = AnalysisReport::build(&analysis.manager, &analysis.tokens, &tables);
    let rendered = render_report(&report, format.into())?;

    if let Some(path) = output_path {
        std::fs::write(path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}
