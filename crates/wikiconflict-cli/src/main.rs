//! wikiconflict CLI - Conflict and survival reports from the terminal
//!
//! Reads a WikiWho content export and the article's revision table, then
//! prints page and editor level measurements.

mod cli;
mod commands;
mod error;


use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::common::load_analysis;
use crate::commands::conflicts::run_conflicts;
use crate::commands::editor::run_editor;
use crate::commands::export::run_export;
use crate::commands::owned::run_owned;
use crate::commands::survival::run_survival;
use crate::commands::timeline::run_timeline;
use crate::error::CliError;

const DEFAULT_LOG_DIRECTIVE: &str = "wikiconflict=info";

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let directive = DEFAULT_LOG_DIRECTIVE
        .parse()
        .map_err(|error| CliError::Config(format!("invalid log directive: {error}")))?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    let cli = Cli::parse();
    let analysis = load_analysis(&cli.input)?;

    match cli.command {
        Commands::Conflicts { limit, json } => run_conflicts(limit, json, &analysis)?,
        Commands::Editor { editor, json } => run_editor(&editor, json, &analysis)?,
        Commands::Survival {
            max_words,
            counts,
            json,
        } => run_survival(max_words, counts, json, &analysis)?,
        Commands::Timeline {
            granularity,
            editor,
            json,
        } => run_timeline(granularity, editor.as_deref(), json, &analysis)?,
        Commands::Owned { editor, json } => run_owned(&editor, json, &analysis)?,
        Commands::Export { format, output } => {
            run_export(format, output.as_deref(), &analysis)?;
        }
    }

    Ok(())
}
