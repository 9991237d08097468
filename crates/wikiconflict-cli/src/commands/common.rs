use std::env;
use std::path::{Path, PathBuf};

use wikiconflict_core::source::{load_content_rows, load_revisions};
use wikiconflict_core::{AnalysisConfig, ConflictManager, TokensManager};

use crate::cli::InputArgs;
use crate::error::CliError;

const CONFIG_DIR_NAME: &str = "wikiconflict";
const CONFIG_FILE_NAME: &str = "config.json";
pub const CONFIG_ENV_VAR: &str = "WIKICONFLICT_CONFIG";

/// Loaded inputs together with the effective configuration
#[derive(Debug)]
pub struct Analysis {
    pub manager: ConflictManager,
    pub tokens: TokensManager,
}

impl Analysis {
    pub const fn config(&self) -> &AnalysisConfig {
        self.manager.config()
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Explicit path first, then the environment, then the user config dir.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<(PathBuf, bool)> {
    if let Some(path) = explicit {
        return Some((path.to_path_buf(), true));
    }
    if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
        return Some((PathBuf::from(path), true));
    }
    default_config_path().map(|path| (path, false))
}

/// Parse a `LANG=PATH` stopword override.
pub fn parse_stopword_override(raw: &str) -> Result<(String, PathBuf), CliError> {
    let (language, path) = raw
        .split_once('=')
        .ok_or_else(|| CliError::InvalidStopwordList(raw.to_string()))?;
    let language = language.trim().to_lowercase();
    let path = path.trim();
    if language.is_empty() || path.is_empty() {
        return Err(CliError::InvalidStopwordList(raw.to_string()));
    }
    Ok((language, PathBuf::from(path)))
}

pub fn load_config(input: &InputArgs) -> Result<AnalysisConfig, CliError> {
    let mut config = match resolve_config_path(input.config.as_deref()) {
        Some((path, required)) => {
            if required && !path.exists() {
                return Err(CliError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            tracing::debug!(path = %path.display(), "loading analysis config");
            AnalysisConfig::load_from_path(&path)?
        }
        None => AnalysisConfig::default(),
    };

    if let Some(language) = input.language.as_deref() {
        config.language = language.trim().to_lowercase();
    }
    if input.include_stopwords {
        config.include_stopwords = true;
    }
    for raw in &input.stopwords {
        let (language, path) = parse_stopword_override(raw)?;
        config.stopword_files.insert(language, path);
    }

    config.validate()?;
    Ok(config)
}

pub fn load_analysis(input: &InputArgs) -> Result<Analysis, CliError> {
    let config = load_config(input)?;
    let content = load_content_rows(&input.actions)?;
    let revisions = load_revisions(&input.revisions)?;

    let tokens = TokensManager::from_config(&config);
    let manager = ConflictManager::new(&content, revisions, config)?;
    Ok(Analysis { manager, tokens })
}

pub fn normalize_editor(editor: &str) -> Result<&str, CliError> {
    let editor = editor.trim();
    if editor.is_empty() {
        return Err(CliError::EmptyEditor);
    }
    Ok(editor)
}

pub fn format_score(value: f64) -> String {
    format!("{value:.4}")
}

pub fn format_optional_score(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), format_score)
}

pub fn format_duration(seconds: i64) -> String {
    let minute = 60;
    let hour = 60 * minute;
    let day = 24 * hour;

    if seconds < minute {
        format!("{seconds}s")
    } else if seconds < hour {
        format!("{}m", seconds / minute)
    } else if seconds < day {
        format!("{}h", seconds / hour)
    } else {
        format!("{}d", seconds / day)
    }
}

pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(width.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}
