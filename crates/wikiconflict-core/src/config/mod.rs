//! Analysis configuration.
//!
//! Every knob the conflict scorer and survival classifier read is passed in
//! explicitly through [`AnalysisConfig`]; nothing is taken from ambient state.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::stopwords::{StopwordCatalog, UnsupportedLanguage};

const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_SURVIVAL_THRESHOLD_HOURS: i64 = 48;
const DEFAULT_SCORE_BASE_SECONDS: f64 = 3600.0;
const DEFAULT_MAX_WORDS: usize = 100;

/// How the original insertion sentinel (`in == -1`) is treated when building
/// the conflict-scoring stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstInsertion {
    /// Replace the sentinel with `o_rev_id`; the original insertion is kept
    /// with a null time difference and a token's first deletion is scored
    /// against the original author.
    #[default]
    Backfill,
    /// Leave the sentinel unresolved; the original insertion never reaches the
    /// scoring stream, so a token's first deletion is never eligible.
    ///
    /// Reproduces the page scores of the WikiWho analysis notebooks.
    Sentinel,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub include_stopwords: bool,
    /// Stopword list per language code
    #[serde(default)]
    pub stopword_files: BTreeMap<String, PathBuf>,
    #[serde(default)]
    pub on_unsupported_language: UnsupportedLanguage,
    #[serde(default)]
    pub first_insertion: FirstInsertion,
    #[serde(default = "default_survival_threshold_hours")]
    pub survival_threshold_hours: i64,
    #[serde(default = "default_score_base_seconds")]
    pub score_base_seconds: f64,
    /// Number of most frequent token strings kept by survival rankings
    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

const fn default_survival_threshold_hours() -> i64 {
    DEFAULT_SURVIVAL_THRESHOLD_HOURS
}

const fn default_score_base_seconds() -> f64 {
    DEFAULT_SCORE_BASE_SECONDS
}

const fn default_max_words() -> usize {
    DEFAULT_MAX_WORDS
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            include_stopwords: false,
            stopword_files: BTreeMap::new(),
            on_unsupported_language: UnsupportedLanguage::default(),
            first_insertion: FirstInsertion::default(),
            survival_threshold_hours: DEFAULT_SURVIVAL_THRESHOLD_HOURS,
            score_base_seconds: DEFAULT_SCORE_BASE_SECONDS,
            max_words: DEFAULT_MAX_WORDS,
        }
    }
}

impl AnalysisConfig {
    /// Load a config file, returning defaults when it does not exist.
    ///
    /// Relative stopword paths are resolved against the config file's
    /// directory.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let mut config = serde_json::from_str::<Self>(&raw).map_err(|error| {
            Error::Config(format!("failed to parse {}: {error}", path.display()))
        })?;

        if let Some(base) = path.parent() {
            for file in config.stopword_files.values_mut() {
                if file.is_relative() {
                    *file = base.join(&*file);
                }
            }
        }

        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.language.is_empty() {
            return Err(Error::Config("language must not be empty".to_string()));
        }
        if self.survival_threshold_hours <= 0 {
            return Err(Error::Config(format!(
                "survival_threshold_hours must be positive, got {}",
                self.survival_threshold_hours
            )));
        }
        if Duration::try_hours(self.survival_threshold_hours).is_none() {
            return Err(Error::Config(format!(
                "survival_threshold_hours is out of range, got {}",
                self.survival_threshold_hours
            )));
        }
        if !(self.score_base_seconds > 1.0 && self.score_base_seconds.is_finite()) {
            return Err(Error::Config(format!(
                "score_base_seconds must be a finite value above 1, got {}",
                self.score_base_seconds
            )));
        }
        if self.max_words == 0 {
            return Err(Error::Config("max_words must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Saturates at the largest representable duration for unvalidated
    /// configs.
    pub fn survival_threshold(&self) -> Duration {
        Duration::try_hours(self.survival_threshold_hours).unwrap_or(Duration::MAX)
    }

    pub fn stopword_catalog(&self) -> StopwordCatalog {
        StopwordCatalog::new(
            self.stopword_files.clone(),
            self.on_unsupported_language.clone(),
        )
    }

    fn normalize(&mut self) {
        self.language = self.language.trim().to_lowercase();
        self.stopword_files = std::mem::take(&mut self.stopword_files)
            .into_iter()
            .map(|(language, path)| (language.trim().to_lowercase(), path))
            .collect();
    }
}
