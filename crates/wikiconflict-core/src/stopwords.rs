//! Stopword lists keyed by language.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What to do when no stopword list exists for the requested language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedLanguage {
    /// Fail with [`Error::UnsupportedLanguage`]
    #[default]
    Error,
    /// Use the list of another configured language instead
    FallbackTo(String),
}

/// A set of stopwords loaded fully into memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a whitespace or newline delimited word list
    pub fn parse(raw: &str) -> Self {
        Self::from_words(raw.split_whitespace())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let set = Self::parse(&raw);
        tracing::debug!(path = %path.display(), words = set.len(), "loaded stopwords");
        Ok(set)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Stopword files per language code together with the fallback policy
#[derive(Debug, Clone, Default)]
pub struct StopwordCatalog {
    files: BTreeMap<String, PathBuf>,
    on_unsupported: UnsupportedLanguage,
}

impl StopwordCatalog {
    pub const fn new(
        files: BTreeMap<String, PathBuf>,
        on_unsupported: UnsupportedLanguage,
    ) -> Self {
        Self {
            files,
            on_unsupported,
        }
    }

    /// Find the stopword file for `language`, applying the fallback policy.
    pub fn resolve(&self, language: &str) -> Result<&Path> {
        if let Some(path) = self.files.get(language) {
            return Ok(path);
        }

        match &self.on_unsupported {
            UnsupportedLanguage::Error => Err(Error::UnsupportedLanguage(language.to_string())),
            UnsupportedLanguage::FallbackTo(fallback) => {
                tracing::warn!(
                    language,
                    fallback = fallback.as_str(),
                    "no stopword list configured, using fallback language"
                );
                self.files
                    .get(fallback)
                    .map(PathBuf::as_path)
                    .ok_or_else(|| Error::UnsupportedLanguage(fallback.clone()))
            }
        }
    }

    pub fn load(&self, language: &str) -> Result<StopwordSet> {
        StopwordSet::load(self.resolve(language)?)
    }
}
