//! Loading WikiWho exports from JSON files.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{ContentRow, Revision, RevisionTable};

/// Read the "all content" rows of an article.
pub fn load_content_rows(path: &Path) -> Result<Vec<ContentRow>> {
    let rows = read_content_rows(BufReader::new(File::open(path)?))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "loaded action log");
    Ok(rows)
}

pub fn read_content_rows(reader: impl Read) -> Result<Vec<ContentRow>> {
    let rows: Vec<ContentRow> = serde_json::from_reader(reader)?;
    validate_content_rows(&rows)?;
    Ok(rows)
}

/// Read the revision table of an article.
pub fn load_revisions(path: &Path) -> Result<RevisionTable> {
    let revisions = read_revisions(BufReader::new(File::open(path)?))?;
    tracing::info!(path = %path.display(), revisions = revisions.len(), "loaded revisions");
    Ok(revisions)
}

pub fn read_revisions(reader: impl Read) -> Result<RevisionTable> {
    let revisions: Vec<Revision> = serde_json::from_reader(reader)?;
    RevisionTable::new(revisions)
}

/// Every row of a token must name the same original revision and editor.
fn validate_content_rows(rows: &[ContentRow]) -> Result<()> {
    let mut origins: HashMap<i64, (i64, &str)> = HashMap::new();
    for row in rows {
        let origin = (row.o_rev_id, row.o_editor.as_str());
        let seen = *origins.entry(row.token_id).or_insert(origin);
        if seen != origin {
            return Err(Error::InvalidInput(format!(
                "token {} has conflicting origins: revision {} by {} and revision {} by {}",
                row.token_id, seen.0, seen.1, origin.0, origin.1
            )));
        }
    }
    Ok(())
}
