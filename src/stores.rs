//! Lookup stores loaded before a batch run
//!
//! Three read-only tables feed the engine: per-source mandatory filter lists
//! (one `.txt` file per source identity, one filter name per line),
//! display-name labels, and known-issue references (both JSON object files).
//! All are loaded up front; rows are processed against them without further
//! I/O.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::DisplayNameMap;
use crate::error::FilterAuditError;

/// Known-issue references keyed by source identity.
pub type KnownIssueMap = HashMap<String, String>;

/// Directory of per-source mandatory filter lists.
///
/// A source identity `Sales Dashboard` is served by `<dir>/Sales Dashboard.txt`.
#[derive(Debug, Clone)]
pub struct FilterListStore {
    dir: PathBuf,
}

impl FilterListStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File name the given source identity maps to.
    pub fn file_name(source: &str) -> String {
        format!("{}.txt", source)
    }

    /// Load the mandatory filter list for a source identity.
    ///
    /// Returns `Ok(None)` when no filter file is registered for the source.
    /// Names are trimmed, blank lines dropped, and canonicalized to lower
    /// case; file order is preserved because it drives report order.
    pub fn load(&self, source: &str) -> Result<Option<Vec<String>>, FilterAuditError> {
        let path = self.dir.join(Self::file_name(source));
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .map_err(|source| FilterAuditError::FilterFileReadError { path, source })?;
        let filters = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_lowercase)
            .collect();
        Ok(Some(filters))
    }
}

/// Load the display-name table: a JSON object mapping SQL filter names to
/// human-readable labels. Keys are lower-cased on load so lookups match the
/// canonical filter-name form.
pub fn load_display_names(path: &Path) -> Result<DisplayNameMap, FilterAuditError> {
    let raw: HashMap<String, String> = read_json(path)?;
    Ok(raw
        .into_iter()
        .map(|(key, value)| (key.to_lowercase(), value))
        .collect())
}

/// Load the known-issue table: a JSON object mapping source identities to
/// tracked-issue references.
pub fn load_known_issues(path: &Path) -> Result<KnownIssueMap, FilterAuditError> {
    read_json(path)
}

fn read_json(path: &Path) -> Result<HashMap<String, String>, FilterAuditError> {
    let content = fs::read_to_string(path).map_err(|source| FilterAuditError::LookupReadError {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| FilterAuditError::LookupParseError {
        path: path.to_path_buf(),
        source,
    })
}
