//! Per-row audit pipeline and batch runner
//!
//! Each row carries the captured SQL and the originating report path. The
//! path's last segment is the source identity that selects the mandatory
//! filter list and the known-issue reference. Every row-level failure turns
//! into replacement commentary or a skip for that row; the batch never
//! aborts.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::{self, DisplayNameMap};
use crate::error::FilterAuditError;
use crate::stores::{FilterListStore, KnownIssueMap};

/// The redesigned workbook keeps its own explanatory note; see
/// [`REDESIGN_NOTE`].
const REDESIGNED_WORKBOOK: &str = "Inventory Turns Analysis";

/// Appended verbatim for the redesigned workbook, whose dashboard filters
/// were replaced by standard ones and would otherwise read as missing.
const REDESIGN_NOTE: &str = "Note: In the 20.4 workbook redesign, the Advanced Time Prompt \
     dashboard filter was replaced with standard filters such as Fiscal Calendar, Year, \
     Quarter, and Period, in addition to the other mentioned filters.";

/// One captured query row from the batch input.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryRow {
    /// Originating report path; the segment after the last '/' is the
    /// source identity.
    pub path: Option<String>,
    /// Captured physical SQL for the row.
    pub sql: Option<String>,
}

/// A query row with its audit commentary attached.
#[derive(Debug, Clone, Serialize)]
pub struct AuditedRow {
    #[serde(flatten)]
    pub row: QueryRow,
    /// Null when the row was skipped (no SQL text to analyze).
    pub commentary: Option<String>,
}

/// Outcome of auditing one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Commentary to attach to the row — either a filter report or a
    /// row-level diagnostic replacing it.
    Commentary(String),
    /// The row cannot be analyzed at all; carries the diagnostic.
    Skipped(String),
}

/// Derive the source identity from a report path: the segment after the
/// last '/'. Paths without a separator carry no identity.
pub fn source_identity(path: Option<&str>) -> Option<&str> {
    let path = path?;
    if !path.contains('/') {
        return None;
    }
    path.rsplit('/').next()
}

/// Audit one query row against the loaded stores.
///
/// Errors are only returned for unreadable filter files; everything
/// row-shaped (blank SQL, bad path, unregistered source) resolves to a
/// [`RowOutcome`].
pub fn audit_row(
    row: &QueryRow,
    filter_store: &FilterListStore,
    display_names: &DisplayNameMap,
    known_issues: &KnownIssueMap,
) -> Result<RowOutcome, FilterAuditError> {
    let Some(sql) = row.sql.as_deref().filter(|s| !s.trim().is_empty()) else {
        return Ok(RowOutcome::Skipped("row has no SQL text".to_string()));
    };

    let Some(source) = source_identity(row.path.as_deref()) else {
        return Ok(RowOutcome::Commentary("Invalid Path provided.".to_string()));
    };

    let Some(mandatory_filters) = filter_store.load(source)? else {
        return Ok(RowOutcome::Commentary(format!(
            "Filter file '{}' not found.",
            FilterListStore::file_name(source)
        )));
    };

    let cleaned_sql = engine::strip_joins(sql);
    let where_clause = engine::extract_where(&cleaned_sql);
    let result = where_clause
        .as_deref()
        .map(|clause| engine::categorize(clause, &mandatory_filters));

    let source_note = (source == REDESIGNED_WORKBOOK).then_some(REDESIGN_NOTE);
    let known_issue = known_issues.get(source).map(String::as_str);

    Ok(RowOutcome::Commentary(engine::compose(
        result.as_ref(),
        display_names,
        known_issue,
        source_note,
    )))
}

/// Read a row batch from a JSON array file.
pub fn read_rows(path: &Path) -> Result<Vec<QueryRow>, FilterAuditError> {
    let content = fs::read_to_string(path).map_err(|source| FilterAuditError::BatchReadError {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| FilterAuditError::BatchParseError {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the audited batch as pretty-printed JSON.
pub fn write_rows(path: &Path, rows: &[AuditedRow]) -> Result<(), FilterAuditError> {
    let json = serde_json::to_string_pretty(rows).expect("audited rows serialize to JSON");
    fs::write(path, json).map_err(|source| FilterAuditError::ReportWriteError {
        path: path.to_path_buf(),
        source,
    })
}
