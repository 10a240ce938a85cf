//! Error types for sql-filter-audit

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading stores or running an audit batch.
///
/// Row-level conditions (missing WHERE clause, unknown source identity,
/// blank SQL) are not errors — they become replacement commentary or a skip
/// for that row so the rest of the batch keeps going.
#[derive(Error, Debug)]
pub enum FilterAuditError {
    #[error("Failed to read row batch file: {path}")]
    BatchReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse row batch file: {path}")]
    BatchParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read filter file: {path}")]
    FilterFileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read lookup file: {path}")]
    LookupReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse lookup file: {path}")]
    LookupParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write audited batch to {path}")]
    ReportWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
