//! sql-filter-audit: mandatory-filter auditing for BI-captured SQL
//!
//! This library inspects SQL query logs captured from a BI reporting tool,
//! determines which mandatory WHERE-clause filters each query applies, and
//! writes a human-readable commentary per row for downstream review.

pub mod audit;
pub mod engine;
pub mod error;
pub mod logtext;
pub mod stores;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;

use audit::{audit_row, read_rows, write_rows, AuditedRow, RowOutcome};
use stores::FilterListStore;

pub use error::FilterAuditError;

/// Options for running an audit batch
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// Path to the JSON row batch file
    pub input_path: PathBuf,
    /// Output path for the audited batch (defaults to `<input>.audited.json`)
    pub output_path: Option<PathBuf>,
    /// Directory holding per-source mandatory filter lists
    pub filters_dir: PathBuf,
    /// Optional JSON file mapping SQL filter names to display labels
    pub display_names_path: Option<PathBuf>,
    /// Optional JSON file mapping source identities to known-issue references
    pub known_issues_path: Option<PathBuf>,
    /// Enable verbose output
    pub verbose: bool,
}

/// Audit a row batch and write the commented rows back out
pub fn run_audit(options: AuditOptions) -> Result<PathBuf> {
    // Step 1: Load the lookup tables once, before the batch
    let display_names = match &options.display_names_path {
        Some(path) => stores::load_display_names(path)?,
        None => HashMap::new(),
    };
    let known_issues = match &options.known_issues_path {
        Some(path) => stores::load_known_issues(path)?,
        None => HashMap::new(),
    };
    let filter_store = FilterListStore::new(&options.filters_dir);

    if options.verbose {
        println!(
            "Loaded {} display names, {} known issues",
            display_names.len(),
            known_issues.len()
        );
    }

    // Step 2: Read the row batch
    let rows = read_rows(&options.input_path)?;

    if options.verbose {
        println!("Read {} rows from {}", rows.len(), options.input_path.display());
    }

    // Step 3: Audit each row; failures stay local to their row
    let mut audited = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;
    for (index, row) in rows.into_iter().enumerate() {
        let commentary =
            match audit_row(&row, &filter_store, &display_names, &known_issues)? {
                RowOutcome::Commentary(text) => Some(text),
                RowOutcome::Skipped(reason) => {
                    skipped += 1;
                    if options.verbose {
                        println!("Row {}: skipped ({})", index, reason);
                    }
                    None
                }
            };
        audited.push(AuditedRow { row, commentary });
    }

    // Step 4: Determine the output path
    let output_path = options.output_path.unwrap_or_else(|| {
        let stem = options
            .input_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("audit");
        options
            .input_path
            .with_file_name(format!("{}.audited.json", stem))
    });

    // Step 5: Write the audited batch
    write_rows(&output_path, &audited)?;

    if options.verbose {
        println!(
            "Audited {} rows ({} skipped), wrote {}",
            audited.len(),
            skipped,
            output_path.display()
        );
    }

    Ok(output_path)
}
