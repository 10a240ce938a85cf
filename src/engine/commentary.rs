//! Commentary rendering
//!
//! Turns a [`CategorizationResult`] into the free-text review comment that
//! goes back onto the query row. The wording is fixed; downstream reviewers
//! key off these exact sentences.

use std::collections::HashMap;

use super::categorizer::CategorizationResult;

/// Lower-cased SQL filter name → human-readable label.
pub type DisplayNameMap = HashMap<String, String>;

/// Commentary body used when WHERE-clause extraction found nothing.
pub const NO_WHERE_CLAUSE: &str = "No WHERE clause found in the SQL query.";

fn display_name(display_names: &DisplayNameMap, filter: &str) -> String {
    display_names
        .get(&filter.to_lowercase())
        .cloned()
        .unwrap_or_else(|| filter.to_string())
}

fn push_present_lines(
    commentary: &mut String,
    result: &CategorizationResult,
    display_names: &DisplayNameMap,
) {
    for name in &result.present {
        let count = result.counts.get(name).copied().unwrap_or(1);
        let label = if count == 1 { "filter" } else { "filters" };
        commentary.push_str(&format!(
            "{} ({}): {} {}\n",
            display_name(display_names, name),
            name,
            count,
            label
        ));
    }
}

/// Compose the commentary string for one audited query.
///
/// `result` is `None` when the query had no WHERE clause; the body is then
/// the fixed [`NO_WHERE_CLAUSE`] sentence with no filter listing. The
/// `source_note` (a fixed per-report explanation) and `known_issue`
/// reference are appended in that order when present, in every case.
pub fn compose(
    result: Option<&CategorizationResult>,
    display_names: &DisplayNameMap,
    known_issue: Option<&str>,
    source_note: Option<&str>,
) -> String {
    let mut commentary = String::new();

    match result {
        Some(result) => {
            if result.absent.is_empty() {
                commentary.push_str(
                    "The customer is executing a query that includes all mandatory filters, \
                     detailed as follows.\n\n",
                );
                push_present_lines(&mut commentary, result, display_names);
            } else {
                commentary
                    .push_str("The customer is executing a query utilizing the following filters:\n\n");
                push_present_lines(&mut commentary, result, display_names);
                commentary.push_str(
                    "\nHowever, not all required filters are being used. The following filters \
                     are missing:\n",
                );
                for name in &result.absent {
                    commentary.push_str(&format!(
                        "{} ({})\n",
                        display_name(display_names, name),
                        name
                    ));
                }
            }

            if !result.extra_filters.is_empty() {
                commentary.push_str(
                    "\n\nApart from the mandatory filters, the customer is using the following \
                     additional filters:\n\n",
                );
                for (name, count) in &result.extra_filters {
                    commentary.push_str(&format!(
                        "{}: {} filters\n",
                        display_name(display_names, name),
                        count
                    ));
                }
            }
        }
        None => commentary.push_str(NO_WHERE_CLAUSE),
    }

    if let Some(note) = source_note {
        commentary.push('\n');
        commentary.push_str(note);
    }

    if let Some(reference) = known_issue {
        commentary.push_str(&format!(
            "\n\nNote: A similar issue has been documented on the PSR Confluence page \
             under PSR #{}.",
            reference
        ));
    }

    commentary
}
