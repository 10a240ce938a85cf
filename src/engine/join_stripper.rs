//! Join-predicate removal
//!
//! BI-generated SQL joins its dimension tables with plain equality predicates
//! in the WHERE clause. Those look exactly like business filters to a textual
//! matcher, so they are removed before the WHERE clause is inspected.

use regex::Regex;
use std::sync::LazyLock;

/// Table-to-table equality predicate, with its trailing AND when present:
/// `alias.column = alias.column [AND]`
static JOIN_PREDICATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b\w+\.\w+\s*=\s*\w+\.\w+\s*(AND\s*)?").unwrap());

/// Remove table-join equality predicates from a SQL string.
///
/// Each match is replaced with the empty string; input without join
/// predicates passes through unchanged.
pub fn strip_joins(sql: &str) -> String {
    JOIN_PREDICATE_RE.replace_all(sql, "").into_owned()
}
