//! WHERE-clause isolation

use regex::Regex;
use std::sync::LazyLock;

/// First WHERE clause, non-greedy up to GROUP BY / ORDER BY / end of text.
/// Dot-matches-newline so multi-line clauses are captured whole.
static WHERE_CLAUSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)WHERE\s+(.+?)(GROUP BY|ORDER BY|$)").unwrap());

/// Extract the WHERE clause body from a SQL statement.
///
/// Returns the trimmed clause content without the leading `WHERE` keyword,
/// or `None` when the statement has no WHERE clause.
pub fn extract_where(sql: &str) -> Option<String> {
    WHERE_CLAUSE_RE
        .captures(sql)
        .map(|caps| caps[1].trim().to_string())
}
