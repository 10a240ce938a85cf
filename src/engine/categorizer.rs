//! Mandatory-filter categorization
//!
//! Decides which mandatory filters a WHERE clause applies, how many items
//! each carries in an `IN (...)` list, and which non-mandatory filters use
//! large inclusion lists worth flagging.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Any `identifier IN (...)` construct; group 1 is the identifier,
/// group 2 the comma-separated item list.
static IN_LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\w+)\b\s+IN\s*\((.*?)\)").unwrap());

/// Non-mandatory IN lists at or below this size are not worth flagging.
const EXTRA_FILTER_THRESHOLD: usize = 10;

/// Outcome of evaluating one WHERE clause against a mandatory filter list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategorizationResult {
    /// Mandatory filters found in the clause, in mandatory-list order.
    pub present: Vec<String>,
    /// Mandatory filters not found, in mandatory-list order.
    pub absent: Vec<String>,
    /// IN-list item count per present filter (1 when there is no IN list).
    pub counts: HashMap<String, usize>,
    /// Non-mandatory filters using IN lists of more than ten items, in
    /// first-seen order. A repeated identifier keeps its position but takes
    /// the count of its last occurrence.
    pub extra_filters: Vec<(String, usize)>,
}

/// Categorize a WHERE clause against an ordered mandatory filter list.
///
/// Presence is a case-insensitive whole-word match, so a filter name that
/// only occurs inside a longer identifier does not count. Item counts come
/// from a literal comma split of the IN list; quoted values containing
/// commas over-count, which is a known limitation of the source data shape.
///
/// Pure function of its inputs; calling it twice yields identical results.
pub fn categorize(where_clause: &str, mandatory_filters: &[String]) -> CategorizationResult {
    let mut result = CategorizationResult::default();

    for name in mandatory_filters {
        let word_re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(name)))
            .expect("escaped filter name is a valid pattern");
        if !word_re.is_match(where_clause) {
            result.absent.push(name.clone());
            continue;
        }
        result.present.push(name.clone());

        let in_re = Regex::new(&format!(r"(?i){}\s+IN\s*\((.*?)\)", regex::escape(name)))
            .expect("escaped filter name is a valid pattern");
        let count = in_re
            .captures(where_clause)
            .map(|caps| caps[1].split(',').count())
            .unwrap_or(1);
        result.counts.insert(name.clone(), count);
    }

    let mandatory_set: HashSet<String> =
        mandatory_filters.iter().map(|f| f.to_lowercase()).collect();
    for caps in IN_LIST_RE.captures_iter(where_clause) {
        let name = caps[1].to_lowercase();
        let count = caps[2].split(',').count();
        if mandatory_set.contains(&name) || count <= EXTRA_FILTER_THRESHOLD {
            continue;
        }
        // Last match wins for a repeated identifier
        match result.extra_filters.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = count,
            None => result.extra_filters.push((name, count)),
        }
    }

    result
}
