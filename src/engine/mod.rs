//! WHERE-clause filter extraction and categorization
//!
//! The engine is a pure pipeline over SQL text: join predicates are stripped
//! first so they cannot be mistaken for business filters, the WHERE clause is
//! isolated, mandatory filters are categorized against it, and the result is
//! rendered into commentary. Everything here operates on in-memory strings;
//! file and batch handling live in the `stores` and `audit` modules.

mod categorizer;
mod commentary;
mod join_stripper;
mod where_clause;

pub use categorizer::{categorize, CategorizationResult};
pub use commentary::{compose, DisplayNameMap, NO_WHERE_CLAUSE};
pub use join_stripper::strip_joins;
pub use where_clause::extract_where;
