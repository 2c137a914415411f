//! Small text helpers shared by the query builder and the feed parser.

use regex::Regex;

/// Compiles a regex literal that is known to be valid.
///
/// Only used for `static` patterns; a bad pattern is a programming error caught
/// by the first test that touches it.
#[allow(clippy::panic)]
pub(crate) fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

/// Collapses every whitespace run (including newlines) into one space and trims.
#[must_use]
pub(crate) fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
