use std::sync::OnceLock;

use regex::Regex;

use crate::{extension::Continuation, parsing::blocks::LineCursor};

fn end_regex() -> &'static Regex {
    static END_REGEX: OnceLock<Regex> = OnceLock::new();
    END_REGEX.get_or_init(|| Regex::new(r"^::(?i-u:end)\s*$").expect("Invalid block end regex"))
}

/// Decides whether an open block continues past the cursor's line.
///
/// Indented lines always continue the block, even if they read `::end`.
/// A terminator line is consumed and never becomes block content.
pub fn check_continuation(cur: &mut LineCursor<'_>) -> Continuation {
    if cur.is_indented() {
        return Continuation::Continue;
    }
    if end_regex().is_match(cur.rest().trim_start()) {
        cur.advance_to_end();
        return Continuation::Finished;
    }
    Continuation::Continue
}
