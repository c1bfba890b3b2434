use std::sync::OnceLock;

use regex::Regex;

use crate::{extension::BlockStart, parsing::blocks::LineCursor};

use super::{SBlock, params::parse_params};

fn start_regex() -> &'static Regex {
    static START_REGEX: OnceLock<Regex> = OnceLock::new();
    START_REGEX.get_or_init(|| {
        Regex::new(r"^::([A-Za-z0-9\-]+)(?:\s+(.*))?$").expect("Invalid block start regex")
    })
}

/// Recognizes `::<type> [params]` opening lines.
///
/// Indented lines never open a block. `::end` (with or without trailing
/// params) is never a start. On success the whole line is consumed; on
/// failure the cursor is restored.
pub fn detect_start(cur: &mut LineCursor<'_>) -> Option<BlockStart> {
    if cur.is_indented() {
        return None;
    }

    let saved = cur.save();
    let line = cur.rest().trim();
    if line.eq_ignore_ascii_case(SBlock::TERMINATOR) {
        return None;
    }

    let Some(caps) = start_regex().captures(line) else {
        cur.restore(saved);
        return None;
    };

    let block_type = caps[1].to_ascii_lowercase();
    if block_type == SBlock::RESERVED {
        cur.restore(saved);
        return None;
    }

    let params = caps
        .get(2)
        .map(|m| parse_params(m.as_str()))
        .unwrap_or_default();

    cur.advance_to_end();
    Some(BlockStart { block_type, params })
}
