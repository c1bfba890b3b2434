use xi_rope::Rope;

use super::span::Span;

/// A reference to a single line in the rope with its byte span.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// Byte span of this line in the rope (includes newline if present).
    pub span: Span,
    /// 1-based line number, used in warnings and errors.
    pub number: usize,
    /// The line text including its line ending.
    pub text: String,
}

impl LineRef {
    /// The line text with any trailing `\n` / `\r\n` removed.
    pub fn content(&self) -> &str {
        self.text.trim_end_matches(['\r', '\n'])
    }
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` to preserve newline characters so that consecutive line
/// spans tile the rope without gaps.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).enumerate().map(move |(idx, line)| {
        let start = offset;
        offset += line.len();
        LineRef {
            span: Span { start, end: offset },
            number: idx + 1,
            text: line.into_owned(),
        }
    })
}
