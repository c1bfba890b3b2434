use crate::parsing::rope::{lines::LineRef, span::Span};

use super::{
    cursor::{CODE_INDENT, LineCursor},
    kinds::{CodeFence, FenceSig},
};

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone)]
pub struct LineClass {
    /// Full byte span of this line in the rope (line ending included).
    pub line: Span,
    /// 1-based line number.
    pub number: usize,
    /// Line text with the line ending removed.
    pub text: String,
    /// Whether the line is blank (whitespace only).
    pub is_blank: bool,
    /// Leading whitespace in columns.
    pub indent: usize,
    /// If the line looks like a fence opener/closer.
    pub fence_sig: Option<FenceSig>,
}

impl LineClass {
    /// True when the line is in an indented code context.
    pub fn is_indented(&self) -> bool {
        self.indent >= CODE_INDENT
    }

    /// A fresh cursor over this line for extension matchers.
    pub fn cursor(&self) -> LineCursor<'_> {
        LineCursor::new(&self.text, self.line.start)
    }
}

/// Classifies individual lines for the block parsing phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line into a [`LineClass`].
    pub fn classify(&self, lr: &LineRef) -> LineClass {
        let text = lr.content();
        let indent = LineCursor::new(text, lr.span.start).indent();
        let fence_sig = if indent < CODE_INDENT {
            CodeFence::sig(text)
        } else {
            None
        };

        LineClass {
            line: lr.span,
            number: lr.number,
            text: text.to_string(),
            is_blank: text.trim().is_empty(),
            indent,
            fence_sig,
        }
    }
}
