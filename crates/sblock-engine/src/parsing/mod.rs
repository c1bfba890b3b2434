pub mod blocks;
pub mod rope;
pub mod snapshot;

#[cfg(test)]
mod tests;

use xi_rope::Rope;

use crate::{
    error::{ParseError, ParseWarning},
    extension::ExtensionRegistry,
};
use blocks::{BlockBuilder, MarkdownLineClassifier, Node};
use rope::lines_with_spans;

/// Limits the block builder enforces on a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of simultaneously open custom blocks.
    pub max_nesting_depth: usize,
    /// Maximum document size in bytes.
    pub max_input_bytes: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: 32,
            max_input_bytes: 8 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDoc {
    pub nodes: Vec<Node>,
    pub warnings: Vec<ParseWarning>,
}

pub fn parse_document(
    rope: &Rope,
    registry: &ExtensionRegistry,
    options: &ParseOptions,
) -> Result<ParsedDoc, ParseError> {
    if rope.len() > options.max_input_bytes {
        log::warn!(
            "rejecting document of {} bytes (limit {})",
            rope.len(),
            options.max_input_bytes
        );
        return Err(ParseError::InputTooLarge {
            len: rope.len(),
            limit: options.max_input_bytes,
        });
    }

    let classifier = MarkdownLineClassifier;
    let mut builder = BlockBuilder::new(registry, *options);

    for lr in lines_with_spans(rope) {
        let lc = classifier.classify(&lr);
        builder.push(&lc)?;
    }

    let (nodes, warnings) = builder.finish();
    Ok(ParsedDoc { nodes, warnings })
}
