use crate::parsing::rope::span::Span;

/// A single parameter token from a block's start line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// `key=value`, `key="value"` or `key='value'` (quotes stripped).
    Keyed { key: String, value: String },
    /// A bare or quoted token not bound to a key.
    Positional { value: String },
}

impl Param {
    pub fn keyed(key: impl Into<String>, value: impl Into<String>) -> Self {
        Param::Keyed {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn positional(value: impl Into<String>) -> Self {
        Param::Positional {
            value: value.into(),
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Param::Keyed { key, .. } => Some(key),
            Param::Positional { .. } => None,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Param::Keyed { value, .. } | Param::Positional { value } => value,
        }
    }
}

/// One custom block instance.
///
/// Created when a start line matches, filled while the block is on the
/// container stack, and sealed when its terminator line is consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockNode {
    /// Registry key of the extension that opened (and renders) this block.
    pub marker: &'static str,
    /// Lower-case block type, e.g. `info`, `grid`, `btn`.
    pub block_type: String,
    /// Parameters in source order.
    pub params: Vec<Param>,
    /// Nested content in source order.
    pub children: Vec<Node>,
    /// Start line through terminator line.
    pub span: Span,
    /// Lines between the start line and the terminator.
    pub content_span: Span,
    /// False when the block was implicitly closed at end of input.
    pub terminated: bool,
}

impl BlockNode {
    /// Positional parameter values in order.
    pub fn positional(&self) -> impl Iterator<Item = &str> {
        self.params.iter().filter_map(|p| match p {
            Param::Positional { value } => Some(value.as_str()),
            Param::Keyed { .. } => None,
        })
    }
}

/// A node of the parsed document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A run of consecutive lines handed to the Markdown engine as-is.
    Markdown(Span),
    /// A custom block.
    Block(BlockNode),
}

impl Node {
    pub fn span(&self) -> Span {
        match self {
            Node::Markdown(span) => *span,
            Node::Block(b) => b.span,
        }
    }

    /// Short label used in errors and tree output.
    pub fn kind_name(&self) -> String {
        match self {
            Node::Markdown(_) => "Markdown".to_string(),
            Node::Block(b) => format!("Block({}:{})", b.marker, b.block_type),
        }
    }
}
