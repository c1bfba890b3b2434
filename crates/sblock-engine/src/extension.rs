//! # Block Extensions
//!
//! A block extension contributes three matchers to the block builder, keyed
//! by a marker string: a start matcher, a continuation matcher and a node
//! renderer. The [`ExtensionRegistry`] is filled once at start-up and only
//! read during a parse or render pass, so it can be shared across threads.

use xi_rope::Rope;

use crate::{
    error::RenderError,
    parsing::blocks::{LineCursor, Node, Param},
    render::RenderedBlock,
    sblock::SBlock,
};

/// A successful start-line match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockStart {
    pub block_type: String,
    pub params: Vec<Param>,
}

/// Result of offering a line to an open block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// The block stays open; the line belongs to it.
    Continue,
    /// The line terminated the block and was consumed.
    Finished,
}

pub trait BlockExtension: Send + Sync {
    /// Distinct key stored on every node this extension opens.
    fn marker(&self) -> &'static str;

    /// Tries to open a block on the cursor's line. On `None` the cursor must
    /// be left where it was.
    fn try_start(&self, cur: &mut LineCursor<'_>) -> Option<BlockStart>;

    /// Decides whether the innermost open block continues past this line.
    fn try_continue(&self, cur: &mut LineCursor<'_>) -> Continuation;

    /// Renders a block whose children are already rendered to `children`.
    fn render(&self, rope: &Rope, node: &Node, children: &str)
    -> Result<RenderedBlock, RenderError>;
}

/// Extensions in registration order; start matchers are tried in that order.
#[derive(Default)]
pub struct ExtensionRegistry {
    extensions: Vec<Box<dyn BlockExtension>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in `::type ... ::end` extension.
    pub fn with_defaults() -> Self {
        Self::new().with_extension(SBlock)
    }

    /// Adds an extension, replacing any existing one with the same marker.
    pub fn with_extension(mut self, ext: impl BlockExtension + 'static) -> Self {
        let ext: Box<dyn BlockExtension> = Box::new(ext);
        match self
            .extensions
            .iter()
            .position(|e| e.marker() == ext.marker())
        {
            Some(idx) => self.extensions[idx] = ext,
            None => self.extensions.push(ext),
        }
        self
    }

    pub fn get(&self, marker: &str) -> Option<&dyn BlockExtension> {
        self.extensions
            .iter()
            .find(|e| e.marker() == marker)
            .map(|e| &**e)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn BlockExtension> {
        self.extensions.iter().map(|e| &**e)
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl std::fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.extensions.iter().map(|e| e.marker()))
            .finish()
    }
}
