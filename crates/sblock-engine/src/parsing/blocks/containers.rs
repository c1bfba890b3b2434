use crate::{extension::BlockExtension, parsing::rope::span::Span};

use super::types::{BlockNode, Node, Param};

/// An open custom block on the container stack.
pub struct ContainerFrame<'r> {
    pub extension: &'r dyn BlockExtension,
    pub block_type: String,
    pub params: Vec<Param>,
    pub children: Vec<Node>,
    /// Span of the start line.
    pub start: Span,
    /// 1-based line number of the start line.
    pub line: usize,
}

impl ContainerFrame<'_> {
    /// Seals the frame into a node ending at `end`; content stops at `content_end`.
    pub fn into_node(self, content_end: usize, end: usize, terminated: bool) -> BlockNode {
        BlockNode {
            marker: self.extension.marker(),
            block_type: self.block_type,
            params: self.params,
            children: self.children,
            span: Span::new(self.start.start, end),
            content_span: Span::new(self.start.end, content_end.max(self.start.end)),
            terminated,
        }
    }
}

/// Nesting stack of open blocks above the document root.
///
/// Last opened, first closed: a terminator only ever closes the top frame.
#[derive(Default)]
pub struct ContainerStack<'r> {
    root: Vec<Node>,
    frames: Vec<ContainerFrame<'r>>,
}

impl<'r> ContainerStack<'r> {
    /// Number of open blocks.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn top(&self) -> Option<&ContainerFrame<'r>> {
        self.frames.last()
    }

    pub fn open(&mut self, frame: ContainerFrame<'r>) {
        self.frames.push(frame);
    }

    /// Children list of the innermost open container (or the root).
    pub fn current_children(&mut self) -> &mut Vec<Node> {
        match self.frames.last_mut() {
            Some(frame) => &mut frame.children,
            None => &mut self.root,
        }
    }

    /// Pops the top frame, if any, for the caller to seal.
    pub fn pop(&mut self) -> Option<ContainerFrame<'r>> {
        self.frames.pop()
    }

    /// Attaches a sealed block to whatever is now the innermost container.
    pub fn attach(&mut self, node: BlockNode) {
        self.current_children().push(Node::Block(node));
    }

    pub fn into_root(self) -> Vec<Node> {
        debug_assert!(self.frames.is_empty(), "open frames left on the stack");
        self.root
    }
}
