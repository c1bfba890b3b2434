use xi_rope::Rope;

use crate::parsing::{blocks::Node, rope::span::Span};

/// Panics if the tree violates a structural invariant.
pub fn check(rope: &Rope, nodes: &[Node]) {
    check_level(nodes, Span::new(0, rope.len()));
}

fn check_level(nodes: &[Node], parent: Span) {
    let mut prev_end = parent.start;
    for node in nodes {
        let span = node.span();
        assert!(
            span.start <= span.end && parent.contains(span),
            "node span {span:?} escapes its parent content {parent:?}"
        );
        assert!(
            span.start >= prev_end,
            "node span {span:?} overlaps previous sibling ending at {prev_end}"
        );
        prev_end = span.end;

        if let Node::Block(b) = node {
            assert!(
                b.span.contains(b.content_span),
                "content span {:?} not contained in block span {:?}",
                b.content_span,
                b.span
            );
            assert!(!b.block_type.is_empty(), "block type is empty");
            assert_ne!(b.block_type, "end", "reserved block type");
            check_level(&b.children, b.content_span);
        }
    }
}
