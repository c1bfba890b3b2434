use std::fmt::{self, Write as _};

use xi_rope::Rope;

use crate::parsing::{
    ParsedDoc,
    blocks::{Node, Param},
    rope::slice::preview,
};

/// Stable, comparable view of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snap {
    pub nodes: Vec<NodeSnap>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSnap {
    /// `Markdown` or `Block(<type>)`.
    pub kind: String,
    pub span: (usize, usize),
    /// Params rendered as `key=value` / `value`.
    pub params: Vec<String>,
    /// Preview of the node's source (truncated for readability).
    pub text: String,
    pub terminated: bool,
    pub children: Vec<NodeSnap>,
}

pub fn normalize(rope: &Rope, doc: &ParsedDoc) -> Snap {
    Snap {
        nodes: doc.nodes.iter().map(|n| normalize_node(rope, n)).collect(),
        warnings: doc.warnings.iter().map(|w| w.to_string()).collect(),
    }
}

fn normalize_node(rope: &Rope, node: &Node) -> NodeSnap {
    match node {
        Node::Markdown(span) => NodeSnap {
            kind: "Markdown".into(),
            span: (span.start, span.end),
            params: vec![],
            text: preview(rope, *span, 60),
            terminated: true,
            children: vec![],
        },
        Node::Block(b) => NodeSnap {
            kind: format!("Block({})", b.block_type),
            span: (b.span.start, b.span.end),
            params: b
                .params
                .iter()
                .map(|p| match p {
                    Param::Keyed { key, value } => format!("{key}={value:?}"),
                    Param::Positional { value } => format!("{value:?}"),
                })
                .collect(),
            text: preview(rope, b.span, 40),
            terminated: b.terminated,
            children: b.children.iter().map(|c| normalize_node(rope, c)).collect(),
        },
    }
}

impl fmt::Display for Snap {
    /// Indented outline, one node per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for node in &self.nodes {
            write_node(&mut out, node, 0)?;
        }
        for w in &self.warnings {
            writeln!(out, "warning: {w}")?;
        }
        f.write_str(out.trim_end())
    }
}

fn write_node(out: &mut String, node: &NodeSnap, depth: usize) -> fmt::Result {
    write!(
        out,
        "{}{} {}..{}",
        "  ".repeat(depth),
        node.kind,
        node.span.0,
        node.span.1
    )?;
    if !node.params.is_empty() {
        write!(out, " [{}]", node.params.join(" "))?;
    }
    if !node.terminated {
        out.push_str(" (unterminated)");
    }
    if node.children.is_empty() {
        write!(out, " \"{}\"", node.text)?;
    }
    out.push('\n');
    for child in &node.children {
        write_node(out, child, depth + 1)?;
    }
    Ok(())
}
