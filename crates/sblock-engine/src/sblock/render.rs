use std::sync::OnceLock;

use regex::{Captures, Regex};
use xi_rope::Rope;

use crate::{
    error::RenderError,
    parsing::{
        blocks::{BlockNode, Node, Param},
        rope::slice_to_string,
    },
    render::{RenderedBlock, Tag},
};

use super::SBlock;

/// Default column count for a `grid` without a positional parameter.
const DEFAULT_GRID_COLS: &str = "2";

fn flag_regex() -> &'static Regex {
    static FLAG_REGEX: OnceLock<Regex> = OnceLock::new();
    FLAG_REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z0-9\-_]+$").expect("Invalid flag regex"))
}

fn link_regex() -> &'static Regex {
    static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    LINK_REGEX.get_or_init(|| {
        Regex::new(r"^\[([^\]]+)\]\(([^)]+)\)$").expect("Invalid link token regex")
    })
}

/// Renders an SBlock node whose children are already rendered.
pub fn render_block(
    rope: &Rope,
    node: &Node,
    children: &str,
) -> Result<RenderedBlock, RenderError> {
    let block = match node {
        Node::Block(b) if b.marker == SBlock::MARKER => b,
        other => {
            return Err(RenderError::InvalidNodeType {
                expected: SBlock::MARKER,
                found: other.kind_name(),
            });
        }
    };

    let mut out = RenderedBlock::new(Tag::Div, children);
    out.attributes
        .set("class", format!("s-block s-{}", block.block_type));

    let mut positional_idx = 0usize;
    for param in &block.params {
        match param {
            Param::Keyed { key, value } => {
                out.attributes.set(format!("data-{key}"), value.as_str());
            }
            Param::Positional { value } => {
                let (name, value) = positional_attribute(positional_idx, value);
                out.attributes.set(name, value);
                positional_idx += 1;
            }
        }
    }

    match block.block_type.as_str() {
        "grid" if !block.params.is_empty() => {
            let cols = block.positional().next().unwrap_or(DEFAULT_GRID_COLS);
            out.attributes.set("style", format!("--cols: {cols}"));
        }
        "btn" => apply_button(rope, block, children, &mut out),
        _ => {}
    }

    Ok(out)
}

/// Flag-like values become `data-<value>`; anything else `data-arg-<idx>`.
fn positional_attribute(idx: usize, value: &str) -> (String, &str) {
    if flag_regex().is_match(value) {
        (format!("data-{value}"), "")
    } else {
        (format!("data-arg-{idx}"), value)
    }
}

/// Turns a button into a link using the first `[text](url)` positional
/// parameter, or failing that a body made of nothing but such a token.
fn apply_button(rope: &Rope, block: &BlockNode, children: &str, out: &mut RenderedBlock) {
    for (idx, value) in block.positional().enumerate() {
        let Some(caps) = link_regex().captures(value) else {
            continue;
        };
        let (name, _) = positional_attribute(idx, value);
        out.attributes.remove(&name);
        out.attributes.remove(&format!("data-{value}"));

        let text = link_to_anchor(&caps, out);
        if children.trim().is_empty() {
            out.inner = html_escape::encode_text(text).into_owned();
        }
        return;
    }

    if let [Node::Markdown(span)] = block.children.as_slice() {
        let body = slice_to_string(rope, *span);
        if let Some(caps) = link_regex().captures(body.trim()) {
            let text = link_to_anchor(&caps, out);
            out.inner = html_escape::encode_text(text).into_owned();
        }
    }
}

fn link_to_anchor<'c>(caps: &Captures<'c>, out: &mut RenderedBlock) -> &'c str {
    out.tag = Tag::Anchor;
    out.attributes.set("href", &caps[2]);
    caps.get(1).map_or("", |m| m.as_str())
}
