//! # Rendering
//!
//! Post-order walk over a parsed document: Markdown runs go through
//! pulldown-cmark, blocks render their children first and then hand the
//! result to the extension that opened them.
//!
//! Every run is parsed on its own, so link reference definitions are
//! gathered from the whole document first. Reference links in any run
//! resolve against that table, with the first definition of a label in
//! document order taking precedence. Footnote definitions still resolve
//! only within their own run.
//!
//! Rendering is pure: the same [`ParsedDoc`] always renders to the same bytes.

mod block;

pub use block::{Attributes, RenderedBlock, Tag};

use std::collections::HashMap;

use pulldown_cmark::{BrokenLink, CowStr, Event, LinkType, Parser, Tag as CmarkTag, html};
use xi_rope::Rope;

use crate::{
    error::RenderError,
    extension::ExtensionRegistry,
    parsing::{ParsedDoc, blocks::Node, rope::slice_to_string},
};

/// Markdown engine features enabled for the runs between blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub tables: bool,
    pub strikethrough: bool,
    pub tasklists: bool,
    pub footnotes: bool,
    pub smart_punctuation: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            tasklists: true,
            footnotes: false,
            smart_punctuation: false,
        }
    }
}

impl RenderOptions {
    pub fn cmark_options(&self) -> pulldown_cmark::Options {
        use pulldown_cmark::Options;

        let mut opts = Options::empty();
        opts.set(Options::ENABLE_TABLES, self.tables);
        opts.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        opts.set(Options::ENABLE_TASKLISTS, self.tasklists);
        opts.set(Options::ENABLE_FOOTNOTES, self.footnotes);
        opts.set(Options::ENABLE_SMART_PUNCTUATION, self.smart_punctuation);
        opts
    }
}

/// Link reference definitions from every Markdown run, keyed by normalized
/// label. The first definition of a label in document order wins.
#[derive(Debug, Default)]
struct LinkRefs(HashMap<String, (String, String)>);

impl LinkRefs {
    fn collect(rope: &Rope, nodes: &[Node], cmark: pulldown_cmark::Options) -> Self {
        let mut refs = Self::default();
        refs.collect_nodes(rope, nodes, cmark);
        refs
    }

    fn collect_nodes(&mut self, rope: &Rope, nodes: &[Node], cmark: pulldown_cmark::Options) {
        for node in nodes {
            match node {
                Node::Markdown(span) => {
                    let text = slice_to_string(rope, *span);
                    let parser = Parser::new_ext(&text, cmark);
                    for (label, def) in parser.reference_definitions().iter() {
                        self.0.entry(normalize_label(label)).or_insert_with(|| {
                            let title = def.title.as_deref().unwrap_or_default();
                            (def.dest.to_string(), title.to_string())
                        });
                    }
                }
                Node::Block(b) => self.collect_nodes(rope, &b.children, cmark),
            }
        }
    }

    fn resolve(&self, label: &str) -> Option<(CowStr<'static>, CowStr<'static>)> {
        let (dest, title) = self.0.get(&normalize_label(label))?;
        Some((dest.clone().into(), title.clone().into()))
    }

    /// Points reference links a run resolved locally at the document-wide
    /// definition of their label.
    fn rebind<'e>(&self, event: Event<'e>) -> Event<'e> {
        match event {
            Event::Start(CmarkTag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) if is_reference(link_type) => {
                let (dest_url, title) = self.resolve(&id).unwrap_or((dest_url, title));
                Event::Start(CmarkTag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                })
            }
            Event::Start(CmarkTag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) if is_reference(link_type) => {
                let (dest_url, title) = self.resolve(&id).unwrap_or((dest_url, title));
                Event::Start(CmarkTag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                })
            }
            other => other,
        }
    }
}

fn is_reference(link_type: LinkType) -> bool {
    matches!(
        link_type,
        LinkType::Reference | LinkType::Collapsed | LinkType::Shortcut
    )
}

/// Case-insensitive label with inner whitespace collapsed.
fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

struct Renderer<'a> {
    rope: &'a Rope,
    registry: &'a ExtensionRegistry,
    cmark: pulldown_cmark::Options,
    links: LinkRefs,
}

impl Renderer<'_> {
    fn render_nodes(&self, nodes: &[Node], out: &mut String) -> Result<(), RenderError> {
        for node in nodes {
            self.render_node(node, out)?;
        }
        Ok(())
    }

    fn render_node(&self, node: &Node, out: &mut String) -> Result<(), RenderError> {
        match node {
            Node::Markdown(span) => {
                let text = slice_to_string(self.rope, *span);
                let resolve = |link: BrokenLink<'_>| self.links.resolve(&link.reference);
                let parser = Parser::new_with_broken_link_callback(&text, self.cmark, Some(resolve))
                    .map(|event| self.links.rebind(event));
                html::push_html(out, parser);
            }
            Node::Block(b) => {
                let mut children = String::new();
                self.render_nodes(&b.children, &mut children)?;

                let ext = self
                    .registry
                    .get(b.marker)
                    .ok_or_else(|| RenderError::UnregisteredMarker(b.marker.to_string()))?;
                ext.render(self.rope, node, &children)?.write_html(out);
            }
        }
        Ok(())
    }
}

/// Renders a parsed document to HTML.
pub fn render_document(
    rope: &Rope,
    doc: &ParsedDoc,
    registry: &ExtensionRegistry,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    let cmark = options.cmark_options();
    let renderer = Renderer {
        rope,
        registry,
        cmark,
        links: LinkRefs::collect(rope, &doc.nodes, cmark),
    };
    let mut out = String::with_capacity(rope.len() + rope.len() / 4);
    renderer.render_nodes(&doc.nodes, &mut out)?;
    Ok(out)
}
