//! # sblock-engine
//!
//! Markdown with custom block containers:
//!
//! ```markdown
//! ::info
//! Some **Markdown** content.
//! ::end
//! ```
//!
//! Parsing builds a tree of [`Node`]s over byte spans of an [`xi_rope::Rope`];
//! rendering walks that tree, hands plain Markdown to pulldown-cmark and each
//! block to the [`BlockExtension`] that opened it.

pub mod error;
pub mod extension;
pub mod io;
pub mod parsing;
pub mod render;
pub mod sblock;

pub use error::{Error, ParseError, ParseWarning, RenderError};
pub use extension::{BlockExtension, BlockStart, Continuation, ExtensionRegistry};
pub use io::{IoError, read_document, write_html};
pub use parsing::{
    ParseOptions, ParsedDoc,
    blocks::{BlockNode, Node, Param},
    parse_document,
};
pub use render::{Attributes, RenderOptions, RenderedBlock, Tag, render_document};
pub use sblock::{SBlock, parse_params};

use xi_rope::Rope;

/// Parse and render settings for a single conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub parse: ParseOptions,
    pub render: RenderOptions,
}

/// Converts Markdown with `::type ... ::end` blocks to HTML using defaults.
pub fn to_html(input: &str) -> Result<String, Error> {
    to_html_with_options(input, &Options::default())
}

pub fn to_html_with_options(input: &str, options: &Options) -> Result<String, Error> {
    to_html_with_registry(input, &ExtensionRegistry::with_defaults(), options)
}

/// Converts using a caller-supplied set of block extensions.
pub fn to_html_with_registry(
    input: &str,
    registry: &ExtensionRegistry,
    options: &Options,
) -> Result<String, Error> {
    let rope = Rope::from(input);
    let doc = parse_document(&rope, registry, &options.parse)?;
    for w in &doc.warnings {
        log::debug!("{w}");
    }
    Ok(render_document(&rope, &doc, registry, &options.render)?)
}
