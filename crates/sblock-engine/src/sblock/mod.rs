//! # SBlock: `::type params ... ::end`
//!
//! The built-in block extension. A block opens on a line of the form
//! `::<type> [params]`, holds arbitrary Markdown (including further blocks)
//! and closes on a line reading `::end`.
//!
//! ```markdown
//! ::card title="Card Title" bordered
//! Card body.
//! ::end
//! ```
//!
//! renders as
//!
//! ```html
//! <div class="s-block s-card" data-title="Card Title" data-bordered>
//! <p>Card body.</p>
//! </div>
//! ```
//!
//! ## Modules
//!
//! - **`start`**: start-line detection
//! - **`params`**: parameter tokenizer
//! - **`continuation`**: terminator detection
//! - **`render`**: node to [`RenderedBlock`], including the `grid` and `btn`
//!   special cases

pub mod continuation;
pub mod params;
pub mod render;
pub mod start;

use xi_rope::Rope;

use crate::{
    error::RenderError,
    extension::{BlockExtension, BlockStart, Continuation},
    parsing::blocks::{LineCursor, Node},
    render::RenderedBlock,
};

pub use params::parse_params;

pub struct SBlock;

impl SBlock {
    pub const MARKER: &'static str = "sblock";
    /// The terminator line, compared case-insensitively.
    pub const TERMINATOR: &'static str = "::end";
    /// Block type that can never be opened.
    pub const RESERVED: &'static str = "end";
}

impl BlockExtension for SBlock {
    fn marker(&self) -> &'static str {
        Self::MARKER
    }

    fn try_start(&self, cur: &mut LineCursor<'_>) -> Option<BlockStart> {
        start::detect_start(cur)
    }

    fn try_continue(&self, cur: &mut LineCursor<'_>) -> Continuation {
        continuation::check_continuation(cur)
    }

    fn render(
        &self,
        rope: &Rope,
        node: &Node,
        children: &str,
    ) -> Result<RenderedBlock, RenderError> {
        render::render_block(rope, node, children)
    }
}
