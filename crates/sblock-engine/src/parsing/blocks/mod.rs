//! # Block Parsing
//!
//! Two-phase, line-oriented block parsing with a container stack.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified into a
//!    `LineClass` holding local facts (indentation, blank status, fence
//!    signature).
//!
//! 2. **Block Construction** (`builder`): a `BlockBuilder` keeps a stack of
//!    open custom blocks, offers each line to the innermost block's
//!    continuation matcher, then to every registered start matcher, and
//!    otherwise collects it into a Markdown run.
//!
//! ## Modules
//!
//! - **`types`**: `Node`, `BlockNode`, `Param`
//! - **`kinds`**: syntax owned by the builder itself (`CodeFence`)
//! - **`cursor`**: `LineCursor` handed to extension matchers
//! - **`classify`**: `MarkdownLineClassifier` produces `LineClass` for each line
//! - **`containers`**: `ContainerStack` of open frames
//! - **`builder`**: `BlockBuilder` state machine
//!
//! ## Key Invariants
//!
//! - Nesting is a stack: a terminator closes exactly the innermost block
//! - No block starts on an indented line or inside a fenced code block
//! - The innermost block's continuation is checked before anything else, so a
//!   terminator closes its block even with a fence still open inside it
//! - All nodes store byte spans into the rope

pub mod builder;
pub mod classify;
pub mod containers;
pub mod cursor;
pub mod kinds;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LineClass, MarkdownLineClassifier};
pub use cursor::LineCursor;
pub use types::{BlockNode, Node, Param};
