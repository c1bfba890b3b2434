//! # Snapshot Testing Support
//!
//! Utilities for inspecting and testing the parser.
//!
//! ## Modules
//!
//! - **`normalize`**: converts a parsed tree into a stable `Snap` with
//!   labels, spans and text previews, printable as an indented outline
//! - **`invariants`**: runtime checks for parser correctness (spans in
//!   bounds, children inside their parent's content, siblings ordered)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{NodeSnap, Snap, normalize};
