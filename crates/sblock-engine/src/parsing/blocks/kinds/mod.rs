pub mod code_fence;

pub use code_fence::{CodeFence, FenceKind, FenceSig};
