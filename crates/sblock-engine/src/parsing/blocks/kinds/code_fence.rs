#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

/// What a line looks like when it starts with a fence run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSig {
    pub kind: FenceKind,
    /// Length of the fence run (at least 3).
    pub len: usize,
    /// True when nothing but whitespace follows the run (a valid closer).
    pub bare: bool,
}

/// Fenced code blocks are raw zones: no custom block starts inside them.
pub struct CodeFence;

impl CodeFence {
    pub const MIN_LEN: usize = 3;

    /// Detects a fence run at the start of `remainder` (already known to be
    /// indented less than 4 columns).
    pub fn sig(remainder: &str) -> Option<FenceSig> {
        let t = remainder.trim_start_matches(' ');
        let kind = match t.as_bytes().first()? {
            b'`' => FenceKind::Backticks,
            b'~' => FenceKind::Tildes,
            _ => return None,
        };
        let ch = if kind == FenceKind::Backticks { '`' } else { '~' };
        let len = t.chars().take_while(|&c| c == ch).count();
        if len < Self::MIN_LEN {
            return None;
        }
        let info = &t[len..];
        // A backtick fence's info string may not itself contain backticks.
        if kind == FenceKind::Backticks && info.contains('`') {
            return None;
        }
        Some(FenceSig {
            kind,
            len,
            bare: info.trim().is_empty(),
        })
    }

    /// Whether `sig` closes a fence opened by `open`.
    pub fn closes(open: FenceSig, sig: Option<FenceSig>) -> bool {
        matches!(sig, Some(s) if s.kind == open.kind && s.len >= open.len && s.bare)
    }
}
