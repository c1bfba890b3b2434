/// Indentation (in columns) at which a line becomes an indented code context.
pub const CODE_INDENT: usize = 4;

const TAB_STOP: usize = 4;

/// A cursor over a single line, handed to block extensions.
///
/// Operates over the line text (without its line ending) while tracking the
/// absolute byte position in the rope (via `base` offset). Matchers save the
/// cursor before trying to consume a line and restore it on failure.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    /// The line being scanned, line ending excluded.
    pub s: &'a str,
    /// Base offset in the rope (added to local index for absolute positions).
    pub base: usize,
    /// Current local index into `s`.
    pub i: usize,
}

impl<'a> LineCursor<'a> {
    /// Creates a new cursor at the start of `s` with the given base offset.
    pub fn new(s: &'a str, base: usize) -> Self {
        Self { s, base, i: 0 }
    }

    /// Returns the current absolute byte position (base + local index).
    pub fn pos(&self) -> usize {
        self.base + self.i
    }

    /// Returns true if the whole line has been consumed.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// The unconsumed remainder of the line.
    pub fn rest(&self) -> &'a str {
        self.s.get(self.i..).unwrap_or("")
    }

    /// Leading whitespace of the remainder, in columns (tabs expand to the next stop of 4).
    pub fn indent(&self) -> usize {
        let mut col = 0usize;
        for b in self.rest().bytes() {
            match b {
                b' ' => col += 1,
                b'\t' => col += TAB_STOP - col % TAB_STOP,
                _ => break,
            }
        }
        col
    }

    /// True when the remainder sits in an indented code context.
    pub fn is_indented(&self) -> bool {
        self.indent() >= CODE_INDENT
    }

    /// Snapshot of the cursor state, for [`restore`](Self::restore).
    pub fn save(&self) -> Self {
        self.clone()
    }

    pub fn restore(&mut self, saved: Self) {
        *self = saved;
    }

    /// Advances by `n` bytes, clamped to the end of the line.
    pub fn advance(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }

    /// Consumes the rest of the line.
    pub fn advance_to_end(&mut self) {
        self.i = self.s.len();
    }
}
