//! Lexical tokens produced by an external scanner.
//!
//! A token stream is a flat, pre-order sequence: the descendants of the
//! token at index `i` with subtree size `s` occupy exactly `[i + 1, i + 1 + s)`.
//! Object members are encoded as a string key token whose single direct
//! child is the member value.

use std::fmt;
use std::ops::Range;

/// Structural kind of a token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Placeholder for an unfilled token entry.
    #[default]
    Undefined,
    /// `{ ... }`
    Object,
    /// `[ ... ]`
    Array,
    /// Quoted string contents (without the quotes).
    String,
    /// Number, `true`, `false` or `null`.
    Primitive,
}

impl TokenKind {
    /// Whether tokens of this kind may have descendants as values.
    pub fn is_container(self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Undefined => "undefined",
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Primitive => "primitive",
        };
        f.write_str(name)
    }
}

/// Half-open byte range `[start, end)` into the input buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextSpan {
    /// First byte of the text.
    pub start: u32,
    /// One past the last byte of the text.
    pub end: u32,
}

impl TextSpan {
    /// Create a span. `start` must not exceed `end`.
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "inverted span {start}..{end}");
        Self { start, end }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) as usize
    }

    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The span as a `usize` range for slicing.
    pub fn range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

/// One entry of a flat pre-order token stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Token {
    /// Structural kind.
    pub kind: TokenKind,
    /// Start offset of the token text in the input.
    pub start: u32,
    /// End offset (exclusive) of the token text in the input.
    pub end: u32,
    /// Number of descendant tokens, not counting this one.
    pub size: u32,
}

impl Token {
    /// Create a token.
    pub fn new(kind: TokenKind, start: u32, end: u32, size: u32) -> Self {
        Self {
            kind,
            start,
            end,
            size,
        }
    }

    /// An object token spanning `start..end` with `size` descendants.
    pub fn object(start: u32, end: u32, size: u32) -> Self {
        Self::new(TokenKind::Object, start, end, size)
    }

    /// An array token spanning `start..end` with `size` descendants.
    pub fn array(start: u32, end: u32, size: u32) -> Self {
        Self::new(TokenKind::Array, start, end, size)
    }

    /// A string value token (no descendants).
    pub fn string(start: u32, end: u32) -> Self {
        Self::new(TokenKind::String, start, end, 0)
    }

    /// An object member key whose value subtree has `value_size` descendants.
    pub fn key(start: u32, end: u32, value_size: u32) -> Self {
        Self::new(TokenKind::String, start, end, value_size + 1)
    }

    /// A primitive token (no descendants).
    pub fn primitive(start: u32, end: u32) -> Self {
        Self::new(TokenKind::Primitive, start, end, 0)
    }

    /// The text span of this token.
    ///
    /// Not checked: a malformed token yields an inverted span.
    pub fn span(&self) -> TextSpan {
        TextSpan {
            start: self.start,
            end: self.end,
        }
    }

    /// Index one past the last descendant of the token at `index`.
    pub fn subtree_end(&self, index: usize) -> usize {
        index + 1 + self.size as usize
    }
}
