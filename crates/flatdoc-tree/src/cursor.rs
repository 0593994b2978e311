//! The flat pre-order cursor.

use std::fmt;
use std::ptr;

use flatdoc_core::{TextSpan, Token, TokenKind};

/// Copyable view of one token in a pre-order token slice.
///
/// A cursor is either valid (pointing at a token) or null. Navigation
/// that lands past the end of the backing slice yields the null cursor;
/// no other bounds are checked, so a cursor can step from the last child
/// of a container onto the container's next sibling. Loops bound their
/// walk by the parent's size or use [`TreeCursor::children`].
#[derive(Clone, Copy)]
pub struct TreeCursor<'t> {
    tokens: &'t [Token],
    index: usize,
}

impl<'t> TreeCursor<'t> {
    /// Cursor at the root token (index 0); null for an empty slice.
    pub fn new(tokens: &'t [Token]) -> Self {
        Self::at(tokens, 0)
    }

    /// Cursor at `index`; null if `index` is outside `tokens`.
    pub fn at(tokens: &'t [Token], index: usize) -> Self {
        if index < tokens.len() {
            Self { tokens, index }
        } else {
            Self::null()
        }
    }

    /// The null cursor.
    pub const fn null() -> Self {
        Self {
            tokens: &[],
            index: 0,
        }
    }

    /// Whether the cursor points at a token.
    pub fn is_valid(&self) -> bool {
        self.index < self.tokens.len()
    }

    /// The current token, or `None` when null.
    pub fn token(&self) -> Option<&'t Token> {
        self.tokens.get(self.index)
    }

    /// Position in the backing slice, or `None` when null.
    pub fn index(&self) -> Option<usize> {
        self.is_valid().then_some(self.index)
    }

    /// The backing token slice (empty when null).
    pub fn tokens(&self) -> &'t [Token] {
        self.tokens
    }

    /// Kind of the current token; `Undefined` when null.
    pub fn kind(&self) -> TokenKind {
        self.token().map_or(TokenKind::Undefined, |t| t.kind)
    }

    /// Number of descendant tokens; 0 when null.
    pub fn size(&self) -> usize {
        self.token().map_or(0, |t| t.size as usize)
    }

    /// Text span of the current token.
    pub fn span(&self) -> Option<TextSpan> {
        self.token().map(Token::span)
    }

    /// Whether the current token is an object.
    pub fn is_object(&self) -> bool {
        self.kind() == TokenKind::Object
    }

    /// Whether the current token is an array.
    pub fn is_array(&self) -> bool {
        self.kind() == TokenKind::Array
    }

    /// Whether the current token is a primitive.
    pub fn is_primitive(&self) -> bool {
        self.kind() == TokenKind::Primitive
    }

    /// Whether the current token is a string.
    pub fn is_string(&self) -> bool {
        self.kind() == TokenKind::String
    }

    /// The token immediately after this one.
    ///
    /// Only meaningful when `size() > 0`; on a leaf it lands on whatever
    /// follows. Null when that is past the end of the slice or when this
    /// cursor is null.
    pub fn first_child(&self) -> Self {
        if !self.is_valid() {
            return Self::null();
        }
        Self::at(self.tokens, self.index + 1)
    }

    /// The token following this one's whole subtree.
    pub fn next_sibling(&self) -> Self {
        match self.token() {
            Some(token) => Self::at(self.tokens, token.subtree_end(self.index)),
            None => Self::null(),
        }
    }

    /// Iterate over the immediate children of the current token.
    ///
    /// Stops at the end of this token's subtree, so it never walks onto
    /// the parent's next member.
    pub fn children(&self) -> Children<'t> {
        let end = self.token().map_or(0, |t| t.subtree_end(self.index));
        let next = if self.size() > 0 {
            self.first_child()
        } else {
            Self::null()
        };
        Children { next, end }
    }

    /// Extract the token text by terminating it in place.
    ///
    /// Writes a `0` byte at the token's end offset (when that offset lies
    /// inside `buffer`) and returns the bytes `[start, end)`. Each token
    /// should be extracted at most once per pass; the write clobbers the
    /// byte that follows the span, which for well-formed input is a quote
    /// or delimiter belonging to no other token's text.
    pub fn get_text<'b>(&self, buffer: &'b mut [u8]) -> Option<&'b [u8]> {
        let span = self.span()?;
        let range = span.range();
        if range.start > range.end || range.end > buffer.len() {
            return None;
        }
        if let Some(terminator) = buffer.get_mut(range.end) {
            *terminator = 0;
        }
        let buffer: &'b [u8] = buffer;
        buffer.get(range)
    }

    /// Borrow the token text without touching the input.
    pub fn text<'b>(&self, input: &'b [u8]) -> Option<&'b [u8]> {
        input.get(self.span()?.range())
    }

    /// Borrow the token text from a string input.
    ///
    /// `None` if the span does not fall on character boundaries.
    pub fn text_str<'b>(&self, input: &'b str) -> Option<&'b str> {
        input.get(self.span()?.range())
    }
}

impl Default for TreeCursor<'_> {
    fn default() -> Self {
        Self::null()
    }
}

impl PartialEq for TreeCursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self.token(), other.token()) {
            (Some(a), Some(b)) => ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Eq for TreeCursor<'_> {}

impl fmt::Debug for TreeCursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token() {
            Some(token) => f
                .debug_struct("TreeCursor")
                .field("index", &self.index)
                .field("token", token)
                .finish(),
            None => write!(f, "TreeCursor(null)"),
        }
    }
}

/// Iterator over the immediate children of a token.
///
/// Created by [`TreeCursor::children`].
#[derive(Clone, Debug)]
pub struct Children<'t> {
    next: TreeCursor<'t>,
    end: usize,
}

impl<'t> Iterator for Children<'t> {
    type Item = TreeCursor<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next.index()?;
        if index >= self.end {
            return None;
        }
        let current = self.next;
        self.next = current.next_sibling();
        Some(current)
    }
}
