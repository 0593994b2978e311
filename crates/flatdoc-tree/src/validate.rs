//! One-pass structural check of a token stream.
//!
//! [`TreeCursor`](crate::TreeCursor) navigation is only meaningful on a
//! stream that honours the pre-order size invariant. Scanners that are
//! trusted can skip this; anything reading tokens from elsewhere should
//! run [`validate`] once before building on them.

use smallvec::SmallVec;

use flatdoc_core::{Token, TokenKind};

use crate::error::TokenStreamError;

/// Role of an open subtree while scanning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Frame {
    Object,
    Array,
    Key,
}

/// Check that `tokens` encodes exactly one well-formed tree over an input
/// of `input_len` bytes.
///
/// Rules: every span lies inside the input; every subtree nests inside its
/// parent; the root covers the whole stream; strings and primitives in
/// value position are leaves; object members are string keys holding
/// exactly one value.
pub fn validate(tokens: &[Token], input_len: usize) -> Result<(), TokenStreamError> {
    if tokens.is_empty() {
        return Err(TokenStreamError::Empty);
    }
    // (frame, index one past the subtree)
    let mut open: SmallVec<[(Frame, usize); 16]> = SmallVec::new();

    for (index, token) in tokens.iter().enumerate() {
        while open.last().is_some_and(|&(_, end)| end <= index) {
            open.pop();
        }

        if token.kind == TokenKind::Undefined {
            return Err(TokenStreamError::UndefinedToken { index });
        }
        if token.start > token.end || token.end as usize > input_len {
            return Err(TokenStreamError::SpanOutOfBounds {
                index,
                start: token.start,
                end: token.end,
                input_len,
            });
        }

        let parent = open.last().copied();
        if parent.is_none() && index > 0 {
            return Err(TokenStreamError::MultipleRoots { index });
        }
        let subtree_end = token.subtree_end(index);
        let limit = parent.map_or(tokens.len(), |(_, end)| end);
        if subtree_end > limit {
            return Err(TokenStreamError::SubtreeOverflow {
                index,
                subtree_end,
                limit,
            });
        }

        let frame = match (parent.map(|(frame, _)| frame), token.kind) {
            (Some(Frame::Object), TokenKind::String) => {
                // The key's only direct child is its value.
                let value_size = tokens.get(index + 1).map(|v| v.size as usize + 1);
                if value_size != Some(token.size as usize) {
                    return Err(TokenStreamError::KeyWithoutValue { index });
                }
                Frame::Key
            }
            (Some(Frame::Object), kind) => {
                return Err(TokenStreamError::MemberNotKey { index, kind });
            }
            (_, TokenKind::Object) => Frame::Object,
            (_, TokenKind::Array) => Frame::Array,
            (_, kind) => {
                if token.size != 0 {
                    return Err(TokenStreamError::LeafWithChildren { index, kind });
                }
                continue;
            }
        };
        if token.size > 0 {
            open.push((frame, subtree_end));
        }
    }

    tracing::trace!(tokens = tokens.len(), "token stream validated");
    Ok(())
}
