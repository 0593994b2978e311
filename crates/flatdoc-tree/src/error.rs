//! Token stream validation errors.

use std::error::Error;
use std::fmt;

use flatdoc_core::TokenKind;

/// A violation of the pre-order token stream invariants.
///
/// Every variant carries the index of the offending token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenStreamError {
    /// The stream holds no tokens.
    Empty,
    /// A token that was never filled in by the scanner.
    UndefinedToken {
        /// Token index.
        index: usize,
    },
    /// A token's text span is inverted or lies outside the input.
    SpanOutOfBounds {
        /// Token index.
        index: usize,
        /// Span start.
        start: u32,
        /// Span end.
        end: u32,
        /// Input length in bytes.
        input_len: usize,
    },
    /// A subtree extends past its parent or past the end of the stream.
    SubtreeOverflow {
        /// Token index.
        index: usize,
        /// Index one past the claimed subtree.
        subtree_end: usize,
        /// Index one past the enclosing subtree (or the stream).
        limit: usize,
    },
    /// A token follows the root's subtree.
    MultipleRoots {
        /// Token index.
        index: usize,
    },
    /// A leaf value claims descendants.
    LeafWithChildren {
        /// Token index.
        index: usize,
        /// The leaf's kind.
        kind: TokenKind,
    },
    /// An object member that is not a string key.
    MemberNotKey {
        /// Token index.
        index: usize,
        /// The member's kind.
        kind: TokenKind,
    },
    /// A key that does not hold exactly one value.
    KeyWithoutValue {
        /// Token index.
        index: usize,
    },
}

impl fmt::Display for TokenStreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "token stream is empty"),
            Self::UndefinedToken { index } => write!(f, "token {index} is undefined"),
            Self::SpanOutOfBounds {
                index,
                start,
                end,
                input_len,
            } => {
                write!(
                    f,
                    "token {index} spans {start}..{end}, outside input of {input_len} bytes"
                )
            }
            Self::SubtreeOverflow {
                index,
                subtree_end,
                limit,
            } => {
                write!(
                    f,
                    "token {index} subtree ends at {subtree_end}, past its limit {limit}"
                )
            }
            Self::MultipleRoots { index } => {
                write!(f, "token {index} follows the root subtree")
            }
            Self::LeafWithChildren { index, kind } => {
                write!(f, "{kind} token {index} has descendants")
            }
            Self::MemberNotKey { index, kind } => {
                write!(f, "object member {index} is a {kind}, expected a string key")
            }
            Self::KeyWithoutValue { index } => {
                write!(f, "key {index} does not hold exactly one value")
            }
        }
    }
}

impl Error for TokenStreamError {}
