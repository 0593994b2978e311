//! Tree navigation over flat pre-order token streams.
//!
//! A scanner emits tokens in pre-order, each recording how many
//! descendants follow it. That single count is enough to recover the
//! tree: the first child of token `i` is `i + 1`, and its next sibling is
//! `i + 1 + size`. [`TreeCursor`] is a copyable view over the token slice
//! that navigates with exactly this arithmetic and stores no links.
//!
//! ```text
//! { "a": 1, "b": [2, 3] }
//!
//! index:  0       1     2    3     4      5    6
//! token:  object  "a"   1    "b"   array  2    3
//! size:   6       1     0    3     2      0    0
//!
//! first_child(0) = 1      next_sibling(1) = 1 + 1 + 1 = 3
//! next_sibling(3) = 7 ─► off the end ─► null
//! ```
//!
//! The cursor trusts the size invariant. [`validate`] checks it once at
//! the scanner boundary for callers that receive tokens from an untrusted
//! source.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cursor;
pub mod error;
pub mod validate;

pub use cursor::{Children, TreeCursor};
pub use error::TokenStreamError;
pub use validate::validate;
