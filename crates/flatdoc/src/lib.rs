//! flatdoc: arena-backed document trees over flat pre-order token streams.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the flatdoc sub-crates and adds [`DocumentBuilder`], the reference
//! driver that connects the two core pieces:
//!
//! - a [`SlotPool`](arena::SlotPool) that hands out node storage by integer
//!   handle from one fixed buffer, and
//! - a [`TreeCursor`](tree::TreeCursor) that navigates a scanner's flat
//!   token array using only each token's subtree size.
//!
//! # Quick start
//!
//! ```rust
//! use flatdoc::prelude::*;
//!
//! // Tokens for {"a":1,"b":[2,3]}, as a scanner would emit them.
//! let input = r#"{"a":1,"b":[2,3]}"#;
//! let tokens = vec![
//!     Token::object(0, 17, 6),
//!     Token::key(2, 3, 0),
//!     Token::primitive(5, 6),
//!     Token::key(8, 9, 2),
//!     Token::array(11, 16, 2),
//!     Token::primitive(12, 13),
//!     Token::primitive(14, 15),
//! ];
//!
//! // Navigate the tokens directly...
//! let root = TreeCursor::new(&tokens);
//! let b = root.first_child().next_sibling();
//! assert_eq!(b.text_str(input), Some("b"));
//!
//! // ...or materialise them into pool slots.
//! let config = DocumentConfig::new(PoolConfig::for_slots(8));
//! let doc = DocumentBuilder::new(config, &HeapAllocator)
//!     .build(&tokens, input.len())
//!     .unwrap();
//! assert_eq!(doc.len(), 5);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `flatdoc-core` | `SlotId`, `Token`, `Slot`, the `Allocator` trait |
//! | [`arena`] | `flatdoc-arena` | `SlotPool`, `PoolConfig`, stock allocators |
//! | [`tree`] | `flatdoc-tree` | `TreeCursor`, child iteration, stream validation |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod config;

/// Slot pool and allocators (`flatdoc-arena`).
pub use flatdoc_arena as arena;

/// Handles, tokens, slots and the allocator trait (`flatdoc-core`).
pub use flatdoc_core as types;

/// Token tree navigation and validation (`flatdoc-tree`).
pub use flatdoc_tree as tree;

pub use builder::{BuildError, Document, DocumentBuilder, SlotChildren};
pub use config::{DocumentConfig, DocumentConfigError};

/// Common imports for typical use.
pub mod prelude {
    pub use crate::builder::{BuildError, Document, DocumentBuilder};
    pub use crate::config::DocumentConfig;
    pub use flatdoc_arena::{BudgetAllocator, HeapAllocator, PoolConfig, SlotPool};
    pub use flatdoc_core::{Allocator, Slot, SlotContent, SlotId, TextSpan, Token, TokenKind};
    pub use flatdoc_tree::{validate, TreeCursor};
}
