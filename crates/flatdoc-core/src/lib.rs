//! Core types and traits for flatdoc.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the slot arena and the tree cursor: slot
//! handles, lexical tokens, the fixed-size node record, and the
//! allocator interface the arena acquires its buffer through.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod alloc;
pub mod error;
pub mod id;
pub mod slot;
pub mod token;

pub use alloc::Allocator;
pub use error::AllocError;
pub use id::{SlotCount, SlotId};
pub use slot::{Slot, SlotContent};
pub use token::{TextSpan, Token, TokenKind};
