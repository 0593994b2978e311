//! Fixed-capacity slot arena for flatdoc document nodes.
//!
//! A [`SlotPool`] owns one contiguous buffer of uniform [`Slot`] records,
//! bump-allocates them in order, and hands each out as an integer
//! [`SlotId`]. The buffer is acquired exactly once per `create` and is only
//! ever relocated by an explicit `shrink_to_fit`.
//!
//! # Lifecycle
//!
//! ```text
//! empty ──create(bytes)──► holding buffer ──alloc_slot()×N──► usage = N
//!   ▲                          │    ▲                              │
//!   │                          │    └────────── clear() ───────────┤
//!   └──────── destroy() ───────┴──────── shrink_to_fit() ──────────┘
//!                                        (capacity = usage)
//! ```
//!
//! # Failure model
//!
//! There is no error path at runtime. An absent buffer, a refused
//! allocation, and an exhausted pool all surface as `None` from
//! [`SlotPool::alloc_slot`], so a caller can treat exhaustion as data.
//! Calling `create` twice without `destroy` is a programmer error and
//! panics.
//!
//! [`Slot`]: flatdoc_core::Slot
//! [`SlotId`]: flatdoc_core::SlotId

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod alloc;
pub mod config;
pub mod error;
pub mod pool;

// Public re-exports for the primary API surface.
pub use alloc::{BudgetAllocator, HeapAllocator};
pub use config::PoolConfig;
pub use error::ConfigError;
pub use pool::SlotPool;
