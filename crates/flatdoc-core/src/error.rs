//! Error types shared across flatdoc crates.

use std::error::Error;
use std::fmt;

/// Failure reported by an [`Allocator`](crate::Allocator).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The underlying heap could not satisfy the request.
    OutOfMemory {
        /// Number of bytes requested.
        requested: usize,
    },
    /// The allocator's byte budget would be exceeded.
    BudgetExceeded {
        /// Number of bytes requested.
        requested: usize,
        /// Bytes still available under the budget.
        available: usize,
    },
    /// The allocator refuses every request.
    Refused,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory { requested } => {
                write!(f, "out of memory: requested {requested} bytes")
            }
            Self::BudgetExceeded {
                requested,
                available,
            } => {
                write!(
                    f,
                    "allocation budget exceeded: requested {requested} bytes, {available} bytes available"
                )
            }
            Self::Refused => write!(f, "allocator refused the request"),
        }
    }
}

impl Error for AllocError {}
