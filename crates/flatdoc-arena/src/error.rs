//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors from validating a [`PoolConfig`](crate::PoolConfig).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A non-zero byte capacity too small to hold a single slot.
    CapacityBelowOneSlot {
        /// The configured byte capacity.
        byte_capacity: usize,
        /// Size of one slot in bytes.
        slot_bytes: usize,
    },
    /// A byte capacity addressing more slots than a handle can encode.
    CapacityOverflow {
        /// The configured byte capacity.
        byte_capacity: usize,
        /// Largest number of slots a pool can address.
        max_slots: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityBelowOneSlot {
                byte_capacity,
                slot_bytes,
            } => {
                write!(
                    f,
                    "byte capacity {byte_capacity} is smaller than one slot ({slot_bytes} bytes)"
                )
            }
            Self::CapacityOverflow {
                byte_capacity,
                max_slots,
            } => {
                write!(
                    f,
                    "byte capacity {byte_capacity} exceeds the addressable maximum of {max_slots} slots"
                )
            }
        }
    }
}

impl Error for ConfigError {}
