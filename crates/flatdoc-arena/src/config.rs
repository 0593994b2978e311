//! Pool configuration parameters.

use flatdoc_core::{SlotCount, SlotId};

use crate::error::ConfigError;
use crate::pool::SlotPool;

/// Configuration for a [`SlotPool`].
///
/// The capacity is expressed in bytes, the way a caller sizing memory for
/// a constrained target thinks about it; the pool rounds it down to whole
/// slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Size of the slot buffer in bytes.
    ///
    /// Default: [`PoolConfig::DEFAULT_BYTE_CAPACITY`]. Zero is valid and
    /// yields an empty pool that never allocates.
    pub byte_capacity: usize,
}

impl PoolConfig {
    /// Default buffer size: 1KB.
    pub const DEFAULT_BYTE_CAPACITY: usize = 1024;

    /// Config with the given byte capacity.
    pub fn new(byte_capacity: usize) -> Self {
        Self { byte_capacity }
    }

    /// Config sized to hold exactly `slots` slots.
    pub fn for_slots(slots: SlotCount) -> Self {
        Self::new(SlotPool::slots_to_bytes(slots))
    }

    /// Number of slots this config yields.
    pub fn slot_capacity(&self) -> SlotCount {
        SlotPool::bytes_to_slots(self.byte_capacity)
    }

    /// Check the config for values a pool cannot honour exactly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let slot_bytes = SlotPool::slots_to_bytes(1);
        if self.byte_capacity != 0 && self.byte_capacity < slot_bytes {
            return Err(ConfigError::CapacityBelowOneSlot {
                byte_capacity: self.byte_capacity,
                slot_bytes,
            });
        }
        if self.byte_capacity / slot_bytes > SlotId::MAX_SLOTS as usize {
            return Err(ConfigError::CapacityOverflow {
                byte_capacity: self.byte_capacity,
                max_slots: SlotId::MAX_SLOTS,
            });
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BYTE_CAPACITY)
    }
}
