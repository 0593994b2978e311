//! The slot pool: bump allocation of uniform node records by handle.
//!
//! A [`SlotPool`] holds an optional buffer (`None` until `create`), a
//! capacity in slots, and a usage counter. Usage is the length of the
//! buffer's initialised prefix; slots are appended with `push` into
//! storage reserved up front, so an allocation never moves an existing
//! slot. Only [`SlotPool::shrink_to_fit`] may relocate the buffer, and
//! since callers hold [`SlotId`]s rather than references, no handle is
//! invalidated by it.

use std::mem;

use flatdoc_core::{Allocator, Slot, SlotCount, SlotId};

use crate::config::PoolConfig;

/// Fixed-capacity arena of [`Slot`] records.
///
/// Single-owner: the pool is not synchronised and is meant to be driven
/// by one parsing pass on one thread.
#[derive(Debug, Default)]
pub struct SlotPool {
    /// Backing storage. `len()` is the usage; the reserved room is at
    /// least `capacity` slots.
    slots: Option<Vec<Slot>>,
    /// Maximum number of slots this buffer may hold.
    capacity: SlotCount,
}

impl SlotPool {
    /// An empty pool with no buffer.
    pub const fn new() -> Self {
        Self {
            slots: None,
            capacity: 0,
        }
    }

    /// Build a pool and create its buffer from `config`.
    pub fn with_config<A: Allocator>(config: &PoolConfig, allocator: &A) -> Self {
        let mut pool = Self::new();
        pool.create(config.byte_capacity, allocator);
        pool
    }

    /// Acquire a buffer of `byte_capacity` bytes.
    ///
    /// Capacity is rounded down to whole slots. A zero hint leaves the
    /// pool empty without touching the allocator. If the allocator fails
    /// the pool also stays empty and every later `alloc_slot` returns
    /// `None`.
    ///
    /// # Panics
    ///
    /// Panics if the pool already holds a buffer.
    pub fn create<A: Allocator>(&mut self, byte_capacity: usize, allocator: &A) {
        assert!(
            self.slots.is_none(),
            "SlotPool::create called on a pool that already holds a buffer"
        );
        if byte_capacity == 0 {
            return;
        }
        match allocator.allocate::<Slot>(byte_capacity) {
            Ok(buffer) => {
                let requested = Self::bytes_to_slots(byte_capacity);
                let reserved = Self::reserved_slots(&buffer);
                if reserved < requested {
                    tracing::warn!(
                        requested,
                        reserved,
                        "allocator under-reserved; clamping capacity"
                    );
                }
                self.capacity = requested.min(reserved);
                self.slots = Some(buffer);
                tracing::debug!(byte_capacity, capacity = self.capacity, "slot pool created");
            }
            Err(err) => {
                tracing::warn!(byte_capacity, %err, "slot pool buffer allocation failed");
            }
        }
    }

    /// Release the buffer and return to the empty state.
    ///
    /// Safe to call on a pool that holds no buffer.
    pub fn destroy<A: Allocator>(&mut self, allocator: &A) {
        if let Some(buffer) = self.slots.take() {
            tracing::debug!(
                capacity = self.capacity,
                usage = buffer.len(),
                "slot pool destroyed"
            );
            allocator.deallocate(buffer);
        }
        self.capacity = 0;
    }

    /// Reduce the buffer to exactly the slots in use.
    ///
    /// Slot contents and handles below `usage()` are preserved; references
    /// obtained from `get_slot` before the call are not. If the allocator
    /// refuses, the pool keeps its current buffer and capacity.
    pub fn shrink_to_fit<A: Allocator>(&mut self, allocator: &A) {
        let Some(buffer) = self.slots.as_mut() else {
            return;
        };
        let usage = buffer.len() as SlotCount;
        match allocator.reallocate(buffer, Self::slots_to_bytes(usage)) {
            Ok(()) => {
                let capacity = usage.min(Self::reserved_slots(buffer));
                tracing::debug!(from = self.capacity, to = capacity, "slot pool shrunk");
                self.capacity = capacity;
            }
            Err(err) => {
                tracing::warn!(usage, %err, "slot pool shrink refused; keeping buffer");
            }
        }
    }

    /// Allocate one default-constructed slot.
    ///
    /// Returns the new handle and the slot, or `None` when the pool has
    /// no buffer or is full. Runs in constant time.
    pub fn alloc_slot(&mut self) -> Option<(SlotId, &mut Slot)> {
        let capacity = self.capacity;
        let buffer = self.slots.as_mut()?;
        let index = buffer.len() as SlotCount;
        if index >= capacity {
            tracing::trace!(capacity, "slot pool exhausted");
            return None;
        }
        buffer.push(Slot::default());
        let slot = buffer.last_mut()?;
        Some((SlotId::new(index), slot))
    }

    /// Look up a slot by handle.
    ///
    /// `None` for the null handle and for handles not currently allocated.
    pub fn get_slot(&self, id: SlotId) -> Option<&Slot> {
        let index = id.index()?;
        self.slots.as_ref()?.get(index)
    }

    /// Look up a slot mutably by handle.
    pub fn get_slot_mut(&mut self, id: SlotId) -> Option<&mut Slot> {
        let index = id.index()?;
        self.slots.as_mut()?.get_mut(index)
    }

    /// Forget every allocation without releasing the buffer.
    ///
    /// Every handle issued before the call is dead afterwards: its index
    /// will be handed out again and resolve to the new slot.
    pub fn clear(&mut self) {
        if let Some(buffer) = self.slots.as_mut() {
            tracing::debug!(usage = buffer.len(), "slot pool cleared");
            // `Slot` is `Copy`, so this only resets the length.
            buffer.clear();
        }
    }

    /// Number of slots allocated.
    pub fn usage(&self) -> SlotCount {
        self.slots.as_ref().map_or(0, |b| b.len() as SlotCount)
    }

    /// Maximum number of slots the current buffer holds.
    pub fn capacity(&self) -> SlotCount {
        self.capacity
    }

    /// Slots still available.
    pub fn remaining(&self) -> SlotCount {
        self.capacity - self.usage()
    }

    /// Whether no slot is allocated.
    pub fn is_empty(&self) -> bool {
        self.usage() == 0
    }

    /// Whether a buffer is held.
    pub fn has_buffer(&self) -> bool {
        self.slots.is_some()
    }

    /// Bytes of slot storage reserved by the current capacity.
    pub fn memory_bytes(&self) -> usize {
        Self::slots_to_bytes(self.capacity)
    }

    /// Iterate over allocated slots with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Slot)> + '_ {
        self.slots
            .as_deref()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(i, slot)| (SlotId::new(i as SlotCount), slot))
    }

    /// Slots the buffer can hold without growing.
    fn reserved_slots(buffer: &Vec<Slot>) -> SlotCount {
        buffer.capacity().min(SlotId::MAX_SLOTS as usize) as SlotCount
    }

    /// Whole slots that fit in `bytes`, clamped to the addressable maximum.
    pub fn bytes_to_slots(bytes: usize) -> SlotCount {
        let slots = bytes / mem::size_of::<Slot>();
        slots.min(SlotId::MAX_SLOTS as usize) as SlotCount
    }

    /// Bytes occupied by `count` slots.
    pub fn slots_to_bytes(count: SlotCount) -> usize {
        count as usize * mem::size_of::<Slot>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::{BudgetAllocator, HeapAllocator};
    use flatdoc_core::{SlotContent, TextSpan};

    /// Reserves at most `slots` slots whatever the request.
    struct UnderReserving {
        slots: usize,
    }

    impl Allocator for UnderReserving {
        fn allocate<T>(&self, _bytes: usize) -> Result<Vec<T>, flatdoc_core::AllocError> {
            Ok(Vec::with_capacity(self.slots))
        }

        fn reallocate<T>(
            &self,
            buffer: &mut Vec<T>,
            _bytes: usize,
        ) -> Result<(), flatdoc_core::AllocError> {
            buffer.shrink_to(self.slots);
            Ok(())
        }

        fn deallocate<T>(&self, buffer: Vec<T>) {
            drop(buffer);
        }
    }

    fn pool_with(slots: SlotCount) -> SlotPool {
        SlotPool::with_config(&PoolConfig::for_slots(slots), &HeapAllocator)
    }

    #[test]
    fn new_pool_is_empty() {
        let mut pool = SlotPool::new();
        assert_eq!(pool.usage(), 0);
        assert_eq!(pool.capacity(), 0);
        assert!(!pool.has_buffer());
        assert!(pool.alloc_slot().is_none());
    }

    #[test]
    fn create_rounds_down_to_whole_slots() {
        let mut pool = SlotPool::new();
        pool.create(SlotPool::slots_to_bytes(3) + 1, &HeapAllocator);
        assert_eq!(pool.capacity(), 3);
        assert_eq!(pool.usage(), 0);
    }

    #[test]
    fn create_zero_is_lazy_empty() {
        let mut pool = SlotPool::new();
        pool.create(0, &HeapAllocator);
        assert!(!pool.has_buffer());
        assert!(pool.alloc_slot().is_none());
        // Still creatable afterwards: nothing was acquired.
        pool.create(SlotPool::slots_to_bytes(1), &HeapAllocator);
        assert_eq!(pool.capacity(), 1);
    }

    #[test]
    #[should_panic(expected = "already holds a buffer")]
    fn create_twice_panics() {
        let mut pool = pool_with(2);
        pool.create(64, &HeapAllocator);
    }

    #[test]
    fn failed_create_degrades_to_empty() {
        let alloc = BudgetAllocator::new(0);
        let mut pool = SlotPool::new();
        pool.create(SlotPool::slots_to_bytes(4), &alloc);
        assert!(!pool.has_buffer());
        assert_eq!(pool.capacity(), 0);
        assert!(pool.alloc_slot().is_none());
    }

    #[test]
    fn alloc_issues_sequential_handles() {
        let mut pool = pool_with(3);
        let ids: Vec<SlotId> = (0..3).map(|_| pool.alloc_slot().unwrap().0).collect();
        assert_eq!(ids, vec![SlotId::new(0), SlotId::new(1), SlotId::new(2)]);
        assert_eq!(pool.usage(), 3);
    }

    #[test]
    fn alloc_on_full_pool_returns_none() {
        let mut pool = pool_with(1);
        assert!(pool.alloc_slot().is_some());
        assert!(pool.alloc_slot().is_none());
        assert_eq!(pool.usage(), 1);
    }

    #[test]
    fn alloc_returns_default_slot() {
        let mut pool = pool_with(1);
        let (_, slot) = pool.alloc_slot().unwrap();
        assert_eq!(*slot, Slot::default());
    }

    #[test]
    fn alloc_does_not_move_existing_slots() {
        let mut pool = pool_with(8);
        let (_, first) = pool.alloc_slot().unwrap();
        let before = first as *const Slot;
        for _ in 0..7 {
            pool.alloc_slot().unwrap();
        }
        let after = pool.get_slot(SlotId::new(0)).unwrap() as *const Slot;
        assert_eq!(before, after);
    }

    #[test]
    fn get_null_is_none() {
        let mut pool = pool_with(1);
        pool.alloc_slot().unwrap();
        assert!(pool.get_slot(SlotId::NULL).is_none());
        assert!(pool.get_slot_mut(SlotId::NULL).is_none());
    }

    #[test]
    fn get_beyond_usage_is_none() {
        let mut pool = pool_with(4);
        pool.alloc_slot().unwrap();
        assert!(pool.get_slot(SlotId::new(1)).is_none());
    }

    #[test]
    fn writes_through_handle_are_visible() {
        let mut pool = pool_with(2);
        let (id, slot) = pool.alloc_slot().unwrap();
        slot.content = SlotContent::String(TextSpan::new(1, 4));
        assert_eq!(
            pool.get_slot(id).unwrap().content,
            SlotContent::String(TextSpan::new(1, 4))
        );
    }

    #[test]
    fn destroy_resets_and_is_idempotent() {
        let mut pool = pool_with(2);
        pool.alloc_slot().unwrap();
        pool.destroy(&HeapAllocator);
        assert_eq!(pool.usage(), 0);
        assert_eq!(pool.capacity(), 0);
        assert!(!pool.has_buffer());
        pool.destroy(&HeapAllocator);
        assert_eq!(pool.capacity(), 0);
    }

    #[test]
    fn destroy_then_create_behaves_like_fresh() {
        let mut pool = pool_with(2);
        pool.alloc_slot().unwrap();
        pool.alloc_slot().unwrap();
        pool.destroy(&HeapAllocator);
        pool.create(SlotPool::slots_to_bytes(2), &HeapAllocator);
        assert_eq!(pool.usage(), 0);
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.alloc_slot().unwrap().0, SlotId::new(0));
    }

    #[test]
    fn shrink_sets_capacity_to_usage() {
        let mut pool = pool_with(10);
        for i in 0..4 {
            let (_, slot) = pool.alloc_slot().unwrap();
            slot.content = SlotContent::Raw(TextSpan::new(i, i + 1));
        }
        pool.shrink_to_fit(&HeapAllocator);
        assert_eq!(pool.usage(), 4);
        assert_eq!(pool.capacity(), 4);
        for i in 0..4 {
            assert_eq!(
                pool.get_slot(SlotId::new(i)).unwrap().content,
                SlotContent::Raw(TextSpan::new(i, i + 1))
            );
        }
        assert!(pool.alloc_slot().is_none());
    }

    #[test]
    fn shrink_on_empty_pool_is_noop() {
        let mut pool = SlotPool::new();
        pool.shrink_to_fit(&HeapAllocator);
        assert_eq!(pool.capacity(), 0);
        assert!(!pool.has_buffer());
    }

    #[test]
    fn shrink_with_no_usage_leaves_zero_capacity() {
        let mut pool = pool_with(4);
        pool.shrink_to_fit(&HeapAllocator);
        assert_eq!(pool.capacity(), 0);
        assert!(pool.alloc_slot().is_none());
    }

    #[test]
    fn clear_keeps_capacity_and_reuses_index_zero() {
        let mut pool = pool_with(3);
        pool.alloc_slot().unwrap();
        pool.alloc_slot().unwrap();
        pool.clear();
        assert_eq!(pool.usage(), 0);
        assert_eq!(pool.capacity(), 3);
        assert!(pool.has_buffer());
        let (id, slot) = pool.alloc_slot().unwrap();
        assert_eq!(id, SlotId::new(0));
        assert_eq!(*slot, Slot::default());
    }

    #[test]
    fn iter_yields_allocated_slots_in_order() {
        let mut pool = pool_with(3);
        pool.alloc_slot().unwrap();
        pool.alloc_slot().unwrap();
        let ids: Vec<SlotId> = pool.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![SlotId::new(0), SlotId::new(1)]);
        assert_eq!(pool.remaining(), 1);
    }

    #[test]
    fn create_clamps_to_reserved_room() {
        let alloc = UnderReserving { slots: 4 };
        let mut pool = SlotPool::new();
        pool.create(SlotPool::slots_to_bytes(64), &alloc);
        let reserved = pool.slots.as_ref().unwrap().capacity() as SlotCount;
        assert!(pool.capacity() < 64);
        assert_eq!(pool.capacity(), reserved);

        let first = pool.alloc_slot().unwrap().1 as *const Slot;
        let mut granted = 1;
        while pool.alloc_slot().is_some() {
            granted += 1;
        }
        assert_eq!(granted, reserved);
        assert_eq!(pool.get_slot(SlotId::new(0)).unwrap() as *const Slot, first);
    }

    #[test]
    fn shrink_capacity_stays_within_buffer() {
        let mut pool = pool_with(8);
        for _ in 0..6 {
            pool.alloc_slot().unwrap();
        }
        pool.shrink_to_fit(&UnderReserving { slots: 4 });
        assert_eq!(pool.capacity(), 6);
        assert!(pool.alloc_slot().is_none());
    }

    #[test]
    fn memory_bytes_tracks_capacity() {
        let pool = pool_with(5);
        assert_eq!(pool.memory_bytes(), 5 * mem::size_of::<Slot>());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn handles_strictly_increase(capacity in 0u32..64, requests in 0usize..96) {
                let mut pool = pool_with(capacity);
                let mut last: Option<SlotId> = None;
                let mut granted = 0u32;
                for _ in 0..requests {
                    match pool.alloc_slot() {
                        Some((id, _)) => {
                            if let Some(prev) = last {
                                prop_assert!(id > prev);
                            }
                            last = Some(id);
                            granted += 1;
                        }
                        None => prop_assert_eq!(pool.usage(), capacity),
                    }
                }
                prop_assert_eq!(granted, capacity.min(requests as u32));
                prop_assert_eq!(pool.usage(), granted);
                prop_assert!(pool.usage() <= pool.capacity());
            }

            #[test]
            fn shrink_preserves_contents(capacity in 1u32..48, used in 0u32..48) {
                let used = used.min(capacity);
                let mut pool = pool_with(capacity);
                for i in 0..used {
                    let (_, slot) = pool.alloc_slot().unwrap();
                    slot.content = SlotContent::Raw(TextSpan::new(i, i));
                }
                pool.shrink_to_fit(&HeapAllocator);
                prop_assert_eq!(pool.capacity(), used);
                prop_assert_eq!(pool.usage(), used);
                for i in 0..used {
                    prop_assert_eq!(
                        pool.get_slot(SlotId::new(i)).unwrap().content,
                        SlotContent::Raw(TextSpan::new(i, i))
                    );
                }
            }
        }
    }
}
