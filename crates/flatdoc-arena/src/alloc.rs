//! Stock allocators.
//!
//! [`HeapAllocator`] serves buffers from the global heap and reports
//! exhaustion as [`AllocError::OutOfMemory`] rather than aborting.
//! [`BudgetAllocator`] layers a byte ceiling on top, for targets where the
//! document must fit a fixed memory budget.

use std::cell::Cell;
use std::mem;

use flatdoc_core::alloc::{bytes_for_elements, elements_for_bytes};
use flatdoc_core::{AllocError, Allocator};

/// Allocator backed by the global heap.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeapAllocator;

impl Allocator for HeapAllocator {
    fn allocate<T>(&self, bytes: usize) -> Result<Vec<T>, AllocError> {
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(elements_for_bytes::<T>(bytes))
            .map_err(|_| AllocError::OutOfMemory { requested: bytes })?;
        Ok(buffer)
    }

    fn reallocate<T>(&self, buffer: &mut Vec<T>, bytes: usize) -> Result<(), AllocError> {
        let count = elements_for_bytes::<T>(bytes);
        if count > buffer.capacity() {
            // `try_reserve_exact` counts from `len`, not from the capacity.
            let additional = count - buffer.len();
            return buffer
                .try_reserve_exact(additional)
                .map_err(|_| AllocError::OutOfMemory { requested: bytes });
        }
        buffer.truncate(count);
        buffer.shrink_to(count);
        Ok(())
    }

    fn deallocate<T>(&self, buffer: Vec<T>) {
        drop(buffer);
    }
}

/// Heap allocator that refuses requests beyond a byte budget.
///
/// Bytes are accounted by the capacity of the buffers handed out, so the
/// figure reported by [`BudgetAllocator::in_use`] matches what the heap
/// actually holds for this allocator.
#[derive(Debug)]
pub struct BudgetAllocator {
    budget: usize,
    in_use: Cell<usize>,
}

impl BudgetAllocator {
    /// Allocator limited to `budget` bytes outstanding.
    pub fn new(budget: usize) -> Self {
        Self {
            budget,
            in_use: Cell::new(0),
        }
    }

    /// The configured ceiling in bytes.
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Bytes currently held by live buffers.
    pub fn in_use(&self) -> usize {
        self.in_use.get()
    }

    /// Bytes still available under the budget.
    pub fn available(&self) -> usize {
        self.budget.saturating_sub(self.in_use.get())
    }

    fn held_bytes<T>(buffer: &Vec<T>) -> usize {
        if mem::size_of::<T>() == 0 {
            0
        } else {
            bytes_for_elements::<T>(buffer.capacity())
        }
    }
}

impl Allocator for BudgetAllocator {
    fn allocate<T>(&self, bytes: usize) -> Result<Vec<T>, AllocError> {
        let available = self.available();
        if bytes > available {
            return Err(AllocError::BudgetExceeded {
                requested: bytes,
                available,
            });
        }
        let buffer = HeapAllocator.allocate::<T>(bytes)?;
        self.in_use.set(self.in_use.get() + Self::held_bytes(&buffer));
        Ok(buffer)
    }

    fn reallocate<T>(&self, buffer: &mut Vec<T>, bytes: usize) -> Result<(), AllocError> {
        let old = Self::held_bytes(buffer);
        let available = self.budget.saturating_sub(self.in_use.get() - old);
        if bytes > available {
            return Err(AllocError::BudgetExceeded {
                requested: bytes,
                available,
            });
        }
        HeapAllocator.reallocate(buffer, bytes)?;
        self.in_use.set(self.in_use.get() - old + Self::held_bytes(buffer));
        Ok(())
    }

    fn deallocate<T>(&self, buffer: Vec<T>) {
        let held = Self::held_bytes(&buffer);
        self.in_use.set(self.in_use.get().saturating_sub(held));
        drop(buffer);
    }
}
