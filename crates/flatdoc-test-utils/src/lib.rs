//! Test utilities for flatdoc development.
//!
//! Provides instrumented allocators ([`SpyingAllocator`],
//! [`FailingAllocator`]) that record or refuse buffer requests, and token
//! fixtures for sample documents in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::{Cell, RefCell};

use flatdoc_core::alloc::elements_for_bytes;
use flatdoc_core::{AllocError, Allocator};

/// One call observed by a [`SpyingAllocator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocEvent {
    Allocate(usize),
    AllocateFail(usize),
    Reallocate(usize),
    ReallocateFail(usize),
    Deallocate,
}

/// Heap allocator that logs every call and can be told to fail.
///
/// Use [`fail_next`](SpyingAllocator::fail_next) to make the next request
/// report [`AllocError::Refused`].
#[derive(Debug, Default)]
pub struct SpyingAllocator {
    log: RefCell<Vec<AllocEvent>>,
    fail_next: Cell<bool>,
}

impl SpyingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `allocate` or `reallocate` fail.
    pub fn fail_next(&self) {
        self.fail_next.set(true);
    }

    /// Calls observed so far, oldest first.
    pub fn log(&self) -> Vec<AllocEvent> {
        self.log.borrow().clone()
    }

    /// Forget recorded calls.
    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }

    fn record(&self, event: AllocEvent) {
        self.log.borrow_mut().push(event);
    }
}

impl Allocator for SpyingAllocator {
    fn allocate<T>(&self, bytes: usize) -> Result<Vec<T>, AllocError> {
        if self.fail_next.replace(false) {
            self.record(AllocEvent::AllocateFail(bytes));
            return Err(AllocError::Refused);
        }
        self.record(AllocEvent::Allocate(bytes));
        Ok(Vec::with_capacity(elements_for_bytes::<T>(bytes)))
    }

    fn reallocate<T>(&self, buffer: &mut Vec<T>, bytes: usize) -> Result<(), AllocError> {
        if self.fail_next.replace(false) {
            self.record(AllocEvent::ReallocateFail(bytes));
            return Err(AllocError::Refused);
        }
        self.record(AllocEvent::Reallocate(bytes));
        let count = elements_for_bytes::<T>(bytes);
        buffer.truncate(count);
        if count > buffer.capacity() {
            buffer.reserve_exact(count - buffer.len());
        } else {
            buffer.shrink_to(count);
        }
        Ok(())
    }

    fn deallocate<T>(&self, buffer: Vec<T>) {
        self.record(AllocEvent::Deallocate);
        drop(buffer);
    }
}

/// Allocator that refuses every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingAllocator;

impl Allocator for FailingAllocator {
    fn allocate<T>(&self, _bytes: usize) -> Result<Vec<T>, AllocError> {
        Err(AllocError::Refused)
    }

    fn reallocate<T>(&self, _buffer: &mut Vec<T>, _bytes: usize) -> Result<(), AllocError> {
        Err(AllocError::Refused)
    }

    fn deallocate<T>(&self, buffer: Vec<T>) {
        drop(buffer);
    }
}
