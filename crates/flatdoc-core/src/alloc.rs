//! The allocator interface a slot pool acquires its buffer through.
//!
//! A buffer is a `Vec<T>` holding no live elements whose capacity is at
//! least `bytes / size_of::<T>()`. The pool fills it with `push` and never
//! exceeds that count, so the storage never reallocates behind the pool's
//! back. Failures are reported as values; no allocator may abort the
//! process on exhaustion.

use std::mem;

use crate::error::AllocError;

/// Source of pool buffers.
///
/// The same allocator must be used for `create`, `shrink_to_fit` and
/// `destroy` of one pool.
pub trait Allocator {
    /// Acquire an empty buffer with room for at least
    /// `bytes / size_of::<T>()` values.
    fn allocate<T>(&self, bytes: usize) -> Result<Vec<T>, AllocError>;

    /// Resize `buffer` so it has room for `bytes / size_of::<T>()` values.
    ///
    /// Elements beyond the new count are dropped. On failure the buffer is
    /// left untouched.
    fn reallocate<T>(&self, buffer: &mut Vec<T>, bytes: usize) -> Result<(), AllocError>;

    /// Release a buffer previously returned by this allocator.
    fn deallocate<T>(&self, buffer: Vec<T>);
}

impl<A: Allocator> Allocator for &A {
    fn allocate<T>(&self, bytes: usize) -> Result<Vec<T>, AllocError> {
        (**self).allocate(bytes)
    }

    fn reallocate<T>(&self, buffer: &mut Vec<T>, bytes: usize) -> Result<(), AllocError> {
        (**self).reallocate(buffer, bytes)
    }

    fn deallocate<T>(&self, buffer: Vec<T>) {
        (**self).deallocate(buffer)
    }
}

/// Number of whole `T` values that fit in `bytes`.
///
/// Zero-sized types count one value per byte.
pub fn elements_for_bytes<T>(bytes: usize) -> usize {
    bytes / mem::size_of::<T>().max(1)
}

/// Bytes occupied by `count` values of `T`.
pub fn bytes_for_elements<T>(count: usize) -> usize {
    count.saturating_mul(mem::size_of::<T>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elements_round_down() {
        assert_eq!(elements_for_bytes::<u64>(17), 2);
        assert_eq!(elements_for_bytes::<u64>(7), 0);
        assert_eq!(elements_for_bytes::<()>(5), 5);
    }

    #[test]
    fn bytes_scale_with_element_size() {
        assert_eq!(bytes_for_elements::<u32>(3), 12);
        assert_eq!(bytes_for_elements::<u32>(usize::MAX), usize::MAX);
    }
}
