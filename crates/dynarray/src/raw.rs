//! Low-level slot storage for [`DynArray`](crate::DynArray).
//!
//! [`RawBuffer`] owns an allocation of `capacity` slots of `T` and nothing
//! else: it never reads, writes or drops elements. Whoever holds it is
//! responsible for tracking which slots are initialised. Dropping a
//! `RawBuffer` only returns the memory to the global allocator.
//!
//! Zero-sized element types and zero capacities never reach the allocator.

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use crate::error::{precondition_failed, ArrayError};

pub(crate) struct RawBuffer<T> {
    /// `None` iff `capacity == 0`. Dangling for zero-sized `T`.
    ptr: Option<NonNull<T>>,
    capacity: usize,
}

impl<T> RawBuffer<T> {
    /// A buffer with no slots and no allocation.
    pub(crate) const fn empty() -> Self {
        Self {
            ptr: None,
            capacity: 0,
        }
    }

    /// Allocate exactly `capacity` slots.
    ///
    /// Panics on layout overflow; calls [`alloc::handle_alloc_error`] if the
    /// allocator refuses.
    #[track_caller]
    pub(crate) fn allocate(capacity: usize) -> Self {
        if capacity == 0 {
            return Self::empty();
        }
        let layout = match Self::layout(capacity) {
            Ok(layout) => layout,
            Err(err) => precondition_failed(err),
        };
        match Self::alloc_slots(layout) {
            Some(ptr) => Self {
                ptr: Some(ptr),
                capacity,
            },
            None => alloc::handle_alloc_error(layout),
        }
    }

    /// Allocate exactly `capacity` slots, reporting failure instead of aborting.
    pub(crate) fn try_allocate(capacity: usize) -> Result<Self, ArrayError> {
        if capacity == 0 {
            return Ok(Self::empty());
        }
        let layout = Self::layout(capacity)?;
        let ptr = Self::alloc_slots(layout).ok_or(ArrayError::AllocationFailed {
            bytes: layout.size(),
        })?;
        Ok(Self {
            ptr: Some(ptr),
            capacity,
        })
    }

    /// Number of slots in the allocation.
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the buffer currently holds an allocation.
    #[cfg(test)]
    pub(crate) fn is_allocated(&self) -> bool {
        self.ptr.is_some()
    }

    /// Pointer to slot 0. Dangling (but aligned) when nothing is allocated,
    /// which is valid for zero-length slices.
    pub(crate) fn as_ptr(&self) -> *mut T {
        self.ptr.unwrap_or(NonNull::dangling()).as_ptr()
    }

    fn layout(capacity: usize) -> Result<Layout, ArrayError> {
        Layout::array::<T>(capacity).map_err(|_| ArrayError::CapacityOverflow {
            requested: capacity,
        })
    }

    fn alloc_slots(layout: Layout) -> Option<NonNull<T>> {
        if layout.size() == 0 {
            return Some(NonNull::dangling());
        }
        // SAFETY: `layout` has a non-zero size.
        let raw = unsafe { alloc::alloc(layout) };
        NonNull::new(raw.cast::<T>())
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        let Some(ptr) = self.ptr else {
            return;
        };
        // The layout was valid when the buffer was allocated, so it still is.
        if let Ok(layout) = Self::layout(self.capacity) {
            if layout.size() != 0 {
                // SAFETY: `ptr` came from `alloc::alloc` with this exact layout
                // and has not been freed.
                unsafe { alloc::dealloc(ptr.as_ptr().cast::<u8>(), layout) };
            }
        }
    }
}
