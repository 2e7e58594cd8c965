//! The [`DynArray`] container.
//!
//! A `DynArray<T>` owns one contiguous buffer. Slots `[0, len)` hold live
//! values; slots `[len, capacity)` are uninitialised. The buffer is only
//! replaced by [`DynArray::reserve`], [`DynArray::reserve_capacity`],
//! [`DynArray::shrink_to_fit`], `clone_from`, and by an append that finds
//! every slot occupied.
//!
//! Moving an element between buffers is a bitwise copy followed by
//! forgetting the source slot, so element types observe reallocation only
//! as a change of address.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr;
use std::slice;

use tracing::{debug, trace};

use crate::config::{ArrayConfig, GrowthPolicy};
use crate::error::{precondition_failed, ArrayError};
use crate::iter::IntoIter;
use crate::raw::RawBuffer;

/// A contiguous, growable array with explicit capacity management.
///
/// # Example
///
/// ```
/// use dynarray::DynArray;
///
/// let mut arr = DynArray::new();
/// arr.push_back(1);
/// arr.push_back(2);
/// arr.push_back(3);
/// arr.remove_at(1);
/// assert_eq!(arr.as_slice(), &[1, 3]);
///
/// arr.shrink_to_fit();
/// assert_eq!(arr.capacity(), 2);
/// ```
pub struct DynArray<T> {
    buf: RawBuffer<T>,
    len: usize,
    growth: GrowthPolicy,
    /// The array owns live `T` values and drops them.
    _owns: PhantomData<T>,
}

// SAFETY: `DynArray<T>` uniquely owns its buffer and elements, like `Vec<T>`.
unsafe impl<T: Send> Send for DynArray<T> {}

// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync> Sync for DynArray<T> {}

impl<T> DynArray<T> {
    /// Create an empty array. Nothing is allocated.
    pub const fn new() -> Self {
        Self {
            buf: RawBuffer::empty(),
            len: 0,
            growth: GrowthPolicy::Double,
            _owns: PhantomData,
        }
    }

    /// Create an empty array with exactly `capacity` allocated slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` slots of `T` overflow the address space.
    #[track_caller]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(ArrayConfig::new(capacity))
    }

    /// Fallible [`with_capacity`](Self::with_capacity).
    pub fn try_with_capacity(capacity: usize) -> Result<Self, ArrayError> {
        Ok(Self::from_parts(
            RawBuffer::try_allocate(capacity)?,
            GrowthPolicy::default(),
        ))
    }

    /// Create an empty array from an [`ArrayConfig`].
    #[track_caller]
    pub fn with_config(config: ArrayConfig) -> Self {
        Self::from_parts(RawBuffer::allocate(config.initial_capacity), config.growth)
    }

    fn from_parts(buf: RawBuffer<T>, growth: GrowthPolicy) -> Self {
        Self {
            buf,
            len: 0,
            growth,
            _owns: PhantomData,
        }
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no live elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots, live or not.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Growth policy applied when an append finds the buffer full.
    pub fn growth_policy(&self) -> GrowthPolicy {
        self.growth
    }

    /// Append `value`, growing the buffer first if every slot is live.
    ///
    /// # Panics
    ///
    /// Panics if the next capacity overflows.
    #[track_caller]
    pub fn push_back(&mut self, value: T) {
        self.grow_if_full();
        // SAFETY: `len < capacity` after growth and slot `len` is uninitialised.
        unsafe { self.buf.as_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Append a clone of `value`.
    #[track_caller]
    pub fn push_back_cloned(&mut self, value: &T)
    where
        T: Clone,
    {
        self.push_back(value.clone());
    }

    /// Construct a new element in the slot past the end and return it.
    ///
    /// Growth happens before `make` runs, so the value is written straight
    /// into its final slot.
    ///
    /// ```
    /// use dynarray::DynArray;
    ///
    /// let mut names: DynArray<String> = DynArray::new();
    /// let name = names.emplace_back(|| String::from("ada"));
    /// name.push_str(" lovelace");
    /// assert_eq!(names[0], "ada lovelace");
    /// ```
    #[track_caller]
    pub fn emplace_back<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.grow_if_full();
        let value = make();
        // SAFETY: `len < capacity` after growth and slot `len` is uninitialised.
        let slot = unsafe {
            let slot = self.buf.as_ptr().add(self.len);
            slot.write(value);
            &mut *slot
        };
        self.len += 1;
        slot
    }

    /// Destroy the last element.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    #[track_caller]
    pub fn pop_back(&mut self) {
        if self.len == 0 {
            precondition_failed(ArrayError::Empty);
        }
        self.len -= 1;
        // SAFETY: slot `len` was live and is now outside `[0, len)`, so it is
        // dropped exactly once.
        unsafe { ptr::drop_in_place(self.buf.as_ptr().add(self.len)) };
    }

    /// Remove and return the last element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was live and is now outside `[0, len)`.
        Some(unsafe { ptr::read(self.buf.as_ptr().add(self.len)) })
    }

    /// Destroy every live element in index order. Capacity is kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Destroy elements `[new_len, len)` in index order. No-op if
    /// `new_len >= len`. Capacity is kept.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail_len = self.len - new_len;
        // Shorten first so a panicking destructor cannot cause a double drop.
        self.len = new_len;
        // SAFETY: `[new_len, new_len + tail_len)` were live and are no longer
        // reachable through `len`.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.buf.as_ptr().add(new_len), tail_len);
            ptr::drop_in_place(tail);
        }
    }

    /// Remove the element at `index`, shifting later elements one slot
    /// toward the front. Relative order is preserved. O(len - index).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[track_caller]
    pub fn remove_at(&mut self, index: usize) {
        match self.try_remove_at(index) {
            Ok(removed) => drop(removed),
            Err(err) => precondition_failed(err),
        }
    }

    /// Checked [`remove_at`](Self::remove_at) that hands the removed element
    /// back to the caller.
    pub fn try_remove_at(&mut self, index: usize) -> Result<T, ArrayError> {
        if index >= self.len {
            return Err(ArrayError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        // SAFETY: `index < len`, so the slot is live. The tail
        // `[index + 1, len)` is shifted down by one with an overlapping copy,
        // after which slot `len - 1` is stale and excluded by the decrement.
        let removed = unsafe {
            let slot = self.buf.as_ptr().add(index);
            let removed = ptr::read(slot);
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            removed
        };
        self.len -= 1;
        Ok(removed)
    }

    /// Grow the buffer to exactly `new_capacity` slots without touching
    /// `len`. No-op if `new_capacity <= capacity()`.
    ///
    /// This is the conventional reserve. See [`reserve`](Self::reserve) for
    /// the size-changing variant.
    #[track_caller]
    pub fn reserve_capacity(&mut self, new_capacity: usize) {
        if new_capacity > self.capacity() {
            self.relocate(RawBuffer::allocate(new_capacity));
        }
    }

    /// Fallible [`reserve_capacity`](Self::reserve_capacity). On error the
    /// array is left untouched.
    pub fn try_reserve_capacity(&mut self, new_capacity: usize) -> Result<(), ArrayError> {
        if new_capacity > self.capacity() {
            self.relocate(RawBuffer::try_allocate(new_capacity)?);
        }
        Ok(())
    }

    /// Reallocate to exactly `len()` slots. An empty array releases its
    /// buffer entirely.
    pub fn shrink_to_fit(&mut self) {
        if self.capacity() != self.len {
            self.relocate(RawBuffer::allocate(self.len));
        }
    }

    /// Slice over the live elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` are initialised; the pointer is aligned and
        // non-null even when nothing is allocated.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// Mutable slice over the live elements.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, and `&mut self` guarantees uniqueness.
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }

    /// Element at `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Mutable element at `index`, or `None` if out of range.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Element at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](Self::len).
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        // SAFETY: the caller guarantees `index < len`.
        unsafe { &*self.buf.as_ptr().add(index) }
    }

    /// Mutable element at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](Self::len).
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        // SAFETY: the caller guarantees `index < len`.
        unsafe { &mut *self.buf.as_ptr().add(index) }
    }

    #[track_caller]
    fn grow_if_full(&mut self) {
        self.grow_for(1);
    }

    /// Make room for `additional` more elements. When the buffer is too
    /// small, grow to whichever is larger: the policy's next capacity or
    /// exactly what is needed.
    #[track_caller]
    fn grow_for(&mut self, additional: usize) {
        let current = self.capacity();
        if additional <= current - self.len {
            return;
        }
        let Some(needed) = self.len.checked_add(additional) else {
            precondition_failed(ArrayError::GrowthOverflow { capacity: current });
        };
        let target = match self.growth.next_capacity(current) {
            Some(next) => next.max(needed),
            None => needed,
        };
        self.relocate(RawBuffer::allocate(target));
    }

    /// Move the live elements into `fresh` and release the old buffer.
    ///
    /// Elements that do not fit are destroyed in index order first.
    fn relocate(&mut self, fresh: RawBuffer<T>) {
        let new_capacity = fresh.capacity();
        if new_capacity < self.len {
            let dropped = self.len - new_capacity;
            debug!(dropped, new_capacity, "shrinking below len destroys trailing elements");
            self.truncate(new_capacity);
        }
        // SAFETY: `[0, len)` are live in the old buffer and `len <= new_capacity`.
        // The two allocations are distinct. After the copy the old slots are
        // treated as uninitialised and the old buffer is only deallocated.
        unsafe { ptr::copy_nonoverlapping(self.buf.as_ptr(), fresh.as_ptr(), self.len) };
        let old = std::mem::replace(&mut self.buf, fresh);
        trace!(
            old_capacity = old.capacity(),
            new_capacity,
            len = self.len,
            "reallocated array buffer"
        );
    }
}

impl<T: Default> DynArray<T> {
    /// Grow to exactly `new_capacity` slots and fill every new slot, so
    /// that afterwards `len() == capacity() == new_capacity`.
    ///
    /// Unlike [`reserve_capacity`](Self::reserve_capacity) this changes the
    /// logical size: slots `[len, new_capacity)` become live
    /// `T::default()` values. No-op if `new_capacity <= capacity()`.
    ///
    /// ```
    /// use dynarray::DynArray;
    ///
    /// let mut arr: DynArray<i32> = DynArray::new();
    /// arr.reserve(100);
    /// assert_eq!(arr.len(), 100);
    /// assert_eq!(arr.capacity(), 100);
    /// assert_eq!(arr[99], 0);
    /// ```
    #[track_caller]
    pub fn reserve(&mut self, new_capacity: usize) {
        if new_capacity <= self.capacity() {
            return;
        }
        self.relocate(RawBuffer::allocate(new_capacity));
        while self.len < new_capacity {
            // SAFETY: `len < capacity` and slot `len` is uninitialised.
            unsafe { self.buf.as_ptr().add(self.len).write(T::default()) };
            self.len += 1;
        }
    }
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        // Elements first, in index order; the buffer frees itself afterwards.
        self.clear();
    }
}

impl<T: Clone> Clone for DynArray<T> {
    fn clone(&self) -> Self {
        let capacity = self.capacity().max(self.len);
        let mut copy = Self::from_parts(RawBuffer::allocate(capacity), self.growth);
        for value in self.as_slice() {
            copy.push_back(value.clone());
        }
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        // Destroy our own elements before the buffer is touched.
        self.clear();
        let capacity = source.capacity().max(source.len);
        if self.capacity() != capacity {
            self.buf = RawBuffer::allocate(capacity);
        }
        self.growth = source.growth;
        for value in source.as_slice() {
            self.push_back(value.clone());
        }
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T: Hash> Hash for DynArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T> Deref for DynArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for DynArray<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => precondition_failed(ArrayError::IndexOutOfBounds {
                index,
                len: self.len,
            }),
        }
    }
}

impl<T> IndexMut<usize> for DynArray<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(value) => value,
            None => precondition_failed(ArrayError::IndexOutOfBounds { index, len }),
        }
    }
}

impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.grow_for(lower);
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::new();
        arr.extend(iter);
        arr
    }
}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        // Skip our `Drop`: ownership of the live elements moves to the iterator.
        let mut this = ManuallyDrop::new(self);
        let buf = std::mem::replace(&mut this.buf, RawBuffer::empty());
        IntoIter::new(buf, this.len)
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
