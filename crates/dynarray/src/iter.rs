//! Owning iteration over a [`DynArray`](crate::DynArray).

use std::fmt;
use std::marker::PhantomData;
use std::ptr;
use std::slice;

use crate::raw::RawBuffer;

/// Iterator that moves elements out of a [`DynArray`](crate::DynArray).
///
/// Created by `DynArray::into_iter`. Elements not yielded are dropped in
/// index order together with the iterator, then the buffer is released.
pub struct IntoIter<T> {
    buf: RawBuffer<T>,
    /// Live slots are `[start, end)`.
    start: usize,
    end: usize,
    _owns: PhantomData<T>,
}

// SAFETY: the iterator uniquely owns the remaining elements.
unsafe impl<T: Send> Send for IntoIter<T> {}

// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIter<T> {
    /// Take ownership of `buf` whose slots `[0, len)` are live.
    pub(crate) fn new(buf: RawBuffer<T>, len: usize) -> Self {
        Self {
            buf,
            start: 0,
            end: len,
            _owns: PhantomData,
        }
    }

    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[start, end)` are live slots of `buf`.
        unsafe { slice::from_raw_parts(self.buf.as_ptr().add(self.start), self.end - self.start) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start < end` so the slot is live; advancing `start`
        // removes it from the live range.
        let value = unsafe { ptr::read(self.buf.as_ptr().add(self.start)) };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: slot `end` was live and is now outside `[start, end)`.
        Some(unsafe { ptr::read(self.buf.as_ptr().add(self.end)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = self.end - self.start;
        let start = self.start;
        self.start = self.end;
        // SAFETY: `[start, start + remaining)` were live and are no longer
        // tracked, so each is dropped exactly once.
        unsafe {
            let rest = ptr::slice_from_raw_parts_mut(self.buf.as_ptr().add(start), remaining);
            ptr::drop_in_place(rest);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::DynArray;

    #[test]
    fn yields_in_order() {
        let arr: DynArray<i32> = [1, 2, 3].into_iter().collect();
        let out: Vec<i32> = arr.into_iter().collect();
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[test]
    fn double_ended() {
        let arr: DynArray<i32> = [1, 2, 3].into_iter().collect();
        let mut iter = arr.into_iter();
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.as_slice(), &[2]);
    }

    #[test]
    fn unconsumed_elements_are_dropped() {
        let item = Rc::new(());
        let arr: DynArray<Rc<()>> = (0..5).map(|_| Rc::clone(&item)).collect();
        let mut iter = arr.into_iter();
        let first = iter.next();
        assert_eq!(Rc::strong_count(&item), 6);
        drop(iter);
        assert_eq!(Rc::strong_count(&item), 2);
        drop(first);
        assert_eq!(Rc::strong_count(&item), 1);
    }

    #[test]
    fn empty_array_iterates_nothing() {
        let arr: DynArray<String> = DynArray::new();
        assert_eq!(arr.into_iter().next(), None);
    }
}
