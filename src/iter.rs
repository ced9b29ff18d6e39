use core::iter::FusedIterator;
use core::slice;

use std::vec;

use crate::bucket::Bucket;

/// An iterator over the elements of a [`Table`](crate::Table), in bucket order.
///
/// Empty buckets and tombstones are skipped; the sentinel bucket ends the iteration.
pub struct Iter<'a, T> {
    buckets: slice::Iter<'a, Bucket<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    #[inline]
    pub(crate) fn new(buckets: &'a [Bucket<T>], len: usize) -> Self {
        Self {
            buckets: buckets.iter(),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        for bucket in self.buckets.by_ref() {
            match bucket {
                Bucket::Occupied(value) => {
                    self.remaining -= 1;
                    return Some(value);
                }
                Bucket::End => break,
                Bucket::Empty | Bucket::Tombstone => {}
            }
        }
        self.remaining = 0;
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            remaining: self.remaining,
        }
    }
}

/// A mutable iterator over the elements of a [`Table`](crate::Table), in bucket order.
pub struct IterMut<'a, T> {
    buckets: slice::IterMut<'a, Bucket<T>>,
    remaining: usize,
}

impl<'a, T> IterMut<'a, T> {
    #[inline]
    pub(crate) fn new(buckets: &'a mut [Bucket<T>], len: usize) -> Self {
        Self {
            buckets: buckets.iter_mut(),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        for bucket in self.buckets.by_ref() {
            match bucket {
                Bucket::Occupied(value) => {
                    self.remaining -= 1;
                    return Some(value);
                }
                Bucket::End => break,
                Bucket::Empty | Bucket::Tombstone => {}
            }
        }
        self.remaining = 0;
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// An owning iterator over the elements of a [`Table`](crate::Table).
///
/// Elements not yet yielded are dropped together with the iterator.
pub struct IntoIter<T> {
    buckets: vec::IntoIter<Bucket<T>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    #[inline]
    pub(crate) fn new(buckets: Vec<Bucket<T>>, len: usize) -> Self {
        Self {
            buckets: buckets.into_iter(),
            remaining: len,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        for bucket in self.buckets.by_ref() {
            match bucket {
                Bucket::Occupied(value) => {
                    self.remaining -= 1;
                    return Some(value);
                }
                Bucket::End => break,
                Bucket::Empty | Bucket::Tombstone => {}
            }
        }
        self.remaining = 0;
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
