/// One slot of the backing array.
///
/// The element lives inside the `Occupied` variant, so it is dropped exactly when the bucket
/// leaves that state. The array always ends with a single `End` bucket which is never probed;
/// cursors stop when they reach it.
#[derive(Debug)]
pub(crate) enum Bucket<T> {
    /// Never used since the last rehash. Terminates probing.
    Empty,
    /// Held an element that was removed. Probing continues past it.
    Tombstone,
    Occupied(T),
    /// Sentinel after the last usable bucket.
    End,
}

impl<T> Bucket<T> {
    #[inline(always)]
    pub(crate) const fn is_empty(&self) -> bool {
        matches!(self, Bucket::Empty)
    }

    #[inline(always)]
    pub(crate) const fn is_tombstone(&self) -> bool {
        matches!(self, Bucket::Tombstone)
    }

    #[inline(always)]
    pub(crate) const fn is_occupied(&self) -> bool {
        matches!(self, Bucket::Occupied(_))
    }

    #[inline(always)]
    pub(crate) const fn as_occupied(&self) -> Option<&T> {
        match self {
            Bucket::Occupied(value) => Some(value),
            _ => None,
        }
    }

    #[inline(always)]
    pub(crate) fn as_occupied_mut(&mut self) -> Option<&mut T> {
        match self {
            Bucket::Occupied(value) => Some(value),
            _ => None,
        }
    }

    /// Moves the element out and leaves a tombstone behind.
    ///
    /// Returns `None` and leaves the bucket untouched if it isn't occupied.
    #[inline]
    pub(crate) fn take_leaving_tombstone(&mut self) -> Option<T> {
        if !self.is_occupied() {
            return None;
        }
        match core::mem::replace(self, Bucket::Tombstone) {
            Bucket::Occupied(value) => Some(value),
            _ => None,
        }
    }
}
