use core::alloc::Layout;
use core::fmt::{self, Debug};
use core::marker::PhantomData;
use core::mem;

use log::{debug, trace};

use crate::bucket::Bucket;
use crate::error::{AllocError, InsertError, OnError};
use crate::iter::{IntoIter, Iter, IterMut};
use crate::traits::{DefaultTraits, HashTraits};

/// The smallest number of usable buckets of an allocated table.
pub const MIN_CAPACITY: usize = 4;

/// Growth threshold: the table grows before `(len + tombstones + 1)` reaches this percentage of
/// the capacity.
pub const LOAD_FACTOR_PERCENT: usize = 60;

/// The outcome of a successful insert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InsertResult {
    /// No equal element was present; the table grew by one element.
    InsertedNew,
    /// An equal element was present and has been overwritten.
    ReplacedExisting,
}

/// Where an insert probe ended.
enum Probe {
    /// An equal element occupies this bucket.
    Found(usize),
    /// No equal element exists; this is the first reusable bucket of the probe sequence.
    Vacant(usize),
}

/// An open-addressing hash table with linear probing and tombstone deletion.
///
/// Hashing and equality come from the static traits pack `Tr`. Elements are stored in a single
/// array of buckets followed by one sentinel bucket. Removing an element leaves a tombstone that
/// keeps probe sequences intact; tombstones are only discarded when the table rehashes.
///
/// # Examples
///
/// ```
/// use probemap::{InsertResult, Table};
///
/// let mut table: Table<&str> = Table::new();
///
/// assert_eq!(table.insert("one"), InsertResult::InsertedNew);
/// assert_eq!(table.insert("two"), InsertResult::InsertedNew);
/// assert_eq!(table.insert("one"), InsertResult::ReplacedExisting);
///
/// assert_eq!(table.len(), 2);
/// assert!(table.contains(&"two"));
///
/// assert_eq!(table.remove(&"two"), Some("two"));
/// assert_eq!(table.find(&"two"), None);
/// ```
pub struct Table<T, Tr = DefaultTraits> {
    buckets: Vec<Bucket<T>>,
    size: usize,
    tombstones: usize,
    _traits: PhantomData<fn() -> Tr>,
}

impl<T, Tr> Table<T, Tr> {
    /// Returns a new `Table` without allocated buckets.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::Table;
    ///
    /// let table: Table<u32> = Table::new();
    ///
    /// assert_eq!(table.len(), 0);
    /// assert_eq!(table.capacity(), 0);
    /// ```
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Table {
            buckets: Vec::new(),
            size: 0,
            tombstones: 0,
            _traits: PhantomData,
        }
    }

    /// Creates a new `Table` with at least `capacity` buckets.
    ///
    /// A `capacity` of `0` doesn't allocate. Any other value is rounded up to [`MIN_CAPACITY`].
    ///
    /// # Panics
    ///
    /// Panics if capacity overflow occurs, or when allocation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::Table;
    ///
    /// let table: Table<u32> = Table::with_capacity(10);
    /// assert_eq!(table.capacity(), 10);
    ///
    /// let table: Table<u32> = Table::with_capacity(1);
    /// assert_eq!(table.capacity(), 4);
    /// ```
    #[must_use]
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::allocate(capacity, OnError::Panic) {
            Ok(table) => table,
            Err(_) => unreachable!("allocation errors diverge in panic mode"),
        }
    }

    /// Fallible version of [`Table::with_capacity`].
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::{AllocError, Table};
    ///
    /// let result = Table::<u32>::try_with_capacity(usize::MAX);
    /// assert!(matches!(result, Err(AllocError::CapacityOverflow)));
    /// ```
    #[inline]
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Self::allocate(capacity, OnError::Return)
    }

    fn allocate(capacity: usize, on_err: OnError) -> Result<Self, AllocError> {
        if capacity == 0 {
            return Ok(Self::new());
        }

        let buckets = Self::allocate_buckets(capacity.max(MIN_CAPACITY), on_err)?;
        Ok(Table {
            buckets,
            size: 0,
            tombstones: 0,
            _traits: PhantomData,
        })
    }

    /// Allocates `capacity` empty buckets followed by the sentinel.
    ///
    /// The allocation happens before anything is initialized, so a failure has no effect other
    /// than the returned error.
    fn allocate_buckets(capacity: usize, on_err: OnError) -> Result<Vec<Bucket<T>>, AllocError> {
        let Some(len) = capacity.checked_add(1) else {
            return Err(on_err.overflow());
        };
        let Ok(layout) = Layout::array::<Bucket<T>>(len) else {
            return Err(on_err.overflow());
        };

        let mut buckets = Vec::new();
        if refuse_allocation() || buckets.try_reserve_exact(len).is_err() {
            debug!(
                "allocation of {} buckets ({} bytes) refused",
                len,
                layout.size()
            );
            return Err(on_err.alloc_err(layout));
        }

        buckets.resize_with(capacity, || Bucket::Empty);
        buckets.push(Bucket::End);
        Ok(buckets)
    }

    /// Returns the number of elements in the table.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Shorthand for `self.len() == 0`.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of usable buckets, not counting the sentinel.
    ///
    /// This is `0` until the table allocates and at least [`MIN_CAPACITY`] afterwards.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buckets.len().saturating_sub(1)
    }

    /// Returns the number of buckets holding a tombstone.
    #[inline(always)]
    pub const fn tombstone_count(&self) -> usize {
        self.tombstones
    }

    /// Returns the share of buckets that are occupied or hold a tombstone.
    ///
    /// An unallocated table reports `0.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::Table;
    ///
    /// let mut table: Table<u32> = Table::with_capacity(10);
    /// assert_eq!(table.load_factor(), 0.0);
    ///
    /// table.insert(1);
    /// table.insert(2);
    /// table.remove(&2);
    ///
    /// // One element plus one tombstone.
    /// assert_eq!(table.load_factor(), 0.2);
    /// ```
    #[inline]
    pub fn load_factor(&self) -> f32 {
        let capacity = self.capacity();
        if capacity == 0 {
            return 0.0;
        }
        (self.size + self.tombstones) as f32 / capacity as f32
    }

    /// Drops every element and releases the buckets.
    ///
    /// The table returns to the unallocated state of [`Table::new`].
    #[inline]
    pub fn clear(&mut self) {
        self.buckets = Vec::new();
        self.size = 0;
        self.tombstones = 0;
    }

    /// Returns an iterator over the elements in bucket order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.buckets, self.size)
    }

    /// Returns an iterator yielding mutable references in bucket order.
    ///
    /// Changing the hash or equality of an element through it leaves the element unreachable
    /// by lookups.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(&mut self.buckets, self.size)
    }

    #[inline(always)]
    fn bucket_index(hash: u64, capacity: usize) -> usize {
        (hash % capacity as u64) as usize
    }

    #[inline(always)]
    fn should_grow(&self) -> bool {
        (self.size + self.tombstones + 1).saturating_mul(100)
            >= self.capacity().saturating_mul(LOAD_FACTOR_PERCENT)
    }

    /// Returns the element of an occupied bucket.
    #[inline]
    pub(crate) fn occupied(&self, index: usize) -> &T {
        match self.buckets[index].as_occupied() {
            Some(value) => value,
            None => unreachable!("bucket {index} is not occupied"),
        }
    }

    /// Returns the element of an occupied bucket.
    #[inline]
    pub(crate) fn occupied_mut(&mut self, index: usize) -> &mut T {
        match self.buckets[index].as_occupied_mut() {
            Some(value) => value,
            None => unreachable!("bucket {index} is not occupied"),
        }
    }

    /// Removes the element of an occupied bucket, leaving a tombstone.
    fn remove_at(&mut self, index: usize) -> T {
        match self.buckets[index].take_leaving_tombstone() {
            Some(value) => {
                self.size -= 1;
                self.tombstones += 1;
                value
            }
            None => unreachable!("bucket {index} is not occupied"),
        }
    }
}

impl<T, Tr> Table<T, Tr>
where
    Tr: HashTraits<T>,
{
    /// Inserts `value` into the table.
    ///
    /// If an equal element is present it is overwritten by `value` and
    /// [`InsertResult::ReplacedExisting`] is returned. Otherwise `value` goes to the first
    /// reusable bucket of its probe sequence and [`InsertResult::InsertedNew`] is returned.
    ///
    /// # Panics
    ///
    /// Panics if capacity overflow occurs, or when allocation fails while growing.
    ///
    /// # Time Complexity
    ///
    /// _O_(1) amortized.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::{InsertResult, Table};
    ///
    /// let mut table: Table<i32> = Table::new();
    ///
    /// assert_eq!(table.insert(1), InsertResult::InsertedNew);
    /// assert_eq!(table.insert(1), InsertResult::ReplacedExisting);
    /// assert_eq!(table.len(), 1);
    /// ```
    #[inline]
    pub fn insert(&mut self, value: T) -> InsertResult {
        match self.insert_with(value, OnError::Panic) {
            Ok(result) => result,
            Err(_) => unreachable!("allocation errors diverge in panic mode"),
        }
    }

    /// Tries to insert `value` into the table.
    ///
    /// This method is semantically equivalent to [`Table::insert`], except that it returns an
    /// error instead of panicking when growing fails. On error the table is left unchanged and
    /// `value` is returned inside the [`InsertError`].
    #[inline]
    pub fn try_insert(&mut self, value: T) -> Result<InsertResult, InsertError<T>> {
        self.insert_with(value, OnError::Return)
    }

    fn insert_with(&mut self, value: T, on_err: OnError) -> Result<InsertResult, InsertError<T>> {
        if self.should_grow() {
            if let Err(error) = self.grow(on_err) {
                return Err(InsertError { error, value });
            }
        }

        let hash = Tr::hash(&value);
        match self.probe_for_insert(hash, |existing| Tr::equals(existing, &value)) {
            Probe::Found(index) => {
                self.buckets[index] = Bucket::Occupied(value);
                Ok(InsertResult::ReplacedExisting)
            }
            Probe::Vacant(index) => {
                self.occupy(index, value);
                Ok(InsertResult::InsertedNew)
            }
        }
    }

    /// Inserts `value`, which must not be present yet, and returns its bucket.
    pub(crate) fn insert_absent(&mut self, value: T, on_err: OnError) -> Result<usize, AllocError> {
        if self.should_grow() {
            self.grow(on_err)?;
        }

        let hash = Tr::hash(&value);
        let index = match self.probe_for_insert(hash, |existing| Tr::equals(existing, &value)) {
            Probe::Found(index) => {
                debug_assert!(false, "Logic error: element is already present");
                self.buckets[index] = Bucket::Occupied(value);
                return Ok(index);
            }
            Probe::Vacant(index) => index,
        };
        self.occupy(index, value);
        Ok(index)
    }

    /// Places a new element into a reusable bucket and updates the counters.
    #[inline]
    fn occupy(&mut self, index: usize, value: T) {
        let bucket = &mut self.buckets[index];
        debug_assert!(
            bucket.is_empty() || bucket.is_tombstone(),
            "Logic error: attempt to overwrite an occupied bucket"
        );
        if bucket.is_tombstone() {
            self.tombstones -= 1;
        }
        *bucket = Bucket::Occupied(value);
        self.size += 1;
    }

    /// Walks the probe sequence of `hash` looking for an element accepted by `eq`.
    ///
    /// The walk ends at the first empty bucket. The vacant position is the first tombstone seen
    /// on the way, or that empty bucket when there was none.
    ///
    /// The table must be allocated.
    fn probe_for_insert<F>(&self, hash: u64, mut eq: F) -> Probe
    where
        F: FnMut(&T) -> bool,
    {
        let capacity = self.capacity();
        debug_assert!(
            capacity != 0,
            "Logic error: probing while the table is unallocated"
        );

        let mut index = Self::bucket_index(hash, capacity);
        let mut reusable = None;

        for _ in 0..capacity {
            match &self.buckets[index] {
                Bucket::Occupied(existing) => {
                    if eq(existing) {
                        return Probe::Found(index);
                    }
                }
                Bucket::Empty => return Probe::Vacant(reusable.unwrap_or(index)),
                Bucket::Tombstone => {
                    if reusable.is_none() {
                        reusable = Some(index);
                    }
                }
                Bucket::End => unreachable!("probe reached the sentinel bucket"),
            }
            index = (index + 1) % capacity;
        }

        // The growth check keeps at least one empty bucket, so a full walk only happens when
        // every non-occupied bucket is a tombstone.
        match reusable {
            Some(index) => Probe::Vacant(index),
            None => unreachable!("table has no reusable bucket"),
        }
    }

    /// Returns the bucket of the element accepted by `predicate` on the probe sequence of
    /// `hash`.
    ///
    /// Tombstones don't end the walk; only an empty bucket does.
    pub(crate) fn lookup<P>(&self, hash: u64, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        if self.is_empty() {
            return None;
        }

        let capacity = self.capacity();
        let mut index = Self::bucket_index(hash, capacity);

        for _ in 0..capacity {
            match &self.buckets[index] {
                Bucket::Occupied(existing) if predicate(existing) => return Some(index),
                Bucket::Empty => return None,
                _ => {}
            }
            index = (index + 1) % capacity;
        }

        None
    }

    /// Doubles the capacity, or allocates [`MIN_CAPACITY`] buckets for an unallocated table.
    #[cold]
    fn grow(&mut self, on_err: OnError) -> Result<(), AllocError> {
        let capacity = self.capacity();
        let new_capacity = if capacity != 0 {
            match capacity.checked_mul(2) {
                Some(doubled) => doubled.max(MIN_CAPACITY),
                None => return Err(on_err.overflow()),
            }
        } else {
            MIN_CAPACITY
        };

        self.rehash(new_capacity, on_err)
    }

    /// Moves every element into a freshly allocated array of `new_capacity` buckets.
    ///
    /// Tombstones are not carried over. On error the table is left untouched.
    fn rehash(&mut self, new_capacity: usize, on_err: OnError) -> Result<(), AllocError> {
        let new_buckets = Self::allocate_buckets(new_capacity, on_err)?;

        let old_capacity = self.capacity();
        let old_buckets = mem::replace(&mut self.buckets, new_buckets);
        let dropped_tombstones = mem::replace(&mut self.tombstones, 0);
        let moved = mem::replace(&mut self.size, 0);

        for bucket in old_buckets {
            if let Bucket::Occupied(value) = bucket {
                self.place_unique(value);
            }
        }
        debug_assert_eq!(self.size, moved);

        trace!(
            "rehashed {} elements from {} to {} buckets, dropped {} tombstones",
            moved,
            old_capacity,
            new_capacity,
            dropped_tombstones
        );

        Ok(())
    }

    /// Stores `value` in the first empty bucket of its probe sequence without looking for
    /// equal elements.
    ///
    /// Only valid on an array without tombstones whose elements are known to be distinct, which
    /// holds while rehashing and cloning.
    fn place_unique(&mut self, value: T) {
        let capacity = self.capacity();
        let mut index = Self::bucket_index(Tr::hash(&value), capacity);

        while !self.buckets[index].is_empty() {
            debug_assert!(
                !self.buckets[index].is_tombstone(),
                "Logic error: detected tombstone while rehashing"
            );
            index = (index + 1) % capacity;
        }

        self.buckets[index] = Bucket::Occupied(value);
        self.size += 1;
    }

    /// Reserves capacity so that `additional` more inserts don't trigger growth.
    ///
    /// This method is no-op if `additional` is `0` or the capacity already suffices. The
    /// capacity never shrinks.
    ///
    /// # Panics
    ///
    /// Panics if capacity overflow occurs, or when allocation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::Table;
    ///
    /// let mut table: Table<u32> = Table::new();
    /// table.reserve(100);
    ///
    /// let capacity = table.capacity();
    /// for i in 0..100 {
    ///     table.insert(i);
    /// }
    ///
    /// assert_eq!(table.capacity(), capacity);
    /// ```
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        match self.reserve_additional(additional, OnError::Panic) {
            Ok(()) => (),
            Err(_) => unreachable!("allocation errors diverge in panic mode"),
        }
    }

    /// Tries to reserve capacity for `additional` more inserts.
    ///
    /// This method is semantically equivalent to [`Table::reserve`], except that it returns an
    /// error instead of panicking. On error the table is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::{AllocError, Table};
    ///
    /// let mut table: Table<u32> = Table::new();
    /// table.insert(1);
    ///
    /// assert_eq!(table.try_reserve(usize::MAX), Err(AllocError::CapacityOverflow));
    /// assert_eq!(table.capacity(), 4);
    /// assert!(table.contains(&1));
    /// ```
    #[inline]
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), AllocError> {
        self.reserve_additional(additional, OnError::Return)
    }

    fn reserve_additional(&mut self, additional: usize, on_err: OnError) -> Result<(), AllocError> {
        if additional == 0 {
            return Ok(());
        }

        let used = self.size + self.tombstones;
        match Self::required_capacity(used, additional) {
            Some(required) if required <= self.capacity() => return Ok(()),
            Some(_) => {}
            None => return Err(on_err.overflow()),
        }

        // Rehashing drops the tombstones, so only live elements count towards the new size.
        let new_capacity = match Self::required_capacity(self.size, additional) {
            Some(required) => required.max(self.capacity()).max(MIN_CAPACITY),
            None => return Err(on_err.overflow()),
        };

        self.rehash(new_capacity, on_err)
    }

    /// Returns the smallest capacity which holds `used + additional` buckets below the load
    /// factor threshold.
    #[inline]
    fn required_capacity(used: usize, additional: usize) -> Option<usize> {
        let target = used.checked_add(additional)?.checked_mul(100)?;
        Some(target / LOAD_FACTOR_PERCENT + 1)
    }

    /// Returns the element equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::Table;
    ///
    /// let mut table: Table<i32> = Table::new();
    /// table.insert(1);
    ///
    /// assert_eq!(table.find(&1), Some(&1));
    /// assert_eq!(table.find(&2), None);
    /// ```
    #[must_use]
    #[inline]
    pub fn find(&self, value: &T) -> Option<&T> {
        self.find_by(Tr::hash(value), |existing| Tr::equals(existing, value))
    }

    /// Returns a mutable reference to the element equal to `value`.
    ///
    /// The element must keep its hash and equality; changing them leaves it unreachable by
    /// lookups.
    #[must_use]
    #[inline]
    pub fn find_mut(&mut self, value: &T) -> Option<&mut T> {
        self.find_by_mut(Tr::hash(value), |existing| Tr::equals(existing, value))
    }

    /// Returns the element accepted by `predicate` on the probe sequence of `hash`.
    ///
    /// This allows lookups by any key-equivalent as long as `hash` is what `Tr` computes for
    /// the matching element.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::{DefaultTraits, HashTraits, Table};
    ///
    /// let mut table: Table<String> = Table::new();
    /// table.insert("apple".to_string());
    ///
    /// let hash = DefaultTraits::hash(&"apple".to_string());
    /// assert!(table.find_by(hash, |s| s == "apple").is_some());
    /// ```
    #[must_use]
    #[inline]
    pub fn find_by<P>(&self, hash: u64, predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        let index = self.lookup(hash, predicate)?;
        Some(self.occupied(index))
    }

    /// Mutable version of [`Table::find_by`].
    #[must_use]
    #[inline]
    pub fn find_by_mut<P>(&mut self, hash: u64, predicate: P) -> Option<&mut T>
    where
        P: FnMut(&T) -> bool,
    {
        let index = self.lookup(hash, predicate)?;
        Some(self.occupied_mut(index))
    }

    /// Returns an entry for the element equal to `value`, which can be used to remove it in
    /// place.
    ///
    /// The entry borrows the table exclusively, so no other operation can invalidate it.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::Table;
    ///
    /// let mut table: Table<i32> = Table::new();
    /// table.insert(7);
    ///
    /// if let Some(entry) = table.find_entry(&7) {
    ///     assert_eq!(entry.remove(), 7);
    /// }
    ///
    /// assert!(table.is_empty());
    /// ```
    #[must_use]
    #[inline]
    pub fn find_entry(&mut self, value: &T) -> Option<OccupiedEntry<'_, T, Tr>> {
        let hash = Tr::hash(value);
        self.find_entry_by(hash, |existing| Tr::equals(existing, value))
    }

    /// Entry version of [`Table::find_by`].
    #[must_use]
    #[inline]
    pub fn find_entry_by<P>(&mut self, hash: u64, predicate: P) -> Option<OccupiedEntry<'_, T, Tr>>
    where
        P: FnMut(&T) -> bool,
    {
        let index = self.lookup(hash, predicate)?;
        Some(OccupiedEntry { table: self, index })
    }

    /// Returns `true` if an element equal to `value` is present.
    #[must_use]
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Removes the element equal to `value` and returns it.
    ///
    /// The bucket becomes a tombstone; the table never shrinks.
    #[inline]
    pub fn remove(&mut self, value: &T) -> Option<T> {
        self.find_entry(value).map(OccupiedEntry::remove)
    }
}

/// An occupied bucket of a [`Table`], returned by [`Table::find_entry`].
pub struct OccupiedEntry<'a, T, Tr> {
    table: &'a mut Table<T, Tr>,
    index: usize,
}

impl<'a, T, Tr> OccupiedEntry<'a, T, Tr> {
    #[inline]
    pub fn get(&self) -> &T {
        self.table.occupied(self.index)
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        self.table.occupied_mut(self.index)
    }

    /// Converts the entry into a mutable reference bound to the table's borrow.
    #[inline]
    pub fn into_mut(self) -> &'a mut T {
        self.table.occupied_mut(self.index)
    }

    /// Removes the element, leaving a tombstone in its bucket.
    #[inline]
    pub fn remove(self) -> T {
        self.table.remove_at(self.index)
    }
}

impl<T, Tr> Default for Table<T, Tr> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, Tr> Clone for Table<T, Tr>
where
    T: Clone,
    Tr: HashTraits<T>,
{
    /// Creates a table with the same capacity and reinserts a clone of every element.
    ///
    /// Bucket positions may differ from `self` since its tombstones are not copied.
    ///
    /// # Panics
    ///
    /// Panics when allocation fails.
    fn clone(&self) -> Self {
        // Return an unallocated instance if `self` is unallocated.
        let mut instance = match Self::allocate(self.capacity(), OnError::Panic) {
            Ok(table) => table,
            Err(_) => unreachable!("allocation errors diverge in panic mode"),
        };
        for value in self.iter() {
            instance.place_unique(value.clone());
        }
        instance
    }
}

impl<T, Tr> PartialEq for Table<T, Tr>
where
    T: PartialEq,
    Tr: HashTraits<T>,
{
    fn eq(&self, other: &Self) -> bool {
        if self.size != other.size {
            return false;
        }
        self.iter()
            .all(|value| other.find(value).is_some_and(|found| found == value))
    }
}

impl<T, Tr> Debug for Table<T, Tr>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, Tr> Extend<T> for Table<T, Tr>
where
    Tr: HashTraits<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, Tr> FromIterator<T> for Table<T, Tr>
where
    Tr: HashTraits<T>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<'a, T, Tr> IntoIterator for &'a Table<T, Tr> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, Tr> IntoIterator for &'a mut Table<T, Tr> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, Tr> IntoIterator for Table<T, Tr> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the table and returns an iterator over its elements in bucket order.
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.buckets, self.size)
    }
}

#[cfg(not(test))]
#[inline(always)]
fn refuse_allocation() -> bool {
    false
}

#[cfg(test)]
thread_local! {
    static REFUSE_ALLOCATIONS: core::cell::Cell<bool> = const { core::cell::Cell::new(false) };
}

#[cfg(test)]
fn refuse_allocation() -> bool {
    REFUSE_ALLOCATIONS.with(|refuse| refuse.get())
}

/// Makes every following bucket allocation on this thread fail until reset.
#[cfg(test)]
pub(crate) fn debug_refuse_allocations(refuse: bool) {
    REFUSE_ALLOCATIONS.with(|flag| flag.set(refuse));
}

/// Development and testing methods that are not available in release builds.
#[cfg(test)]
impl<T, Tr> Table<T, Tr> {
    /// Returns `true` if the bucket at `index` is occupied.
    pub(crate) fn debug_is_occupied(&self, index: usize) -> bool {
        self.buckets[index].is_occupied()
    }

    /// Returns `true` if the bucket at `index` holds a tombstone.
    pub(crate) fn debug_is_tombstone(&self, index: usize) -> bool {
        self.buckets[index].is_tombstone()
    }

    /// Returns `true` if the last bucket is the sentinel and no other bucket is.
    pub(crate) fn debug_sentinel_ok(&self) -> bool {
        match self.buckets.split_last() {
            Some((last, rest)) => {
                matches!(last, Bucket::End) && !rest.iter().any(|b| matches!(b, Bucket::End))
            }
            None => true,
        }
    }

    /// Recounts occupied buckets and tombstones by scanning the array.
    pub(crate) fn debug_recount(&self) -> (usize, usize) {
        let occupied = self.buckets.iter().filter(|b| b.is_occupied()).count();
        let tombstones = self.buckets.iter().filter(|b| b.is_tombstone()).count();
        (occupied, tombstones)
    }
}
