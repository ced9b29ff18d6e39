use core::fmt::{self, Debug, Display};
use core::iter::Map as MapAdapter;
use core::ops::Index;

use crate::error::{AllocError, InsertError, OnError};
use crate::iter::{IntoIter, Iter, IterMut};
use crate::table::{InsertResult, Table};
use crate::traits::{DefaultTraits, Entry, EntryTraits, HashTraits};

/// An immutable iterable view of the entries in the map.
pub type EntriesIterator<'a, K, V> = MapAdapter<Iter<'a, Entry<K, V>>, fn(&Entry<K, V>) -> (&K, &V)>;

/// A mutable iterable view of the entries in the map.
///
/// The keys are immutable, only the values can be modified.
pub type EntriesIteratorMut<'a, K, V> =
    MapAdapter<IterMut<'a, Entry<K, V>>, fn(&mut Entry<K, V>) -> (&K, &mut V)>;

/// An owning iterator over the entries in the map.
pub type MapIntoIter<K, V> = MapAdapter<IntoIter<Entry<K, V>>, fn(Entry<K, V>) -> (K, V)>;

/// A key-value map stored in an open-addressing [`Table`] of [`Entry`] elements.
///
/// Hashing and equality are computed from the key alone through the key traits `Tr`; values
/// are never compared.
///
/// # Examples
///
/// ```
/// use probemap::{InsertResult, Map};
///
/// let mut map: Map<i32, &str> = Map::new();
///
/// assert_eq!(map.insert(1, "one"), InsertResult::InsertedNew);
/// assert_eq!(map.insert(2, "two"), InsertResult::InsertedNew);
/// assert_eq!(map.insert(1, "uno"), InsertResult::ReplacedExisting);
///
/// assert_eq!(map.get(&1), Some(&"uno"));
/// assert!(map.remove(&2));
/// assert!(!map.contains(&2));
/// ```
pub struct Map<K, V, Tr = DefaultTraits> {
    table: Table<Entry<K, V>, EntryTraits<Tr>>,
}

impl<K, V, Tr> Map<K, V, Tr> {
    /// Returns a new `Map` without allocated capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::Map;
    ///
    /// let map: Map<i32, &str> = Map::new();
    ///
    /// assert_eq!(map.len(), 0);
    /// assert_eq!(map.capacity(), 0);
    /// ```
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Map { table: Table::new() }
    }

    /// Creates a new `Map` with at least `capacity` buckets.
    ///
    /// # Panics
    ///
    /// Panics if capacity overflow occurs, or when allocation fails.
    #[must_use]
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Map {
            table: Table::with_capacity(capacity),
        }
    }

    /// Fallible version of [`Map::with_capacity`].
    #[inline]
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Ok(Map {
            table: Table::try_with_capacity(capacity)?,
        })
    }

    /// Returns the number of entries in the map.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.table.len()
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of usable buckets of the underlying table.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    #[inline]
    pub fn load_factor(&self) -> f32 {
        self.table.load_factor()
    }

    /// Drops every entry and releases the storage.
    #[inline]
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns an iterator over the entries in bucket order.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::Map;
    ///
    /// let mut map: Map<i32, &str> = Map::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// let mut entries: Vec<(&i32, &&str)> = map.iter().collect();
    /// entries.sort();
    ///
    /// assert_eq!(entries, vec![(&1, &"a"), (&2, &"b")]);
    /// ```
    #[inline]
    pub fn iter(&self) -> EntriesIterator<'_, K, V> {
        self.table.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Returns an iterator over the entries with mutable values.
    #[inline]
    pub fn iter_mut(&mut self) -> EntriesIteratorMut<'_, K, V> {
        self.table
            .iter_mut()
            .map(|entry| (&entry.key, &mut entry.value))
    }

    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.table.iter().map(|entry| &entry.key)
    }

    #[inline]
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.table.iter().map(|entry| &entry.value)
    }
}

impl<K, V, Tr> Map<K, V, Tr>
where
    Tr: HashTraits<K>,
{
    /// Inserts a key-value pair into the map.
    ///
    /// If an equal key is present, its entry is overwritten with `key` and `value`
    /// unconditionally and [`InsertResult::ReplacedExisting`] is returned.
    ///
    /// # Panics
    ///
    /// Panics if capacity overflow occurs, or when allocation fails.
    ///
    /// # Time Complexity
    ///
    /// _O_(1) amortized.
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> InsertResult {
        self.table.insert(Entry::new(key, value))
    }

    /// Fallible version of [`Map::insert`].
    ///
    /// On error the map is unchanged and the pair is handed back inside the [`InsertError`].
    #[inline]
    pub fn try_insert(&mut self, key: K, value: V) -> Result<InsertResult, InsertError<(K, V)>> {
        self.table
            .try_insert(Entry::new(key, value))
            .map_err(|InsertError { error, value }| InsertError {
                error,
                value: (value.key, value.value),
            })
    }

    /// Returns the stored key and value for `key`.
    ///
    /// The stored key may differ from `key` when the traits treat distinct keys as equal.
    #[must_use]
    #[inline]
    pub fn find(&self, key: &K) -> Option<(&K, &V)> {
        self.table
            .find_by(Tr::hash(key), |entry| Tr::equals(&entry.key, key))
            .map(|entry| (&entry.key, &entry.value))
    }

    #[must_use]
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|(_, value)| value)
    }

    #[must_use]
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.table
            .find_by_mut(Tr::hash(key), |entry| Tr::equals(&entry.key, key))
            .map(|entry| &mut entry.value)
    }

    #[must_use]
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Removes the entry for `key`, returning `true` if it existed.
    #[inline]
    pub fn remove(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Removes the entry for `key` and returns its value.
    #[inline]
    pub fn take(&mut self, key: &K) -> Option<V> {
        self.table
            .find_entry_by(Tr::hash(key), |entry| Tr::equals(&entry.key, key))
            .map(|entry| entry.remove().value)
    }

    /// Returns a mutable reference to the value for `key`, inserting `make()` first if the key
    /// is absent.
    ///
    /// # Panics
    ///
    /// Panics if capacity overflow occurs, or when allocation fails.
    #[inline]
    pub fn get_or_insert_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let hash = Tr::hash(&key);
        let found = self.table.lookup(hash, |entry| Tr::equals(&entry.key, &key));
        let index = match found {
            Some(index) => index,
            None => match self
                .table
                .insert_absent(Entry::new(key, make()), OnError::Panic)
            {
                Ok(index) => index,
                Err(_) => unreachable!("allocation errors diverge in panic mode"),
            },
        };
        &mut self.table.occupied_mut(index).value
    }

    /// Returns a mutable reference to the value for `key`, inserting `V::default()` first if the
    /// key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::Map;
    ///
    /// let mut counts: Map<&str, u32> = Map::new();
    ///
    /// for word in ["this", "not", "this", "bye", "not"] {
    ///     *counts.get_or_insert_default(word) += 1;
    /// }
    ///
    /// assert_eq!(counts.get(&"this"), Some(&2));
    /// assert_eq!(counts.get(&"not"), Some(&2));
    /// assert_eq!(counts.get(&"bye"), Some(&1));
    /// ```
    #[inline]
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Reserves capacity so that `additional` more inserts don't trigger growth.
    ///
    /// # Panics
    ///
    /// Panics if capacity overflow occurs, or when allocation fails.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Fallible version of [`Map::reserve`]. On error the map is unchanged.
    #[inline]
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), AllocError> {
        self.table.try_reserve(additional)
    }
}

impl<K, V, Tr> Default for Map<K, V, Tr> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, Tr> Clone for Map<K, V, Tr>
where
    K: Clone,
    V: Clone,
    Tr: HashTraits<K>,
{
    /// Creates a map with the same capacity holding clones of every entry.
    fn clone(&self) -> Self {
        Map {
            table: self.table.clone(),
        }
    }
}

impl<K, V, Tr> PartialEq for Map<K, V, Tr>
where
    V: PartialEq,
    Tr: HashTraits<K>,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(key, value)| other.get(key).is_some_and(|v| *value == *v))
    }
}

impl<K, V, Tr> Index<&K> for Map<K, V, Tr>
where
    Tr: HashTraits<K>,
{
    type Output = V;

    /// Returns a reference to the value for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    #[inline]
    fn index(&self, key: &K) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key not found"),
        }
    }
}

impl<K, V, Tr> Extend<(K, V)> for Map<K, V, Tr>
where
    Tr: HashTraits<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, Tr> FromIterator<(K, V)> for Map<K, V, Tr>
where
    Tr: HashTraits<K>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, Tr> IntoIterator for &'a Map<K, V, Tr> {
    type Item = (&'a K, &'a V);
    type IntoIter = EntriesIterator<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, Tr> IntoIterator for &'a mut Map<K, V, Tr> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = EntriesIteratorMut<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, Tr> IntoIterator for Map<K, V, Tr> {
    type Item = (K, V);
    type IntoIter = MapIntoIter<K, V>;

    /// Consumes the map and returns an iterator over its entries.
    fn into_iter(self) -> Self::IntoIter {
        self.table
            .into_iter()
            .map(|entry| (entry.key, entry.value))
    }
}

impl<K, V, Tr> Debug for Map<K, V, Tr>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, Tr> Display for Map<K, V, Tr>
where
    K: Display,
    V: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for (key, value) in self.iter() {
            writeln!(f, "    {}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}
