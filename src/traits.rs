use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use std::collections::hash_map::DefaultHasher;

/// Hashing and equality for the elements of a table.
///
/// The pack is static: the table only carries it as a type parameter, so implementors are
/// usually zero-sized marker types.
///
/// Implementations must be consistent: `equals(a, b)` implies `hash(a) == hash(b)`, and
/// `equals` must be an equivalence relation. Breaking this doesn't cause memory unsafety, but
/// lookups and inserts may miss existing elements.
///
/// # Examples
///
/// ```
/// use probemap::{HashTraits, InsertResult, Table};
///
/// struct CaseInsensitive;
///
/// impl HashTraits<String> for CaseInsensitive {
///     fn hash(value: &String) -> u64 {
///         value
///             .bytes()
///             .fold(0xcbf2_9ce4_8422_2325, |h, b| {
///                 (h ^ b.to_ascii_lowercase() as u64).wrapping_mul(0x100_0000_01b3)
///             })
///     }
///
///     fn equals(a: &String, b: &String) -> bool {
///         a.eq_ignore_ascii_case(b)
///     }
/// }
///
/// let mut table: Table<String, CaseInsensitive> = Table::new();
///
/// assert_eq!(table.insert("Hello".to_string()), InsertResult::InsertedNew);
/// assert_eq!(table.insert("HELLO".to_string()), InsertResult::ReplacedExisting);
/// assert_eq!(table.len(), 1);
/// ```
pub trait HashTraits<T: ?Sized> {
    fn hash(value: &T) -> u64;

    fn equals(a: &T, b: &T) -> bool;
}

/// Uses the `Hash` and `Eq` implementations of the element, hashed with `DefaultHasher`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultTraits;

impl<T> HashTraits<T> for DefaultTraits
where
    T: Hash + Eq + ?Sized,
{
    #[inline]
    fn hash(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[inline]
    fn equals(a: &T, b: &T) -> bool {
        a == b
    }
}

/// A key/value pair stored by [`Map`](crate::Map).
///
/// Identity is the key alone; the value never takes part in hashing or equality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    #[inline(always)]
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

/// Lifts key traits `Tr` to [`Entry`] by delegating to the key.
pub struct EntryTraits<Tr> {
    _marker: PhantomData<Tr>,
}

impl<K, V, Tr> HashTraits<Entry<K, V>> for EntryTraits<Tr>
where
    Tr: HashTraits<K>,
{
    #[inline]
    fn hash(entry: &Entry<K, V>) -> u64 {
        Tr::hash(&entry.key)
    }

    #[inline]
    fn equals(a: &Entry<K, V>, b: &Entry<K, V>) -> bool {
        Tr::equals(&a.key, &b.key)
    }
}
