//! An open-addressing hash table with linear probing and tombstone deletion, and a key-value
//! map built on top of it.
//!
//! [`Table`] stores its elements directly in a single bucket array and takes hashing and
//! equality from a static [`HashTraits`] pack, so callers can define lookups such as
//! case-insensitive strings without wrapper types. [`Map`] stores [`Entry`] pairs in a `Table`
//! whose traits only look at the key.

mod bucket;
mod error;
mod iter;
mod map;
mod table;
mod traits;
#[macro_use]
mod builder;
#[cfg(test)]
mod proptests;

// Public exports.
pub use error::{AllocError, InsertError};
pub use iter::{IntoIter, Iter, IterMut};
pub use map::{EntriesIterator, EntriesIteratorMut, Map, MapIntoIter};
pub use table::{InsertResult, OccupiedEntry, Table, LOAD_FACTOR_PERCENT, MIN_CAPACITY};
pub use traits::{DefaultTraits, Entry, EntryTraits, HashTraits};
