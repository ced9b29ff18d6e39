/// Builds a [`Map`](crate::Map) from a list of key-value pairs.
///
/// The map reserves room for all pairs up front, so building it never rehashes. An optional
/// capacity before the pairs sets the minimum number of buckets.
///
/// # Examples
///
/// ```
/// use probemap::map;
///
/// let dict = map! {
///     "one": 1,
///     "two": 2,
///     "three": 3,
/// };
///
/// assert_eq!(dict.len(), 3);
/// assert_eq!(dict.get(&"two"), Some(&2));
///
/// let dict = map! {
///     32; // Capacity
///     "one": 1,
///     "two": 2,
/// };
///
/// assert_eq!(dict.len(), 2);
/// assert_eq!(dict.capacity(), 32);
/// ```
#[macro_export]
macro_rules! map {
    // Pattern without explicit capacity.
    ( $( $key:tt : $value:expr ),* $(,)? ) => {
        {
            let pairs = [$( ($key, $value) ),*];
            let mut map: $crate::Map<_, _> = $crate::Map::new();
            map.reserve(pairs.len());
            map.extend(pairs);
            map
        }
    };
    // Pattern with explicit capacity.
    ( $capacity:expr; $( $key:tt : $value:expr ),* $(,)? ) => {
        {
            let pairs = [$( ($key, $value) ),*];
            let mut map: $crate::Map<_, _> = $crate::Map::with_capacity($capacity);
            map.reserve(pairs.len());
            map.extend(pairs);
            map
        }
    };
    // Catch-all pattern for invalid patterns.
    ( $($tt:tt)* ) => {
        compile_error!("Invalid syntax. Use `map! { key: value, ... }` or `map! { capacity; key: value, ... }`.");
    };
}
