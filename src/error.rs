use core::alloc::Layout;
use std::alloc::handle_alloc_error;

use thiserror::Error;

/// The error returned by the fallible `try_*` methods when the bucket array can't be allocated.
///
/// The table that reported it is left exactly as it was before the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AllocError {
    /// The requested number of buckets, or their size in bytes, exceeds the platform limits.
    #[error("capacity overflow")]
    CapacityOverflow,
    /// The global allocator refused the request.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    AllocationFailed { layout: Layout },
}

/// The error returned by `try_insert` when growing the table fails.
///
/// The element that couldn't be inserted is handed back in `value`.
#[derive(Debug, Error)]
#[error("element not inserted: {error}")]
pub struct InsertError<T> {
    pub error: AllocError,
    pub value: T,
}

impl AllocError {
    /// Panics with capacity overflow message.
    #[cold]
    #[inline(never)]
    pub(crate) fn panic_overflow() -> ! {
        panic!("Allocation Error: capacity overflow")
    }
}

/// Decides whether an allocation error diverges or is handed back to the caller.
#[derive(Clone, Copy, Debug)]
pub(crate) enum OnError {
    Panic,
    Return,
}

impl OnError {
    /// Handles `CapacityOverflow` according to the current variant.
    #[must_use]
    #[inline]
    pub(crate) fn overflow(self) -> AllocError {
        match self {
            OnError::Panic => AllocError::panic_overflow(),
            OnError::Return => AllocError::CapacityOverflow,
        }
    }

    /// Handles `AllocationFailed` according to the current variant.
    #[must_use]
    #[inline]
    pub(crate) fn alloc_err(self, layout: Layout) -> AllocError {
        match self {
            OnError::Panic => handle_alloc_error(layout),
            OnError::Return => AllocError::AllocationFailed { layout },
        }
    }
}
