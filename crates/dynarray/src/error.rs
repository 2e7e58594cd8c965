//! Array error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during array operations.
///
/// Returned by the checked (`try_*`) operations. The infallible operations
/// treat the same conditions as fatal precondition failures and panic with
/// this type's `Display` message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// An index was not below the number of live elements.
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of live elements at the time of the call.
        len: usize,
    },
    /// An element was removed from an array with no live elements.
    Empty,
    /// The requested capacity does not fit in the address space.
    CapacityOverflow {
        /// Number of slots requested.
        requested: usize,
    },
    /// A full array cannot grow because its length is already `usize::MAX`.
    GrowthOverflow {
        /// Capacity of the full buffer.
        capacity: usize,
    },
    /// The global allocator could not satisfy the request.
    AllocationFailed {
        /// Size of the failed allocation in bytes.
        bytes: usize,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index out of bounds: index {index}, len {len}")
            }
            Self::Empty => write!(f, "array is empty"),
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: requested {requested} slots")
            }
            Self::GrowthOverflow { capacity } => {
                write!(f, "cannot grow beyond capacity {capacity} slots")
            }
            Self::AllocationFailed { bytes } => {
                write!(f, "allocation of {bytes} bytes failed")
            }
        }
    }
}

impl Error for ArrayError {}

/// Abort the current operation on a violated precondition.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn precondition_failed(err: ArrayError) -> ! {
    panic!("{err}");
}
