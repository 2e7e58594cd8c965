//! Array configuration parameters.

/// How a full array picks its next capacity on append.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GrowthPolicy {
    /// Grow by exactly one slot. Minimal footprint; after `n` pushes onto
    /// an empty array `capacity() == n`. Append is O(n) per call.
    ByOne,
    /// Double the capacity, starting from [`GrowthPolicy::MIN_DOUBLING_CAPACITY`].
    /// Amortized O(1) append.
    #[default]
    Double,
}

impl GrowthPolicy {
    /// First non-zero capacity chosen by [`GrowthPolicy::Double`].
    pub const MIN_DOUBLING_CAPACITY: usize = 4;

    /// Capacity to grow to when `current` slots are all occupied.
    ///
    /// Returns `None` if the next capacity overflows `usize`.
    pub fn next_capacity(self, current: usize) -> Option<usize> {
        match self {
            Self::ByOne => current.checked_add(1),
            Self::Double if current == 0 => Some(Self::MIN_DOUBLING_CAPACITY),
            Self::Double => current.checked_mul(2),
        }
    }
}

/// Construction parameters for a [`DynArray`](crate::DynArray).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArrayConfig {
    /// Slots allocated up front. Zero means no allocation until first push.
    pub initial_capacity: usize,

    /// Growth applied when an append finds the buffer full.
    pub growth: GrowthPolicy,
}

impl ArrayConfig {
    /// Create a config with the given initial capacity and default growth.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            growth: GrowthPolicy::default(),
        }
    }

    /// Replace the growth policy.
    pub fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }
}
