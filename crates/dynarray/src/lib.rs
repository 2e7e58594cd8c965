//! Contiguous, growable arrays with explicit storage lifecycle control.
//!
//! [`DynArray`] owns a single heap buffer of `T` and tracks the number of
//! live elements separately from the number of allocated slots. Every
//! reallocation happens at a documented point (append into a full buffer,
//! [`reserve`](DynArray::reserve), [`reserve_capacity`](DynArray::reserve_capacity),
//! [`shrink_to_fit`](DynArray::shrink_to_fit)) and is reported through
//! `tracing` at trace level.
//!
//! # Architecture
//!
//! ```text
//! DynArray<T>
//! ├── RawBuffer<T>   (allocation of `capacity` uninitialised slots)
//! ├── len            (slots [0, len) are live)
//! └── GrowthPolicy   (ByOne | Double, applied when a push finds no room)
//! ```
//!
//! # Precondition failures
//!
//! Out-of-range indexing, [`remove_at`](DynArray::remove_at) with a bad
//! index and [`pop_back`](DynArray::pop_back) on an empty array panic. Each
//! has a checked counterpart ([`get`](DynArray::get),
//! [`try_remove_at`](DynArray::try_remove_at), [`pop`](DynArray::pop)) and
//! indexing also has an `unsafe` unchecked path.
//!
//! # Unsafe code
//!
//! `unsafe` is confined to `raw.rs` (allocator calls), `array.rs` and
//! `iter.rs` (slot reads/writes). Every block carries a `// SAFETY:` comment.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod array;
pub mod config;
pub mod error;
pub mod iter;
mod raw;

// Public re-exports for the primary API surface.
pub use array::DynArray;
pub use config::{ArrayConfig, GrowthPolicy};
pub use error::ArrayError;
pub use iter::IntoIter;
