//! Lifecycle-observing value types for dynarray tests.
//!
//! Provides [`Vector2`], a small 2D point whose clones and drops can be
//! counted through a shared [`LifecycleTracker`]. Rust moves are bitwise and
//! unobservable, so the tracker counts the operations that do run user
//! code: construction, clone and drop.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Counters {
    created: Cell<usize>,
    clones: Cell<usize>,
    drops: Cell<usize>,
    dropped: RefCell<Vec<(f32, f32)>>,
}

/// Shared counters for a family of tracked [`Vector2`] values.
///
/// Cloning the tracker shares the same counters.
#[derive(Clone, Debug, Default)]
pub struct LifecycleTracker {
    counters: Rc<Counters>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values created through [`Vector2::tracked`].
    pub fn created(&self) -> usize {
        self.counters.created.get()
    }

    pub fn clones(&self) -> usize {
        self.counters.clones.get()
    }

    pub fn drops(&self) -> usize {
        self.counters.drops.get()
    }

    /// Tracked values currently alive.
    pub fn live(&self) -> usize {
        self.created() + self.clones() - self.drops()
    }

    /// Coordinates of every dropped value, in drop order.
    pub fn dropped(&self) -> Vec<(f32, f32)> {
        self.counters.dropped.borrow().clone()
    }

    /// Zero all counters and forget the drop log.
    pub fn reset(&self) {
        self.counters.created.set(0);
        self.counters.clones.set(0);
        self.counters.drops.set(0);
        self.counters.dropped.borrow_mut().clear();
    }
}

/// A 2D point with optional lifecycle tracking.
///
/// Equality and `Display` only look at the coordinates. The default value
/// is `(1.0, 1.0)`.
#[derive(Debug)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
    tracker: Option<LifecycleTracker>,
}

impl Vector2 {
    /// An untracked point.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            tracker: None,
        }
    }

    /// A point whose clones and drops are recorded by `tracker`.
    pub fn tracked(x: f32, y: f32, tracker: &LifecycleTracker) -> Self {
        let counters = &tracker.counters;
        counters.created.set(counters.created.get() + 1);
        Self {
            x,
            y,
            tracker: Some(tracker.clone()),
        }
    }
}

impl Default for Vector2 {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Clone for Vector2 {
    fn clone(&self) -> Self {
        if let Some(tracker) = &self.tracker {
            let counters = &tracker.counters;
            counters.clones.set(counters.clones.get() + 1);
        }
        Self {
            x: self.x,
            y: self.y,
            tracker: self.tracker.clone(),
        }
    }
}

impl Drop for Vector2 {
    fn drop(&mut self) {
        if let Some(tracker) = &self.tracker {
            let counters = &tracker.counters;
            counters.drops.set(counters.drops.get() + 1);
            counters.dropped.borrow_mut().push((self.x, self.y));
        }
    }
}

impl PartialEq for Vector2 {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// `n` tracked points `(i, i + 1)` for `i in 0..n`.
pub fn tracked_points(n: usize, tracker: &LifecycleTracker) -> Vec<Vector2> {
    (0..n)
        .map(|i| Vector2::tracked(i as f32, i as f32 + 1.0, tracker))
        .collect()
}
