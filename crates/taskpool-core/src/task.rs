//! Priority task record (component A).
//!
//! The record orders purely on priority; the payload is opaque and never
//! compared. The heap (a `BinaryHeap`, which is a max-heap) must therefore
//! extract the *smallest* priority first, so `Ord` is reversed relative to
//! the integer itself: numerically smaller priority sorts greater.

use std::cmp::Ordering;

/// A unit of work paired with an integer priority.
///
/// Lower `priority` values run first. `work` is opaque to ordering — two
/// records with equal priority compare equal for heap purposes even though
/// their payloads differ; tie order is unspecified.
pub struct PriorityTask<W> {
    pub work: W,
    pub priority: i32,
}

impl<W> PriorityTask<W> {
    pub fn new(priority: i32, work: W) -> Self {
        Self { work, priority }
    }
}

impl<W> PartialEq for PriorityTask<W> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl<W> Eq for PriorityTask<W> {}

impl<W> PartialOrd for PriorityTask<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W> Ord for PriorityTask<W> {
    // Reversed: BinaryHeap is a max-heap, we want min-priority-first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.cmp(&self.priority)
    }
}
