//! Worker slot (component B).
//!
//! One fixed position in the pool: a priority heap guarded by its own
//! mutex, plus an atomic depth counter so the dispatcher's least-loaded
//! heuristic can read an approximate queue length without taking the lock.
//!
//! The mutex here is strictly a leaf: nothing is done under it besides
//! heap manipulation — no I/O, no other lock, no condvar wait.

use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use taskpool_core::PriorityTask;

pub(crate) type BoxedJob = Box<dyn FnOnce() + Send>;

pub(crate) struct WorkerSlot {
    heap: Mutex<BinaryHeap<PriorityTask<BoxedJob>>>,
    depth: AtomicUsize,
}

impl WorkerSlot {
    pub fn new() -> Self {
        Self {
            heap: Mutex::new(BinaryHeap::new()),
            depth: AtomicUsize::new(0),
        }
    }

    /// Approximate queue length. Lock-free; a hint for the dispatcher's
    /// least-loaded scan, not an exact count.
    pub fn depth(&self) -> usize {
        self.depth.load(Ordering::Relaxed)
    }

    pub fn push(&self, task: PriorityTask<BoxedJob>) {
        let mut heap = self.heap.lock().unwrap();
        heap.push(task);
        self.depth.store(heap.len(), Ordering::Relaxed);
    }

    pub fn try_pop(&self) -> Option<BoxedJob> {
        let mut heap = self.heap.lock().unwrap();
        let task = heap.pop();
        self.depth.store(heap.len(), Ordering::Relaxed);
        task.map(|t| t.work)
    }

    /// Move every remaining job into `sink`, in priority order. Used only
    /// during shutdown drain.
    pub fn drain(&self, sink: &mut Vec<BoxedJob>) {
        let mut heap = self.heap.lock().unwrap();
        while let Some(task) = heap.pop() {
            sink.push(task.work);
        }
        self.depth.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_tracks_pushes_and_pops() {
        let slot = WorkerSlot::new();
        assert_eq!(slot.depth(), 0);
        slot.push(PriorityTask::new(1, Box::new(|| {})));
        slot.push(PriorityTask::new(2, Box::new(|| {})));
        assert_eq!(slot.depth(), 2);
        assert!(slot.try_pop().is_some());
        assert_eq!(slot.depth(), 1);
    }

    #[test]
    fn try_pop_on_empty_slot_returns_none() {
        let slot = WorkerSlot::new();
        assert!(slot.try_pop().is_none());
    }

    #[test]
    fn pop_order_follows_priority() {
        use std::sync::{Arc, Mutex as StdMutex};

        let slot = WorkerSlot::new();
        let log = Arc::new(StdMutex::new(Vec::new()));

        for (priority, tag) in [(5, "A"), (1, "B"), (3, "C")] {
            let log = log.clone();
            slot.push(PriorityTask::new(
                priority,
                Box::new(move || log.lock().unwrap().push(tag)),
            ));
        }

        while let Some(job) = slot.try_pop() {
            job();
        }

        assert_eq!(*log.lock().unwrap(), vec!["B", "C", "A"]);
    }

    #[test]
    fn drain_empties_heap_and_resets_depth() {
        let slot = WorkerSlot::new();
        slot.push(PriorityTask::new(1, Box::new(|| {})));
        slot.push(PriorityTask::new(2, Box::new(|| {})));

        let mut sink = Vec::new();
        slot.drain(&mut sink);

        assert_eq!(sink.len(), 2);
        assert_eq!(slot.depth(), 0);
        assert!(slot.try_pop().is_none());
    }
}
