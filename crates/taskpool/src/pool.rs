//! The dispatcher, worker loop, and lifecycle controller (components E, F, G).

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::Duration;

use crossbeam_queue::SegQueue;
use taskpool_core::{pool_debug, pool_error, pool_warn, PoolError, PriorityTask};

use crate::config::PoolConfig;
use crate::handle::{self, JoinHandle, TaskOutcome};
use crate::slot::{BoxedJob, WorkerSlot};

const BACKOFF_WAIT: Duration = Duration::from_micros(200);

/// The documented sentinel for "no work, callback only" in
/// [`Pool::submit_with_callback`]. A closure value can never be "null" in
/// safe Rust, so the empty-task case is represented as `None` against this
/// alias rather than a real absent-callable.
pub type EmptyJob = fn();

/// Pass `taskpool::EMPTY_TASK` as the `work` argument of
/// [`Pool::submit_with_callback`] to exercise the empty-task rejection path.
pub const EMPTY_TASK: Option<EmptyJob> = None;

struct Signal {
    mutex: Mutex<()>,
    condvar: Condvar,
}

impl Signal {
    fn new() -> Self {
        Self {
            mutex: Mutex::new(()),
            condvar: Condvar::new(),
        }
    }

    fn notify_one(&self) {
        self.condvar.notify_one();
    }

    fn notify_all(&self) {
        self.condvar.notify_all();
    }

    /// Wait up to `BACKOFF_WAIT`, whether or not anyone signals. Used only
    /// as a CPU-friendly back-off between empty poll attempts; callers
    /// always re-check `stopping`/`paused` on the next loop iteration.
    fn wait_briefly(&self) {
        let guard = self.mutex.lock().unwrap();
        let _ = self.condvar.wait_timeout(guard, BACKOFF_WAIT);
    }
}

struct PoolInner {
    slots: Vec<WorkerSlot>,
    global: SegQueue<BoxedJob>,
    stopping: AtomicBool,
    paused: AtomicBool,
    signal: Signal,
    config: PoolConfig,
}

/// A fixed-size pool of worker threads, each owning a priority queue, with
/// work stealing across slots and a global overflow channel for
/// fire-and-forget callback submissions.
pub struct Pool {
    inner: Arc<PoolInner>,
    threads: Vec<thread::JoinHandle<()>>,
}

impl Pool {
    /// Construct a pool sized and configured from the environment
    /// (see [`PoolConfig::from_env`]).
    pub fn new() -> Self {
        Self::with_config(PoolConfig::from_env())
    }

    /// Construct a pool with an explicit configuration.
    pub fn with_config(config: PoolConfig) -> Self {
        taskpool_core::log::configure(config.debug_logging);

        let num_workers = config.num_workers;
        let slots = (0..num_workers).map(|_| WorkerSlot::new()).collect();

        let inner = Arc::new(PoolInner {
            slots,
            global: SegQueue::new(),
            stopping: AtomicBool::new(false),
            paused: AtomicBool::new(false),
            signal: Signal::new(),
            config,
        });

        let threads = (0..num_workers)
            .map(|worker_id| {
                let inner = Arc::clone(&inner);
                thread::Builder::new()
                    .name(format!("taskpool-worker-{worker_id}"))
                    .spawn(move || worker_loop(inner, worker_id))
                    .expect("failed to spawn taskpool worker thread")
            })
            .collect();

        pool_debug!("pool started with {} workers", num_workers);
        Pool { inner, threads }
    }

    /// Number of worker slots (and OS threads) this pool owns.
    pub fn worker_count(&self) -> usize {
        self.inner.slots.len()
    }

    pub fn is_paused(&self) -> bool {
        self.inner.paused.load(Ordering::Acquire)
    }

    pub fn is_stopping(&self) -> bool {
        self.inner.stopping.load(Ordering::Acquire)
    }

    /// Submit work at priority 0.
    pub fn submit<F, T>(&self, work: F) -> JoinHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        self.submit_with_priority(0, work)
    }

    /// Submit work at the given priority. Lower values run first.
    pub fn submit_with_priority<F, T>(&self, priority: i32, work: F) -> JoinHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        if self.inner.stopping.load(Ordering::Acquire) {
            return handle::prefaulted(TaskOutcome::ShuttingDown);
        }

        let (sink, join_handle) = handle::new_pair::<T>();
        let job: BoxedJob = Box::new(move || {
            match std::panic::catch_unwind(AssertUnwindSafe(work)) {
                Ok(value) => sink.fulfil(value),
                Err(payload) => sink.fault(TaskOutcome::Panicked(panic_message(&payload))),
            }
        });

        let target = self.least_loaded_slot();
        self.inner.slots[target].push(PriorityTask::new(priority, job));
        self.inner.signal.notify_one();
        join_handle
    }

    /// Fire-and-forget submission through the global overflow channel.
    ///
    /// `work` is `Some` for the normal case; pass `EMPTY_TASK` (or any other
    /// `None`) to exercise the documented empty-task rejection path, which
    /// returns `Err(PoolError::EmptyTask)` without enqueuing anything.
    /// Rejects with `Err(PoolError::ShuttingDown)` if the pool is already
    /// stopping. On success, `callback` always runs, even if `work` panics
    /// (the panic is logged first). Neither path returns a result handle.
    pub fn submit_with_callback<F, C>(
        &self,
        work: Option<F>,
        callback: C,
    ) -> Result<(), PoolError>
    where
        F: FnOnce() + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        if self.inner.stopping.load(Ordering::Acquire) {
            return Err(PoolError::ShuttingDown);
        }

        let Some(work) = work else {
            pool_warn!("empty task submitted to submit_with_callback, rejecting");
            return Err(PoolError::EmptyTask);
        };

        let job: BoxedJob = Box::new(move || {
            if let Err(payload) = std::panic::catch_unwind(AssertUnwindSafe(work)) {
                pool_error!("callback task panicked: {}", panic_message(&payload));
            }
            callback();
        });
        self.inner.global.push(job);
        self.inner.signal.notify_one();
        Ok(())
    }

    /// Least-loaded scan used by the dispatcher. Reads depths without
    /// taking any slot lock — advisory, not exact. Ties go to the lowest
    /// index.
    fn least_loaded_slot(&self) -> usize {
        let mut best = 0;
        let mut best_depth = self.inner.slots[0].depth();
        for (i, slot) in self.inner.slots.iter().enumerate().skip(1) {
            let depth = slot.depth();
            if depth < best_depth {
                best = i;
                best_depth = depth;
            }
        }
        best
    }

    /// Stop new work from being pulled while letting in-flight tasks
    /// finish. Idempotent.
    pub fn pause(&self) {
        self.inner.paused.store(true, Ordering::Release);
    }

    /// Resume pulling work. Idempotent.
    pub fn resume(&self) {
        self.inner.paused.store(false, Ordering::Release);
        self.inner.signal.notify_all();
    }

    /// Stop accepting new submissions and signal workers to drain and
    /// exit. One-way; calling twice is harmless.
    pub fn stop(&self) {
        self.inner.stopping.store(true, Ordering::Release);
        self.inner.signal.notify_all();
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Pool {
    fn drop(&mut self) {
        self.stop();
        for t in self.threads.drain(..) {
            let _ = t.join();
        }
        // Backstop: a job could have landed in the global channel in the
        // narrow window between the last worker's drain and its exit.
        while let Some(job) = self.inner.global.pop() {
            job();
        }
        pool_debug!("pool destroyed");
    }
}

fn worker_loop(inner: Arc<PoolInner>, worker_id: usize) {
    taskpool_core::log::set_worker_id(worker_id);
    let slot_count = inner.slots.len();

    while !inner.stopping.load(Ordering::Acquire) {
        if inner.paused.load(Ordering::Acquire) {
            thread::sleep(inner.config.pause_backoff);
            continue;
        }

        if let Some(job) = inner.slots[worker_id].try_pop() {
            job();
            continue;
        }

        let mut stolen = None;
        for j in 0..slot_count {
            if j == worker_id {
                continue;
            }
            if let Some(job) = inner.slots[j].try_pop() {
                stolen = Some(job);
                break;
            }
        }
        if let Some(job) = stolen {
            job();
            continue;
        }

        if let Some(job) = inner.global.pop() {
            job();
            continue;
        }

        inner.signal.wait_briefly();
    }

    // Shutdown: drain this slot and the global channel inline so no
    // accepted task is silently dropped.
    let mut remaining = Vec::new();
    inner.slots[worker_id].drain(&mut remaining);
    for job in remaining {
        job();
    }
    while let Some(job) = inner.global.pop() {
        job();
    }

    taskpool_core::log::clear_worker_id();
    pool_debug!("worker {worker_id} exiting");
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        pool_warn!("task panicked with a non-string payload");
        "non-string panic payload".to_string()
    }
}
