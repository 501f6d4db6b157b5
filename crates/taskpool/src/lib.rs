//! # taskpool
//!
//! A multi-worker task executor with per-worker priority queues, work
//! stealing, and a global overflow channel for fire-and-forget work.
//!
//! Submissions are routed to the least-loaded worker slot at submission
//! time. Each worker drains its own slot in priority order (lower integer
//! = more urgent), falls back to stealing from other slots in index
//! order, then to the shared global channel, before backing off. `pause`,
//! `resume`, and `stop` give deterministic, wakeup-safe lifecycle control;
//! dropping a [`Pool`] stops it, joins every worker (each draining its
//! slot inline), and drains any residual global-channel jobs.
//!
//! ```
//! use taskpool::Pool;
//!
//! let pool = Pool::with_config(taskpool::PoolConfig::new().workers(2));
//! let handle = pool.submit_with_priority(1, || 2 + 2);
//! assert_eq!(handle.await_result().unwrap(), 4);
//! ```
//!
//! ## Modules
//!
//! - `config` — [`PoolConfig`], builder + environment overrides
//! - `handle` — the one-shot [`JoinHandle`] result slot
//! - `slot` — per-worker priority heap
//! - `pool` — dispatcher, worker loop, lifecycle controller

mod config;
mod handle;
mod pool;
mod slot;

pub use config::PoolConfig;
pub use handle::{JoinHandle, Poll, TaskOutcome};
pub use pool::{EmptyJob, Pool, EMPTY_TASK};

pub use taskpool_core::PoolError;
