//! # taskpool-core
//!
//! Foundational, dependency-free types shared by the `taskpool` crate.
//!
//! This crate is deliberately minimal: priority-ordering for task records,
//! the pool-level error taxonomy, environment-variable parsing, and a
//! small hand-rolled diagnostics facade. No scheduling logic lives here —
//! that is `taskpool`'s job.
//!
//! ## Modules
//!
//! - `task` — priority task record, ordered for heap discipline
//! - `error` — pool-level error taxonomy
//! - `env` — environment variable parsing helpers
//! - `log` — leveled diagnostic print macros

pub mod env;
pub mod error;
pub mod log;
pub mod task;

pub use error::{PoolError, Result};
pub use task::PriorityTask;
