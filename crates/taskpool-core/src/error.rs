//! Pool-level error types.
//!
//! These cover failures of the pool itself (submission rejected, task
//! cancelled by shutdown policy, empty callback). A task's own fault is a
//! separate, generic channel carried by the result handle — it is never
//! wrapped here.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// The pool is stopping or has stopped; the submission was refused.
    ShuttingDown,
    /// The task was discarded without executing (cancel-on-stop policies only).
    Cancelled,
    /// A callback submission carried no work to run.
    EmptyTask,
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShuttingDown => write!(f, "pool is shutting down"),
            Self::Cancelled => write!(f, "task cancelled before execution"),
            Self::EmptyTask => write!(f, "empty task submitted"),
        }
    }
}

impl std::error::Error for PoolError {}

pub type Result<T> = std::result::Result<T, PoolError>;
