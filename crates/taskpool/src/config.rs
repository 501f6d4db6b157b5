//! Pool configuration.
//!
//! Provides compile-time defaults with runtime environment overrides.
//!
//! # Configuration Priority (highest wins)
//!
//! 1. Environment variables (runtime)
//! 2. Explicit builder calls
//! 3. Library defaults
//!
//! # Example
//!
//! ```
//! use taskpool::PoolConfig;
//! use std::time::Duration;
//!
//! let config = PoolConfig::from_env().pause_backoff(Duration::from_millis(2));
//! ```

use std::time::Duration;

use taskpool_core::env::env_get;

mod defaults {
    pub const PAUSE_BACKOFF_US: u64 = 1_000; // 1ms, matches the source thread pool
    pub const DEBUG_LOGGING: bool = false;
}

/// Builder-pattern settings for a [`crate::Pool`].
///
/// `num_workers` defaults to the detected hardware parallelism, clamped to
/// at least 1. Everything else has a fixed compiled default that can be
/// overridden either by the builder or by environment variables.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of worker threads (and worker slots).
    pub num_workers: usize,
    /// How long a worker sleeps per iteration while the pool is paused.
    pub pause_backoff: Duration,
    /// Enable `Debug`-level diagnostics by default.
    pub debug_logging: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolConfig {
    /// Compiled defaults, no environment override.
    pub fn new() -> Self {
        Self {
            num_workers: detected_parallelism(),
            pause_backoff: Duration::from_micros(defaults::PAUSE_BACKOFF_US),
            debug_logging: defaults::DEBUG_LOGGING,
        }
    }

    /// Create config from compile-time defaults with environment overrides.
    ///
    /// Environment variables (all optional):
    /// - `TASKPOOL_WORKERS` — number of worker threads
    /// - `TASKPOOL_PAUSE_BACKOFF_US` — pause back-off interval, in microseconds
    /// - `TASKPOOL_DEBUG` — enable debug logging (0/1/true/false/yes/no/on/off)
    pub fn from_env() -> Self {
        let defaults = Self::new();
        Self {
            num_workers: env_get("TASKPOOL_WORKERS", defaults.num_workers).max(1),
            pause_backoff: Duration::from_micros(env_get(
                "TASKPOOL_PAUSE_BACKOFF_US",
                defaults::PAUSE_BACKOFF_US,
            )),
            debug_logging: taskpool_core::env::env_get_bool(
                "TASKPOOL_DEBUG",
                defaults.debug_logging,
            ),
        }
    }

    pub fn workers(mut self, n: usize) -> Self {
        self.num_workers = n.max(1);
        self
    }

    pub fn pause_backoff(mut self, d: Duration) -> Self {
        self.pause_backoff = d;
        self
    }

    pub fn debug_logging(mut self, enable: bool) -> Self {
        self.debug_logging = enable;
        self
    }
}

fn detected_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .max(1)
}
