//! Result handle (component D).
//!
//! A one-shot slot shared between the submitting thread (producer) and the
//! worker that eventually executes the task (consumer). Life states:
//! *pending* → *fulfilled-with-value* | *fulfilled-with-fault* | *abandoned*.
//! Fulfilment is monotonic — once non-pending, a handle never changes state
//! again.

use std::fmt;
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

/// Why a task did not produce a value.
#[derive(Debug, Clone)]
pub enum TaskOutcome {
    /// The pool refused the submission outright (already stopping).
    ShuttingDown,
    /// The task was discarded without executing (cancel-on-stop policies).
    Cancelled,
    /// The task's work panicked; this is its captured message, if any.
    Panicked(String),
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShuttingDown => write!(f, "pool is shutting down"),
            Self::Cancelled => write!(f, "task cancelled before execution"),
            Self::Panicked(msg) => write!(f, "task panicked: {msg}"),
        }
    }
}

impl std::error::Error for TaskOutcome {}

enum State<T> {
    Pending,
    Value(T),
    Fault(TaskOutcome),
}

struct Inner<T> {
    state: Mutex<State<T>>,
    condvar: Condvar,
}

/// The producer side of a result handle. Held by the wrapped closure that
/// runs on the worker thread.
pub(crate) struct ResultSink<T> {
    inner: Arc<Inner<T>>,
}

impl<T> ResultSink<T> {
    pub fn fulfil(self, value: T) {
        let mut state = self.inner.state.lock().unwrap();
        *state = State::Value(value);
        drop(state);
        self.inner.condvar.notify_all();
    }

    pub fn fault(self, outcome: TaskOutcome) {
        let mut state = self.inner.state.lock().unwrap();
        *state = State::Fault(outcome);
        drop(state);
        self.inner.condvar.notify_all();
    }
}

/// The consumer side of a result handle, returned to whoever submitted the
/// task.
pub struct JoinHandle<T> {
    inner: Arc<Inner<T>>,
}

/// Non-blocking snapshot of a [`JoinHandle`]'s state.
pub enum Poll<T> {
    Pending,
    Ready(Result<T, TaskOutcome>),
}

pub(crate) fn new_pair<T>() -> (ResultSink<T>, JoinHandle<T>) {
    let inner = Arc::new(Inner {
        state: Mutex::new(State::Pending),
        condvar: Condvar::new(),
    });
    (
        ResultSink { inner: inner.clone() },
        JoinHandle { inner },
    )
}

/// Build a handle that is already in a faulted terminal state — used when a
/// submission is rejected synchronously (e.g. the pool is stopping).
pub(crate) fn prefaulted<T>(outcome: TaskOutcome) -> JoinHandle<T> {
    let inner = Arc::new(Inner {
        state: Mutex::new(State::Fault(outcome)),
        condvar: Condvar::new(),
    });
    JoinHandle { inner }
}

impl<T> JoinHandle<T> {
    /// Block until the task reaches a terminal state, then return its
    /// outcome.
    pub fn await_result(self) -> Result<T, TaskOutcome> {
        let mut state = self.inner.state.lock().unwrap();
        loop {
            match &*state {
                State::Pending => {
                    state = self.inner.condvar.wait(state).unwrap();
                }
                State::Value(_) => {
                    return match std::mem::replace(&mut *state, State::Pending) {
                        State::Value(v) => Ok(v),
                        _ => unreachable!(),
                    };
                }
                State::Fault(_) => {
                    return match std::mem::replace(&mut *state, State::Pending) {
                        State::Fault(e) => Err(e),
                        _ => unreachable!(),
                    };
                }
            }
        }
    }

    /// Block until the task reaches a terminal state or `timeout` elapses.
    ///
    /// Returns `None` on timeout; the handle remains usable afterward.
    pub fn await_timeout(&self, timeout: Duration) -> Option<Poll<T>>
    where
        T: Clone,
    {
        let state = self.inner.state.lock().unwrap();
        let (state, timed_out) = self
            .inner
            .condvar
            .wait_timeout_while(state, timeout, |s| matches!(s, State::Pending))
            .unwrap();
        if timed_out.timed_out() {
            return None;
        }
        Some(match &*state {
            State::Pending => Poll::Pending,
            State::Value(v) => Poll::Ready(Ok(v.clone())),
            State::Fault(e) => Poll::Ready(Err(e.clone_for_poll())),
        })
    }

    /// Non-blocking inspection of the handle's current state.
    pub fn try_poll(&self) -> Poll<T>
    where
        T: Clone,
    {
        let state = self.inner.state.lock().unwrap();
        match &*state {
            State::Pending => Poll::Pending,
            State::Value(v) => Poll::Ready(Ok(v.clone())),
            State::Fault(e) => Poll::Ready(Err(e.clone_for_poll())),
        }
    }

    /// True once the handle has reached a terminal state.
    pub fn is_finished(&self) -> bool {
        !matches!(&*self.inner.state.lock().unwrap(), State::Pending)
    }
}

impl TaskOutcome {
    fn clone_for_poll(&self) -> Self {
        self.clone()
    }
}


impl<T> fmt::Debug for Poll<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Poll::Pending => write!(f, "Poll::Pending"),
            Poll::Ready(Ok(_)) => write!(f, "Poll::Ready(Ok(_))"),
            Poll::Ready(Err(e)) => write!(f, "Poll::Ready(Err({e:?}))"),
        }
    }
}
