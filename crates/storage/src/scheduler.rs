// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic background flushing of a [`LogWriter`].
//!
//! Each scheduler owns one named thread that ticks at a fixed rate and
//! flushes the writer when it is dirty. A failed flush ends the thread: no
//! automatic flushing happens for the rest of the scheduler's life, and the
//! failure is reported when the scheduler is shut down.
//!
//! ```text
//! Caller                         Flush thread
//! ─────────────────────────      ─────────────────────────────
//! start ───────────────────────→ wait until next tick or stop
//!                                  dirty? flush : skip
//!                                  ...
//! shutdown: set stop, notify ──→ wake, exit, record outcome
//!   wait for outcome (deadline)
//!   detach if none arrived
//! ```

use crate::{LogSink, LogWriter};
use evlog_core::EventLogError;
use parking_lot::{Condvar, Mutex};
use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, error};

static NEXT_THREAD_ID: AtomicUsize = AtomicUsize::new(0);

/// How a flush thread ended.
#[derive(Debug)]
pub enum FlushTaskExit {
    /// Stopped on request
    Stopped,
    /// Ended early by a flush failure
    Failed(EventLogError),
    /// Did not stop before the deadline and was left running detached
    Detached,
}

#[derive(Default)]
struct ControlState {
    stop_requested: bool,
    /// Set by the flush thread as its last action
    outcome: Option<Result<(), EventLogError>>,
}

/// Stop signal and exit notification shared with the flush thread.
#[derive(Default)]
struct Control {
    state: Mutex<ControlState>,
    changed: Condvar,
}

impl Control {
    /// Block until the next tick is due. Returns false once stop is requested.
    fn wait_for_tick(&self, next_tick: Instant) -> bool {
        let mut state = self.state.lock();
        while !state.stop_requested {
            if self.changed.wait_until(&mut state, next_tick).timed_out() {
                break;
            }
        }
        !state.stop_requested
    }

    fn finish(&self, outcome: Result<(), EventLogError>) {
        self.state.lock().outcome = Some(outcome);
        self.changed.notify_all();
    }

    fn request_stop(&self) {
        self.state.lock().stop_requested = true;
        self.changed.notify_all();
    }
}

/// Handle to a running flush thread.
pub struct FlushScheduler {
    control: Arc<Control>,
    handle: Option<JoinHandle<()>>,
    thread_name: String,
}

impl FlushScheduler {
    /// Spawn a thread that flushes `writer` every `interval` while it is dirty.
    ///
    /// The thread inherits the caller's tracing dispatcher.
    pub fn start<S: LogSink>(writer: Arc<LogWriter<S>>, interval: Duration) -> io::Result<Self> {
        let control = Arc::new(Control::default());
        let thread_name = format!(
            "event-logger-flush-{}",
            NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed)
        );
        let dispatch = tracing::dispatcher::get_default(|d| d.clone());

        let handle = {
            let control = Arc::clone(&control);
            thread::Builder::new()
                .name(thread_name.clone())
                .spawn(move || {
                    let outcome = tracing::dispatcher::with_default(&dispatch, || {
                        panic::catch_unwind(AssertUnwindSafe(|| {
                            run_flush_loop(&writer, interval, &control)
                        }))
                        .unwrap_or_else(|payload| Err(panicked(writer.path(), &*payload)))
                    });
                    control.finish(outcome);
                })?
        };

        Ok(Self {
            control,
            handle: Some(handle),
            thread_name,
        })
    }

    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    /// Whether the flush thread is still alive.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Ask the flush thread to stop and wait for it until `deadline`.
    ///
    /// A thread that has not exited by then is detached; it keeps its stop
    /// request and exits as soon as its current flush returns.
    pub fn shutdown(mut self, deadline: Instant) -> FlushTaskExit {
        let outcome = {
            let mut state = self.control.state.lock();
            state.stop_requested = true;
            self.control.changed.notify_all();
            while state.outcome.is_none() {
                if self.control.changed.wait_until(&mut state, deadline).timed_out() {
                    break;
                }
            }
            state.outcome.take()
        };

        let handle = self.handle.take();
        match outcome {
            Some(result) => {
                // The thread has recorded its outcome and is returning.
                if let Some(handle) = handle {
                    let _ = handle.join();
                }
                match result {
                    Ok(()) => FlushTaskExit::Stopped,
                    Err(err) => FlushTaskExit::Failed(err),
                }
            }
            None => FlushTaskExit::Detached,
        }
    }
}

impl Drop for FlushScheduler {
    fn drop(&mut self) {
        self.control.request_stop();
    }
}

/// Turn a flush-thread panic into a scheduled-flush failure.
fn panicked(path: &Path, payload: &(dyn Any + Send)) -> EventLogError {
    let message = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic");
    error!(path = %path.display(), panic = message, "event log flush thread panicked");
    EventLogError::ScheduledFlush {
        path: path.to_owned(),
        source: io::Error::other(format!("flush thread panicked: {message}")),
    }
}

fn run_flush_loop<S: LogSink>(
    writer: &LogWriter<S>,
    interval: Duration,
    control: &Control,
) -> Result<(), EventLogError> {
    let mut next_tick = Instant::now() + interval;
    while control.wait_for_tick(next_tick) {
        match writer.flush_if_dirty() {
            Ok(true) => debug!(path = %writer.path().display(), "flushed event log"),
            Ok(false) => {}
            Err(source) => {
                error!(
                    path = %writer.path().display(),
                    error = %source,
                    "scheduled flush of event log failed, automatic flushing stopped",
                );
                return Err(EventLogError::ScheduledFlush {
                    path: writer.path().to_owned(),
                    source,
                });
            }
        }

        // Fixed rate, but a late tick does not trigger catch-up flushes.
        next_tick += interval;
        let now = Instant::now();
        if next_tick <= now {
            next_tick = now + interval;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
