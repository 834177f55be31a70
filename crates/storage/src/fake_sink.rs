// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory [`LogSink`] with failure injection, for tests.

use crate::LogSink;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Default)]
struct SinkState {
    written: Mutex<Vec<u8>>,
    fail_write: AtomicBool,
    fail_flush: AtomicBool,
    fail_sync: AtomicBool,
    panic_on_flush: AtomicBool,
    stall_write: Mutex<Option<Duration>>,
    writes_started: AtomicU32,
    flushes: AtomicU32,
    syncs: AtomicU32,
}

/// Records everything written; clones share state.
#[derive(Clone, Default)]
pub struct FakeSink {
    state: Arc<SinkState>,
}

impl FakeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_write(&self, fail: bool) {
        self.state.fail_write.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_flush(&self, fail: bool) {
        self.state.fail_flush.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_sync(&self, fail: bool) {
        self.state.fail_sync.store(fail, Ordering::SeqCst);
    }

    pub fn set_panic_on_flush(&self, panic: bool) {
        self.state.panic_on_flush.store(panic, Ordering::SeqCst);
    }

    /// Make every subsequent write block for `duration`.
    pub fn set_stall_write(&self, duration: Option<Duration>) {
        *self.state.stall_write.lock().unwrap() = duration;
    }

    pub fn writes_started(&self) -> u32 {
        self.state.writes_started.load(Ordering::SeqCst)
    }

    pub fn flushes(&self) -> u32 {
        self.state.flushes.load(Ordering::SeqCst)
    }

    pub fn syncs(&self) -> u32 {
        self.state.syncs.load(Ordering::SeqCst)
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.state.written.lock().unwrap().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for FakeSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.state.writes_started.fetch_add(1, Ordering::SeqCst);
        let stall = *self.state.stall_write.lock().unwrap();
        if let Some(duration) = stall {
            thread::sleep(duration);
        }
        if self.state.fail_write.load(Ordering::SeqCst) {
            return Err(io::Error::other("injected write failure"));
        }
        self.state.written.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.state.panic_on_flush.load(Ordering::SeqCst) {
            panic!("injected flush panic");
        }
        if self.state.fail_flush.load(Ordering::SeqCst) {
            return Err(io::Error::other("injected flush failure"));
        }
        self.state.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl LogSink for FakeSink {
    fn sync(&mut self) -> io::Result<()> {
        if self.state.fail_sync.load(Ordering::SeqCst) {
            return Err(io::Error::other("injected sync failure"));
        }
        self.state.syncs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Poll `condition` until it holds or `timeout` elapses.
pub fn wait_for(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    condition()
}
