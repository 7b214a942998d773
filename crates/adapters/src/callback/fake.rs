// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake callback sink for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::CallbackSink;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tw_core::{CallbackRecord, LogId};

struct Shared {
    calls: Mutex<Vec<CallbackRecord>>,
    delivered: Condvar,
}

/// Callback sink that records deliveries and lets tests wait for them
#[derive(Clone)]
pub struct FakeCallbackSink {
    inner: Arc<Shared>,
}

impl Default for FakeCallbackSink {
    fn default() -> Self {
        Self {
            inner: Arc::new(Shared {
                calls: Mutex::new(Vec::new()),
                delivered: Condvar::new(),
            }),
        }
    }
}

impl FakeCallbackSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded callbacks
    pub fn calls(&self) -> Vec<CallbackRecord> {
        self.inner.calls.lock().clone()
    }

    /// Log ids in delivery order
    pub fn log_ids(&self) -> Vec<i64> {
        self.calls().iter().map(|c| c.log_id.get()).collect()
    }

    /// Callbacks delivered for `log_id`
    pub fn calls_for(&self, log_id: i64) -> Vec<CallbackRecord> {
        let log_id = LogId::new(log_id);
        self.calls()
            .into_iter()
            .filter(|c| c.log_id == log_id)
            .collect()
    }

    /// Wait until at least `n` callbacks have been delivered, then return
    /// everything recorded so far (possibly fewer than `n` on timeout).
    pub fn wait_for(&self, n: usize, timeout: Duration) -> Vec<CallbackRecord> {
        let deadline = Instant::now() + timeout;
        let mut calls = self.inner.calls.lock();
        while calls.len() < n {
            if self
                .inner
                .delivered
                .wait_until(&mut calls, deadline)
                .timed_out()
            {
                break;
            }
        }
        calls.clone()
    }
}

impl CallbackSink for FakeCallbackSink {
    fn deliver(&self, callback: CallbackRecord) {
        self.inner.calls.lock().push(callback);
        self.inner.delivered.notify_all();
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
