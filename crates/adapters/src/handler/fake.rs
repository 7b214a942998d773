// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake job handler for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{HandlerError, JobHandler};
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tw_core::{ExecutionContext, ExecutionOutcome};

struct FakeHandlerState {
    calls: Vec<ExecutionContext>,
    gate_open: bool,
    fail_with: Option<String>,
}

struct Shared {
    state: Mutex<FakeHandlerState>,
    changed: Condvar,
}

/// Handler that records every invocation and echoes params as its message.
///
/// A gated handler blocks inside `execute` until [`FakeHandler::open`] is
/// called, which lets tests hold a worker in the Running state.
#[derive(Clone)]
pub struct FakeHandler {
    inner: Arc<Shared>,
}

impl Default for FakeHandler {
    fn default() -> Self {
        Self::with_gate(true)
    }
}

impl FakeHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handler that blocks until opened.
    pub fn gated() -> Self {
        Self::with_gate(false)
    }

    /// Handler that returns `HandlerError::Failed(message)`.
    pub fn failing(message: &str) -> Self {
        let handler = Self::new();
        handler.inner.state.lock().fail_with = Some(message.to_string());
        handler
    }

    fn with_gate(gate_open: bool) -> Self {
        Self {
            inner: Arc::new(Shared {
                state: Mutex::new(FakeHandlerState {
                    calls: Vec::new(),
                    gate_open,
                    fail_with: None,
                }),
                changed: Condvar::new(),
            }),
        }
    }

    /// Release every blocked and future invocation.
    pub fn open(&self) {
        self.inner.state.lock().gate_open = true;
        self.inner.changed.notify_all();
    }

    /// Contexts of every invocation so far, including blocked ones.
    pub fn calls(&self) -> Vec<ExecutionContext> {
        self.inner.state.lock().calls.clone()
    }

    /// Params of every invocation, in call order.
    pub fn executed_params(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.params).collect()
    }

    /// Wait until at least `n` invocations have started.
    pub fn wait_for_calls(&self, n: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.inner.state.lock();
        while state.calls.len() < n {
            if self
                .inner
                .changed
                .wait_until(&mut state, deadline)
                .timed_out()
            {
                return state.calls.len() >= n;
            }
        }
        true
    }
}

impl JobHandler for FakeHandler {
    fn execute(&self, ctx: &ExecutionContext) -> Result<ExecutionOutcome, HandlerError> {
        let mut state = self.inner.state.lock();
        state.calls.push(ctx.clone());
        self.inner.changed.notify_all();
        while !state.gate_open {
            self.inner.changed.wait(&mut state);
        }
        match &state.fail_with {
            Some(message) => Err(HandlerError::Failed(message.clone())),
            None => Ok(ExecutionOutcome::success_with(ctx.params.clone())),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
