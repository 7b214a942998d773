// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker lifecycle state

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle state of a job worker.
///
/// ```text
/// Idle ──dequeue──▶ Running ──callback──▶ Idle
///   │                  │
///   └──stop requested──┴──▶ Stopping ──drained──▶ Stopped
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerState {
    /// Waiting for a trigger (or not yet started)
    Idle,
    /// Executing a handler
    Running,
    /// Stop requested; the run loop has not finished draining
    Stopping,
    /// Terminal: queue drained, thread exited or exiting
    Stopped,
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerState::Idle => write!(f, "idle"),
            WorkerState::Running => write!(f, "running"),
            WorkerState::Stopping => write!(f, "stopping"),
            WorkerState::Stopped => write!(f, "stopped"),
        }
    }
}

/// What the run loop itself has recorded. `Stopping` is never stored: it is
/// derived from the stop flag so that external threads only ever write the
/// flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum Phase {
    Idle = 0,
    Running = 1,
    Stopped = 2,
}

/// Single-writer phase cell, written only by the run loop thread.
#[derive(Debug)]
pub(crate) struct PhaseCell(AtomicU8);

impl PhaseCell {
    pub(crate) fn new() -> Self {
        Self(AtomicU8::new(Phase::Idle as u8))
    }

    pub(crate) fn load(&self) -> Phase {
        match self.0.load(Ordering::Acquire) {
            1 => Phase::Running,
            2 => Phase::Stopped,
            _ => Phase::Idle,
        }
    }

    pub(crate) fn store(&self, phase: Phase) {
        self.0.store(phase as u8, Ordering::Release);
    }
}

impl Phase {
    pub(crate) fn observed(self, stop_requested: bool) -> WorkerState {
        match self {
            Phase::Stopped => WorkerState::Stopped,
            _ if stop_requested => WorkerState::Stopping,
            Phase::Running => WorkerState::Running,
            Phase::Idle => WorkerState::Idle,
        }
    }
}
