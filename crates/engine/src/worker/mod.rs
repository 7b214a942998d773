// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job worker: a trigger queue drained by one dedicated thread.
//!
//! Producers call [`JobWorker::enqueue`] from any thread. The run loop
//! executes records one at a time in acceptance order and reports exactly
//! one [`CallbackRecord`](tw_core::CallbackRecord) per accepted record,
//! whether it ran, failed, or was drained at stop.

mod queue;
mod run_loop;
mod state;

pub use state::WorkerState;

use crate::config::WorkerConfig;
use crate::error::WorkerError;
use parking_lot::Mutex;
use queue::{PushError, TriggerQueue};
use run_loop::RunLoop;
use state::{Phase, PhaseCell};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tw_adapters::{CallbackSink, HandlerResolver};
use tw_core::{BlockStrategy, JobId, LogId, TriggerRecord};

/// Stop reason recorded when the worker stops itself after idling.
pub const IDLE_TIMEOUT_REASON: &str = "idle timeout";

/// Why a trigger was not accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The log id is already queued and not yet started
    Duplicate(LogId),
    /// The worker has stopped taking records
    Stopped,
    /// Dropped by the `DISCARD_LATER` block strategy
    Discarded,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Duplicate(log_id) => write!(f, "repeat trigger job, logId:{log_id}"),
            RejectReason::Stopped => write!(f, "job worker stopped"),
            RejectReason::Discarded => write!(
                f,
                "block strategy effect: {}",
                BlockStrategy::DiscardLater.title()
            ),
        }
    }
}

/// Result of offering a trigger to a worker
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Accepted,
    Rejected(RejectReason),
}

impl EnqueueOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, EnqueueOutcome::Accepted)
    }
}

/// State shared between the handle and the run loop thread
pub(crate) struct Shared {
    pub(crate) job_id: JobId,
    pub(crate) queue: TriggerQueue,
    pub(crate) stop: AtomicBool,
    pub(crate) stop_reason: Mutex<Option<String>>,
    pub(crate) phase: PhaseCell,
    handler_name: Mutex<Option<String>>,
}

impl Shared {
    /// Record `reason` (first one wins) and raise the stop flag.
    pub(crate) fn request_stop(&self, reason: &str) -> bool {
        {
            let mut stop_reason = self.stop_reason.lock();
            if stop_reason.is_none() {
                *stop_reason = Some(reason.to_string());
            }
        }
        !self.stop.swap(true, Ordering::AcqRel)
    }

    pub(crate) fn drain_reason(&self) -> String {
        self.stop_reason
            .lock()
            .clone()
            .unwrap_or_else(|| "job worker stopped".to_string())
    }

    pub(crate) fn is_stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }
}

/// Handle to one job's worker.
///
/// Cheap to observe from any thread; `start` spawns the run loop once.
pub struct JobWorker<R, S> {
    shared: Arc<Shared>,
    pending_loop: Mutex<Option<RunLoop<R, S>>>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl<R: HandlerResolver, S: CallbackSink> JobWorker<R, S> {
    pub fn new(job_id: JobId, resolver: R, sink: S, config: WorkerConfig) -> Self {
        let shared = Arc::new(Shared {
            job_id,
            queue: TriggerQueue::new(),
            stop: AtomicBool::new(false),
            stop_reason: Mutex::new(None),
            phase: PhaseCell::new(),
            handler_name: Mutex::new(None),
        });
        let run_loop = RunLoop::new(Arc::clone(&shared), resolver, sink, config);
        Self {
            shared,
            pending_loop: Mutex::new(Some(run_loop)),
            thread: Mutex::new(None),
        }
    }

    /// Spawn the run loop thread.
    pub fn start(&self) -> Result<(), WorkerError> {
        let run_loop = self
            .pending_loop
            .lock()
            .take()
            .ok_or(WorkerError::AlreadyStarted(self.shared.job_id))?;

        let handle = std::thread::Builder::new()
            .name(format!("job-worker-{}", self.shared.job_id))
            .spawn(move || run_loop.run())?;
        *self.thread.lock() = Some(handle);
        tracing::debug!(job_id = %self.shared.job_id, "worker started");
        Ok(())
    }

    /// Offer a trigger. Never blocks beyond short critical sections.
    pub fn enqueue(&self, record: TriggerRecord) -> EnqueueOutcome {
        let log_id = record.log_id;
        let handler = record.handler.clone();
        match self.shared.queue.push(record) {
            Ok(()) => {
                *self.shared.handler_name.lock() = Some(handler);
                tracing::debug!(job_id = %self.shared.job_id, %log_id, "trigger accepted");
                EnqueueOutcome::Accepted
            }
            Err(PushError::Duplicate) => {
                tracing::info!(job_id = %self.shared.job_id, %log_id, "duplicate trigger rejected");
                EnqueueOutcome::Rejected(RejectReason::Duplicate(log_id))
            }
            Err(PushError::Closed) => {
                tracing::debug!(
                    job_id = %self.shared.job_id,
                    %log_id,
                    "worker stopped, trigger rejected"
                );
                EnqueueOutcome::Rejected(RejectReason::Stopped)
            }
        }
    }

    /// Ask the run loop to stop at its next check. Idempotent; the first
    /// reason is kept.
    pub fn request_stop(&self, reason: &str) {
        if self.shared.request_stop(reason) {
            tracing::info!(job_id = %self.shared.job_id, reason, "stop requested");
        }
    }

    /// [`request_stop`](Self::request_stop), then wake a parked idle wait.
    ///
    /// A handler that is already executing runs to completion.
    pub fn interrupt(&self, reason: &str) {
        self.request_stop(reason);
        self.shared.queue.wake();
    }

    /// Whether a handler is running or records are waiting.
    pub fn is_active(&self) -> bool {
        // Queue first: a dequeue marks Running before releasing the queue
        !self.shared.queue.is_empty() || self.shared.phase.load() == Phase::Running
    }

    pub fn state(&self) -> WorkerState {
        self.shared
            .phase
            .load()
            .observed(self.shared.is_stop_requested())
    }

    pub fn stop_reason(&self) -> Option<String> {
        self.shared.stop_reason.lock().clone()
    }

    pub fn is_stop_requested(&self) -> bool {
        self.shared.is_stop_requested()
    }

    pub fn job_id(&self) -> JobId {
        self.shared.job_id
    }

    /// Handler name of the most recently accepted trigger.
    pub fn handler_name(&self) -> Option<String> {
        self.shared.handler_name.lock().clone()
    }

    pub fn queue_len(&self) -> usize {
        self.shared.queue.len()
    }

    /// Wait for the run loop thread to exit. No-op if never started or
    /// already joined.
    pub fn join(&self) {
        let handle = self.thread.lock().take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                tracing::error!(job_id = %self.shared.job_id, "worker thread panicked");
            }
        }
    }
}

impl<R, S> fmt::Debug for JobWorker<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobWorker")
            .field("job_id", &self.shared.job_id)
            .field("queue_len", &self.shared.queue.len())
            .field("stop_requested", &self.shared.is_stop_requested())
            .finish()
    }
}

#[cfg(test)]
#[path = "../worker_tests/mod.rs"]
mod tests;
