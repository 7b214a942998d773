// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One worker per job id, with block strategies applied on trigger.

use crate::config::WorkerConfig;
use crate::error::PoolError;
use crate::worker::{EnqueueOutcome, JobWorker, RejectReason, WorkerState};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tw_adapters::{CallbackSink, HandlerResolver};
use tw_core::{BlockStrategy, JobId, TriggerRecord};

/// Stop reason given to a worker replaced because its handler changed.
pub const HANDLER_CHANGED_REASON: &str =
    "change handler or glue type, and terminate the old job thread";

/// Stop reason given to a busy worker replaced by `COVER_EARLY`.
pub const COVER_EARLY_REASON: &str = "block strategy effect: Cover Early";

/// Attempts at routing one trigger when a worker stops under us
const MAX_ROUTE_ATTEMPTS: usize = 3;

type Worker<R, S> = Arc<JobWorker<R, S>>;

/// What to do with the job's current worker for an incoming trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Keep,
    Discard,
    /// Replace, interrupting the old worker with the reason if given
    Replace(Option<&'static str>),
}

/// Registry of live job workers.
pub struct WorkerPool<R, S> {
    resolver: R,
    sink: S,
    config: WorkerConfig,
    workers: Mutex<HashMap<JobId, Worker<R, S>>>,
    /// Replaced or killed workers not yet joined
    retired: Mutex<Vec<Worker<R, S>>>,
}

impl<R: HandlerResolver, S: CallbackSink> WorkerPool<R, S> {
    pub fn new(resolver: R, sink: S, config: WorkerConfig) -> Self {
        Self {
            resolver,
            sink,
            config,
            workers: Mutex::new(HashMap::new()),
            retired: Mutex::new(Vec::new()),
        }
    }

    /// Route a trigger to its job's worker, creating or replacing the worker
    /// as the block strategy and handler require.
    pub fn trigger(&self, record: TriggerRecord) -> Result<EnqueueOutcome, PoolError> {
        let mut stale: Option<Worker<R, S>> = None;
        for _ in 0..MAX_ROUTE_ATTEMPTS {
            let Some(worker) = self.route(&record, stale.as_ref())? else {
                tracing::info!(
                    job_id = %record.job_id,
                    log_id = %record.log_id,
                    strategy = %record.block_strategy,
                    "busy worker, trigger discarded"
                );
                return Ok(EnqueueOutcome::Rejected(RejectReason::Discarded));
            };
            match worker.enqueue(record.clone()) {
                EnqueueOutcome::Rejected(RejectReason::Stopped) => {
                    tracing::debug!(
                        job_id = %record.job_id,
                        "worker stopped under trigger, replacing"
                    );
                    stale = Some(worker);
                }
                outcome => return Ok(outcome),
            }
        }
        Ok(EnqueueOutcome::Rejected(RejectReason::Stopped))
    }

    /// Pick the worker for `record`, or `None` when it is to be discarded.
    fn route(
        &self,
        record: &TriggerRecord,
        stale: Option<&Worker<R, S>>,
    ) -> Result<Option<Worker<R, S>>, PoolError> {
        let job_id = record.job_id;
        let mut workers = self.workers.lock();

        let decision = workers.get(&job_id).map(|existing| match stale {
            Some(stale) if Arc::ptr_eq(stale, existing) => Decision::Replace(None),
            _ => decide(existing, record),
        });
        match decision {
            Some(Decision::Keep) => {
                if let Some(existing) = workers.get(&job_id) {
                    return Ok(Some(Arc::clone(existing)));
                }
            }
            Some(Decision::Discard) => return Ok(None),
            Some(Decision::Replace(reason)) => {
                if let Some(old) = workers.remove(&job_id) {
                    if let Some(reason) = reason {
                        tracing::info!(
                            %job_id,
                            strategy = %record.block_strategy,
                            reason,
                            "replacing worker"
                        );
                        old.interrupt(reason);
                    }
                    self.retired.lock().push(old);
                }
            }
            None => {}
        }

        let worker = Arc::new(JobWorker::new(
            job_id,
            self.resolver.clone(),
            self.sink.clone(),
            self.config.clone(),
        ));
        worker.start()?;
        workers.insert(job_id, Arc::clone(&worker));
        Ok(Some(worker))
    }

    /// Interrupt and forget the job's worker. Queued triggers are drained
    /// with `reason`.
    pub fn kill(&self, job_id: JobId, reason: &str) -> bool {
        let Some(worker) = self.workers.lock().remove(&job_id) else {
            return false;
        };
        worker.interrupt(reason);
        self.retired.lock().push(worker);
        true
    }

    /// Whether the job's worker is running a handler or has queued triggers.
    pub fn idle_beat(&self, job_id: JobId) -> bool {
        self.workers
            .lock()
            .get(&job_id)
            .is_some_and(|worker| worker.is_active())
    }

    /// Drop workers that have stopped and join their threads. Returns how
    /// many live entries were removed.
    pub fn reap(&self) -> usize {
        let mut finished: Vec<Worker<R, S>> = Vec::new();
        {
            let mut workers = self.workers.lock();
            workers.retain(|_, worker| {
                let stopped = worker.state() == WorkerState::Stopped;
                if stopped {
                    finished.push(Arc::clone(worker));
                }
                !stopped
            });
        }
        let removed = finished.len();
        {
            let mut retired = self.retired.lock();
            retired.retain(|worker| {
                let stopped = worker.state() == WorkerState::Stopped;
                if stopped {
                    finished.push(Arc::clone(worker));
                }
                !stopped
            });
        }
        for worker in &finished {
            worker.join();
        }
        if removed > 0 {
            tracing::debug!(removed, "reaped stopped workers");
        }
        removed
    }

    /// Whether any job has work running or queued.
    pub fn is_active(&self) -> bool {
        self.workers.lock().values().any(|worker| worker.is_active())
    }

    pub fn len(&self) -> usize {
        self.workers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.lock().is_empty()
    }

    pub fn worker(&self, job_id: JobId) -> Option<Worker<R, S>> {
        self.workers.lock().get(&job_id).cloned()
    }

    /// Interrupt every worker and wait for all of them to drain.
    pub fn shutdown(&self, reason: &str) {
        let mut all: Vec<Worker<R, S>> = self.workers.lock().drain().map(|(_, w)| w).collect();
        all.append(&mut self.retired.lock());
        tracing::info!(workers = all.len(), reason, "shutting down worker pool");
        for worker in &all {
            worker.interrupt(reason);
        }
        for worker in &all {
            worker.join();
        }
    }
}

fn decide<R: HandlerResolver, S: CallbackSink>(
    worker: &JobWorker<R, S>,
    record: &TriggerRecord,
) -> Decision {
    if worker.is_stop_requested() {
        return Decision::Replace(None);
    }
    if worker
        .handler_name()
        .is_some_and(|name| name != record.handler)
    {
        return Decision::Replace(Some(HANDLER_CHANGED_REASON));
    }
    if !worker.is_active() {
        return Decision::Keep;
    }
    match record.block_strategy {
        BlockStrategy::SerialExecution => Decision::Keep,
        BlockStrategy::DiscardLater => Decision::Discard,
        BlockStrategy::CoverEarly => Decision::Replace(Some(COVER_EARLY_REASON)),
    }
}

#[cfg(test)]
#[path = "pool_tests/mod.rs"]
mod tests;
