// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The worker thread body: dequeue, execute, report, repeat.

use super::queue::Next;
use super::state::Phase;
use super::{Shared, IDLE_TIMEOUT_REASON};
use crate::config::WorkerConfig;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tw_adapters::{CallbackSink, HandlerResolver};
use tw_core::{CallbackRecord, ExecutionContext, ExecutionOutcome, TriggerRecord};

pub(crate) struct RunLoop<R, S> {
    shared: Arc<Shared>,
    resolver: R,
    sink: S,
    config: WorkerConfig,
}

impl<R: HandlerResolver, S: CallbackSink> RunLoop<R, S> {
    pub(crate) fn new(shared: Arc<Shared>, resolver: R, sink: S, config: WorkerConfig) -> Self {
        Self {
            shared,
            resolver,
            sink,
            config,
        }
    }

    pub(crate) fn run(self) {
        let span = tracing::info_span!("job_worker", job_id = %self.shared.job_id);
        let _guard = span.enter();
        tracing::debug!(
            idle_timeout_ms = self.config.idle_timeout.as_millis() as u64,
            "run loop started"
        );

        loop {
            let next = self.shared.queue.next(
                &self.shared.stop,
                &self.shared.phase,
                self.config.idle_timeout,
            );
            match next {
                Next::Record(record) => {
                    self.execute(&record);
                    self.shared.phase.store(Phase::Idle);
                }
                Next::IdleTimeout => {
                    if self.shared.request_stop(IDLE_TIMEOUT_REASON) {
                        tracing::info!(reason = IDLE_TIMEOUT_REASON, "stopping idle worker");
                    }
                }
                Next::Stop => break,
            }
        }

        self.drain();
        self.shared.phase.store(Phase::Stopped);
        tracing::info!("run loop stopped");
    }

    /// Report every record still queued as killed.
    fn drain(&self) {
        let reason = self.shared.drain_reason();
        let drained = self.shared.queue.close_and_drain();
        if !drained.is_empty() {
            tracing::info!(count = drained.len(), reason = %reason, "draining queued triggers");
        }
        for record in drained {
            let outcome = ExecutionOutcome::failure(format!(
                "{reason} [job not executed, in the job queue, killed.]"
            ));
            self.deliver(&record, outcome);
        }
    }

    fn execute(&self, record: &TriggerRecord) {
        let span = tracing::info_span!(
            "trigger",
            log_id = %record.log_id,
            handler = %record.handler,
        );
        let _guard = span.enter();

        let ctx = ExecutionContext::for_record(record, self.config.default_timeout);
        tracing::info!(params = %ctx.params, shard = ?ctx.shard, "executing");

        let start = Instant::now();
        let outcome = self.invoke(&record.handler, &ctx);
        let elapsed = start.elapsed();

        if outcome.is_success() {
            tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "completed");
        } else {
            tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                msg = %outcome.message,
                "failed"
            );
        }
        if let Some(timeout) = ctx.timeout.filter(|t| elapsed > *t) {
            tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                timeout_ms = timeout.as_millis() as u64,
                "handler overran its timeout"
            );
        }
        if self.shared.is_stop_requested() {
            tracing::info!("stop requested during execution, in-flight trigger completed");
        }

        self.deliver(record, outcome);
    }

    /// Resolve and run the handler; every failure path becomes an outcome.
    fn invoke(&self, name: &str, ctx: &ExecutionContext) -> ExecutionOutcome {
        let handler = match self.resolver.resolve(name) {
            Ok(handler) => handler,
            Err(e) => return ExecutionOutcome::failure(e.to_string()),
        };
        match catch_unwind(AssertUnwindSafe(|| handler.execute(ctx))) {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => ExecutionOutcome::failure(e.to_string()),
            Err(payload) => ExecutionOutcome::failure(format!(
                "job handler panicked: {}",
                panic_message(payload.as_ref())
            )),
        }
    }

    fn deliver(&self, record: &TriggerRecord, outcome: ExecutionOutcome) {
        let callback = CallbackRecord::for_record(record, outcome);
        if catch_unwind(AssertUnwindSafe(|| self.sink.deliver(callback))).is_err() {
            tracing::error!(log_id = %record.log_id, "callback sink panicked, outcome lost");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
