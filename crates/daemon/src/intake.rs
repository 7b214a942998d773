// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger intake: one JSON trigger record per line.

use thiserror::Error;
use tw_adapters::{CallbackSink, HandlerResolver};
use tw_core::{TriggerError, TriggerRecord};
use tw_engine::{EnqueueOutcome, PoolError, WorkerPool};

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error(transparent)]
    Trigger(#[from] TriggerError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Decode `line` and route it through `pool`. Blank lines yield `None`.
pub fn dispatch<R: HandlerResolver, S: CallbackSink>(
    pool: &WorkerPool<R, S>,
    line: &str,
) -> Result<Option<EnqueueOutcome>, IntakeError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let record = TriggerRecord::from_json(line)?;
    let (job_id, log_id) = (record.job_id, record.log_id);
    let outcome = pool.trigger(record)?;
    match &outcome {
        EnqueueOutcome::Accepted => tracing::debug!(%job_id, %log_id, "trigger accepted"),
        EnqueueOutcome::Rejected(reason) => {
            tracing::warn!(%job_id, %log_id, %reason, "trigger rejected")
        }
    }
    Ok(Some(outcome))
}

#[cfg(test)]
#[path = "intake_tests.rs"]
mod tests;
