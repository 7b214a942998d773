// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler-facing view of a trigger.

use crate::id::{JobId, LogId};
use crate::trigger::{BroadcastShard, TriggerRecord};
use std::time::Duration;

/// Input handed to a job handler.
///
/// Decouples the handler signature from the queue/wire representation:
/// handlers see parameters and shard info, never block strategy or log time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    pub job_id: JobId,
    pub log_id: LogId,
    pub params: String,
    pub shard: Option<BroadcastShard>,
    /// Budget the handler is expected to honor; not enforced by the worker
    pub timeout: Option<Duration>,
}

impl ExecutionContext {
    /// Build the context for a record, falling back to `default_timeout`
    /// when the record carries none.
    pub fn for_record(record: &TriggerRecord, default_timeout: Option<Duration>) -> Self {
        Self {
            job_id: record.job_id,
            log_id: record.log_id,
            params: record.params.clone(),
            shard: record.broadcast,
            timeout: record.timeout.or(default_timeout),
        }
    }

    /// Shard index, `0` for non-broadcast runs.
    pub fn shard_index(&self) -> u32 {
        self.shard.map(|s| s.index).unwrap_or(0)
    }

    /// Shard count, `1` for non-broadcast runs.
    pub fn shard_total(&self) -> u32 {
        self.shard.map(|s| s.total).unwrap_or(1)
    }
}

impl From<&TriggerRecord> for ExecutionContext {
    fn from(record: &TriggerRecord) -> Self {
        Self::for_record(record, None)
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
