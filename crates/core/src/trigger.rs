// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger records: one requested execution of a job.

use crate::id::{JobId, LogId};
use crate::timestamp::LogTimestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Errors from decoding trigger input
#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("invalid trigger payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// What the executor does with a trigger that arrives while the job's
/// worker is still busy.
///
/// The worker itself only carries this value; the pool acts on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockStrategy {
    /// Queue behind the running trigger
    #[default]
    SerialExecution,
    /// Drop the new trigger
    DiscardLater,
    /// Kill the running worker and start over with the new trigger
    CoverEarly,
}

impl BlockStrategy {
    /// Human-readable title, used in rejection and stop messages.
    pub fn title(&self) -> &'static str {
        match self {
            BlockStrategy::SerialExecution => "Serial execution",
            BlockStrategy::DiscardLater => "Discard Later",
            BlockStrategy::CoverEarly => "Cover Early",
        }
    }
}

impl fmt::Display for BlockStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockStrategy::SerialExecution => write!(f, "SERIAL_EXECUTION"),
            BlockStrategy::DiscardLater => write!(f, "DISCARD_LATER"),
            BlockStrategy::CoverEarly => write!(f, "COVER_EARLY"),
        }
    }
}

/// Portion of a fan-out (broadcast) job run assigned to this executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BroadcastShard {
    #[serde(rename = "broadcastIndex")]
    pub index: u32,
    #[serde(rename = "broadcastTotal")]
    pub total: u32,
}

impl BroadcastShard {
    pub fn new(index: u32, total: u32) -> Self {
        Self { index, total }
    }
}

impl fmt::Display for BroadcastShard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.index, self.total)
    }
}

/// One requested execution of a job.
///
/// Field names on the wire follow the admin server's camelCase payload.
/// Unknown fields (glue source and friends) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRecord {
    #[serde(rename = "jobId")]
    pub job_id: JobId,
    /// Name the handler is resolved by
    #[serde(rename = "executorHandler", default, deserialize_with = "null_as_empty")]
    pub handler: String,
    /// Handler parameters, opaque to the executor
    #[serde(rename = "executorParams", default, deserialize_with = "null_as_empty")]
    pub params: String,
    #[serde(rename = "executorBlockStrategy", default)]
    pub block_strategy: BlockStrategy,
    /// Execution timeout; zero or negative on the wire means none
    #[serde(rename = "executorTimeout", default, with = "timeout_secs")]
    pub timeout: Option<Duration>,
    #[serde(rename = "logId")]
    pub log_id: LogId,
    #[serde(rename = "logDateTim", alias = "logDateTime", default)]
    pub log_time: LogTimestamp,
    /// Present only for broadcast jobs
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub broadcast: Option<BroadcastShard>,
}

impl TriggerRecord {
    /// Create a serial trigger with empty parameters, stamped now.
    pub fn new(job_id: JobId, log_id: LogId, handler: impl Into<String>) -> Self {
        Self {
            job_id,
            handler: handler.into(),
            params: String::new(),
            block_strategy: BlockStrategy::default(),
            timeout: None,
            log_id,
            log_time: LogTimestamp::now(),
            broadcast: None,
        }
    }

    /// Decode one trigger from its JSON wire form.
    pub fn from_json(payload: &str) -> Result<Self, TriggerError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn with_params(mut self, params: impl Into<String>) -> Self {
        self.params = params.into();
        self
    }

    pub fn with_block_strategy(mut self, strategy: BlockStrategy) -> Self {
        self.block_strategy = strategy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_log_time(mut self, log_time: LogTimestamp) -> Self {
        self.log_time = log_time;
        self
    }

    pub fn with_broadcast(mut self, index: u32, total: u32) -> Self {
        self.broadcast = Some(BroadcastShard::new(index, total));
        self
    }
}

/// A JSON `null` string field decodes as empty.
fn null_as_empty<'de, D: serde::Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// `Option<Duration>` as whole seconds, with zero meaning "no timeout".
mod timeout_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(value.map(|d| d.as_secs()).unwrap_or(0))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        let secs = Option::<i64>::deserialize(d)?.unwrap_or(0);
        Ok((secs > 0).then(|| Duration::from_secs(secs.unsigned_abs())))
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
