// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Callback records reported upstream, one per accepted trigger.

use crate::id::LogId;
use crate::outcome::ExecutionOutcome;
use crate::timestamp::LogTimestamp;
use crate::trigger::TriggerRecord;
use serde::{Deserialize, Serialize};

/// Outcome of one trigger, tagged with the identifiers the admin server
/// needs to file it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackRecord {
    #[serde(rename = "logId")]
    pub log_id: LogId,
    #[serde(rename = "logDateTim")]
    pub log_time: LogTimestamp,
    #[serde(rename = "executeResult")]
    pub outcome: ExecutionOutcome,
}

impl CallbackRecord {
    pub fn new(log_id: LogId, log_time: LogTimestamp, outcome: ExecutionOutcome) -> Self {
        Self {
            log_id,
            log_time,
            outcome,
        }
    }

    /// Callback for `record` carrying `outcome`.
    pub fn for_record(record: &TriggerRecord, outcome: ExecutionOutcome) -> Self {
        Self::new(record.log_id, record.log_time, outcome)
    }
}

#[cfg(test)]
#[path = "callback_tests.rs"]
mod tests;
