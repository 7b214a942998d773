// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{BlockStrategy, JobId, LogId, LogTimestamp, TriggerRecord};

/// Fixed log time so callbacks compare deterministically.
pub const TEST_LOG_TIME: LogTimestamp = LogTimestamp::from_millis(1_000_000);

// ── Trigger factory functions ───────────────────────────────────────────────

pub fn trigger(job_id: i64, log_id: i64, handler: &str) -> TriggerRecord {
    TriggerRecord::new(JobId::new(job_id), LogId::new(log_id), handler).with_log_time(TEST_LOG_TIME)
}

pub fn trigger_with_params(job_id: i64, log_id: i64, handler: &str, params: &str) -> TriggerRecord {
    trigger(job_id, log_id, handler).with_params(params)
}

pub fn trigger_with_strategy(
    job_id: i64,
    log_id: i64,
    handler: &str,
    strategy: BlockStrategy,
) -> TriggerRecord {
    trigger(job_id, log_id, handler).with_block_strategy(strategy)
}
