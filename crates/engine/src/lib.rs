// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Trigger execution engine: per-job workers and the pool that owns them

mod config;
mod error;
mod pool;
mod worker;

pub use config::{WorkerConfig, DEFAULT_IDLE_TIMEOUT};
pub use error::{PoolError, WorkerError};
pub use pool::{WorkerPool, COVER_EARLY_REASON, HANDLER_CHANGED_REASON};
pub use worker::{EnqueueOutcome, JobWorker, RejectReason, WorkerState, IDLE_TIMEOUT_REASON};
