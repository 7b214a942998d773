// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tw-core: data model shared by the trigger worker crates

pub mod callback;
pub mod context;
pub mod id;
pub mod outcome;
pub mod timestamp;
pub mod trigger;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use callback::CallbackRecord;
pub use context::ExecutionContext;
pub use id::{JobId, LogId};
pub use outcome::{ExecutionOutcome, OutcomeStatus, FAILURE_CODE, SUCCESS_CODE};
pub use timestamp::LogTimestamp;
pub use trigger::{BlockStrategy, BroadcastShard, TriggerError, TriggerRecord};
