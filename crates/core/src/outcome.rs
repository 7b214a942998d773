// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result of running (or refusing to run) one trigger.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire code for a successful execution.
pub const SUCCESS_CODE: u16 = 200;

/// Wire code for a failed execution.
pub const FAILURE_CODE: u16 = 500;

/// Whether a trigger completed successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeStatus {
    Success,
    Failure,
}

impl OutcomeStatus {
    pub fn code(self) -> u16 {
        match self {
            OutcomeStatus::Success => SUCCESS_CODE,
            OutcomeStatus::Failure => FAILURE_CODE,
        }
    }

    /// Any code other than 200 counts as failure.
    pub fn from_code(code: u16) -> Self {
        if code == SUCCESS_CODE {
            OutcomeStatus::Success
        } else {
            OutcomeStatus::Failure
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeStatus::Success => write!(f, "success"),
            OutcomeStatus::Failure => write!(f, "failure"),
        }
    }
}

/// Status plus diagnostic message, produced once per accepted trigger.
///
/// Serializes as `{"code": 200, "msg": "..."}`; `msg` is omitted when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OutcomeWire", into = "OutcomeWire")]
pub struct ExecutionOutcome {
    pub status: OutcomeStatus,
    pub message: String,
}

impl ExecutionOutcome {
    pub fn success() -> Self {
        Self {
            status: OutcomeStatus::Success,
            message: String::new(),
        }
    }

    pub fn success_with(message: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Failure,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

impl fmt::Display for ExecutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.status)
        } else {
            write!(f, "{}: {}", self.status, self.message)
        }
    }
}

#[derive(Serialize, Deserialize)]
struct OutcomeWire {
    code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    msg: Option<String>,
}

impl From<OutcomeWire> for ExecutionOutcome {
    fn from(wire: OutcomeWire) -> Self {
        Self {
            status: OutcomeStatus::from_code(wire.code),
            message: wire.msg.unwrap_or_default(),
        }
    }
}

impl From<ExecutionOutcome> for OutcomeWire {
    fn from(outcome: ExecutionOutcome) -> Self {
        Self {
            code: outcome.status.code(),
            msg: (!outcome.message.is_empty()).then_some(outcome.message),
        }
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
