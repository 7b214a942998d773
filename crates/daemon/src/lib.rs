// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger worker daemon library
//!
//! Configuration, builtin handlers, and the line-oriented intake and
//! callback output used by `twd`.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod env;
pub mod handlers;
pub mod intake;
pub mod output;

pub use config::{Config, ConfigError, FileConfig};
pub use intake::{dispatch, IntakeError};
pub use output::forward_callbacks;
