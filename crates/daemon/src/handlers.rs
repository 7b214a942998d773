// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handlers built into `twd`.

use std::time::Duration;
use tw_adapters::{HandlerError, HandlerRegistry};
use tw_core::{ExecutionContext, ExecutionOutcome};

/// Registry holding `echo`, `sleep` and `fail`.
pub fn builtin_registry() -> HandlerRegistry {
    let registry = HandlerRegistry::new();
    registry.register_fn("echo", echo);
    registry.register_fn("sleep", sleep);
    registry.register_fn("fail", fail);
    registry
}

/// Succeed with the params as the message.
pub fn echo(ctx: &ExecutionContext) -> Result<ExecutionOutcome, HandlerError> {
    Ok(ExecutionOutcome::success_with(ctx.params.clone()))
}

/// Sleep for `params` milliseconds, giving up at the trigger's timeout.
pub fn sleep(ctx: &ExecutionContext) -> Result<ExecutionOutcome, HandlerError> {
    let ms: u64 = ctx
        .params
        .trim()
        .parse()
        .map_err(|_| HandlerError::Failed(format!("invalid sleep millis: {:?}", ctx.params)))?;
    let wanted = Duration::from_millis(ms);
    match ctx.timeout {
        Some(timeout) if timeout < wanted => {
            std::thread::sleep(timeout);
            Err(HandlerError::TimedOut(timeout))
        }
        _ => {
            std::thread::sleep(wanted);
            Ok(ExecutionOutcome::success_with(format!("slept {ms}ms")))
        }
    }
}

/// Fail with the params as the message.
pub fn fail(ctx: &ExecutionContext) -> Result<ExecutionOutcome, HandlerError> {
    Err(HandlerError::Failed(ctx.params.clone()))
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
