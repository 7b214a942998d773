// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job handlers and handler resolution

mod registry;

pub use registry::HandlerRegistry;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeHandler;

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tw_core::{ExecutionContext, ExecutionOutcome};

/// Errors a handler reports instead of an outcome
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    Failed(String),
    #[error("job execute timeout after {}ms", .0.as_millis())]
    TimedOut(Duration),
}

/// Errors from resolving a handler by name
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("job handler not found: {0}")]
    NotFound(String),
}

/// Unit of job work, invoked once per executed trigger.
///
/// Runs on the worker's thread. A handler may block for as long as it needs;
/// the worker never preempts it.
pub trait JobHandler: Send + Sync {
    fn execute(&self, ctx: &ExecutionContext) -> Result<ExecutionOutcome, HandlerError>;
}

impl<F> JobHandler for F
where
    F: Fn(&ExecutionContext) -> Result<ExecutionOutcome, HandlerError> + Send + Sync,
{
    fn execute(&self, ctx: &ExecutionContext) -> Result<ExecutionOutcome, HandlerError> {
        self(ctx)
    }
}

/// Pin a closure to the handler signature so its argument and error types
/// are inferred.
pub fn handler_fn<F>(f: F) -> F
where
    F: Fn(&ExecutionContext) -> Result<ExecutionOutcome, HandlerError> + Send + Sync,
{
    f
}

/// Maps handler names to handlers
pub trait HandlerResolver: Clone + Send + Sync + 'static {
    fn resolve(&self, name: &str) -> Result<Arc<dyn JobHandler>, ResolveError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
