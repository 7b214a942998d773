// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::callback::CallbackSink;
use crate::handler::{HandlerResolver, JobHandler, ResolveError};
use std::sync::Arc;
use tw_core::CallbackRecord;

/// Wrapper that adds tracing to any HandlerResolver
#[derive(Clone)]
pub struct TracedResolver<R> {
    inner: R,
}

impl<R> TracedResolver<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: HandlerResolver> HandlerResolver for TracedResolver<R> {
    fn resolve(&self, name: &str) -> Result<Arc<dyn JobHandler>, ResolveError> {
        let result = self.inner.resolve(name);
        match &result {
            Ok(_) => tracing::trace!(handler = name, "resolved"),
            Err(e) => tracing::warn!(handler = name, error = %e, "resolve failed"),
        }
        result
    }
}

/// Wrapper that adds tracing to any CallbackSink
#[derive(Clone)]
pub struct TracedSink<S> {
    inner: S,
}

impl<S> TracedSink<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: CallbackSink> CallbackSink for TracedSink<S> {
    fn deliver(&self, callback: CallbackRecord) {
        tracing::info_span!("callback.deliver", log_id = %callback.log_id).in_scope(|| {
            tracing::info!(
                code = callback.outcome.status.code(),
                msg_len = callback.outcome.message.len(),
                "delivering"
            )
        });
        self.inner.deliver(callback);
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
