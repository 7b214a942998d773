// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory handler registry.

use super::{HandlerError, HandlerResolver, JobHandler, ResolveError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tw_core::{ExecutionContext, ExecutionOutcome};

/// Handler resolver backed by a name → handler map.
///
/// Clones share the same map, so handlers registered after workers are
/// created become visible to them.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: Arc<RwLock<HashMap<String, Arc<dyn JobHandler>>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, returning the one it replaced.
    pub fn register(
        &self,
        name: impl Into<String>,
        handler: impl JobHandler + 'static,
    ) -> Option<Arc<dyn JobHandler>> {
        self.register_arc(name, Arc::new(handler))
    }

    /// Register a closure as a handler.
    pub fn register_fn<F>(&self, name: impl Into<String>, f: F) -> Option<Arc<dyn JobHandler>>
    where
        F: Fn(&ExecutionContext) -> Result<ExecutionOutcome, HandlerError> + Send + Sync + 'static,
    {
        self.register_arc(name, Arc::new(f))
    }

    pub fn register_arc(
        &self,
        name: impl Into<String>,
        handler: Arc<dyn JobHandler>,
    ) -> Option<Arc<dyn JobHandler>> {
        let name = name.into();
        tracing::debug!(handler = %name, "registering job handler");
        self.handlers.write().insert(name, handler)
    }

    pub fn unregister(&self, name: &str) -> Option<Arc<dyn JobHandler>> {
        self.handlers.write().remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.read().contains_key(name)
    }

    /// Registered handler names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl HandlerResolver for HandlerRegistry {
    fn resolve(&self, name: &str) -> Result<Arc<dyn JobHandler>, ResolveError> {
        self.handlers
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
