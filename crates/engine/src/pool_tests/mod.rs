// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker pool tests

mod lifecycle;
mod strategy;

use super::*;
use std::time::{Duration, Instant};
use tw_adapters::{FakeCallbackSink, FakeHandler, HandlerRegistry};
use tw_core::test_support::{trigger, trigger_with_strategy};
use tw_core::CallbackRecord;

const WAIT: Duration = Duration::from_secs(5);

struct PoolHarness {
    pool: WorkerPool<HandlerRegistry, FakeCallbackSink>,
    registry: HandlerRegistry,
    sink: FakeCallbackSink,
}

impl PoolHarness {
    fn new() -> Self {
        Self::with_config(WorkerConfig::default())
    }

    fn with_config(config: WorkerConfig) -> Self {
        let registry = HandlerRegistry::new();
        let sink = FakeCallbackSink::new();
        let pool = WorkerPool::new(registry.clone(), sink.clone(), config);
        Self {
            pool,
            registry,
            sink,
        }
    }

    fn handler(&self, name: &str, handler: FakeHandler) -> FakeHandler {
        self.registry.register(name, handler.clone());
        handler
    }

    fn trigger(&self, record: TriggerRecord) -> EnqueueOutcome {
        self.pool.trigger(record).unwrap()
    }

    fn callbacks(&self, n: usize) -> Vec<CallbackRecord> {
        let calls = self.sink.wait_for(n, WAIT);
        assert_eq!(calls.len(), n, "expected {n} callbacks, got {calls:?}");
        calls
    }

    fn wait_until(&self, what: &str, cond: impl Fn() -> bool) {
        let deadline = Instant::now() + WAIT;
        while !cond() {
            assert!(Instant::now() < deadline, "timed out waiting for {what}");
            std::thread::sleep(Duration::from_millis(5));
        }
    }
}

impl Drop for PoolHarness {
    fn drop(&mut self) {
        self.pool.shutdown("test over");
    }
}
