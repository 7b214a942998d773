// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job worker tests

mod enqueue;
mod execute;
mod properties;
mod stop;

use super::*;
use std::time::{Duration, Instant};
use tw_adapters::{FakeCallbackSink, FakeHandler, HandlerRegistry};
use tw_core::test_support::{trigger, trigger_with_params};
use tw_core::CallbackRecord;

/// Upper bound for anything a test waits on.
const WAIT: Duration = Duration::from_secs(5);

type TestWorker = JobWorker<HandlerRegistry, FakeCallbackSink>;

struct Harness {
    worker: TestWorker,
    registry: HandlerRegistry,
    sink: FakeCallbackSink,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(WorkerConfig::default())
    }

    fn with_config(config: WorkerConfig) -> Self {
        let registry = HandlerRegistry::new();
        let sink = FakeCallbackSink::new();
        let worker = JobWorker::new(JobId::new(1), registry.clone(), sink.clone(), config);
        Self {
            worker,
            registry,
            sink,
        }
    }

    /// Register `handler` under `name` and hand back a clone for assertions.
    fn handler(&self, name: &str, handler: FakeHandler) -> FakeHandler {
        self.registry.register(name, handler.clone());
        handler
    }

    fn start(&self) {
        self.worker.start().unwrap();
    }

    fn accept(&self, record: TriggerRecord) {
        assert_eq!(self.worker.enqueue(record), EnqueueOutcome::Accepted);
    }

    fn callbacks(&self, n: usize) -> Vec<CallbackRecord> {
        let calls = self.sink.wait_for(n, WAIT);
        assert_eq!(calls.len(), n, "expected {n} callbacks, got {calls:?}");
        calls
    }

    fn wait_for_state(&self, state: WorkerState) {
        let deadline = Instant::now() + WAIT;
        while self.worker.state() != state {
            assert!(
                Instant::now() < deadline,
                "worker never reached {state}, still {}",
                self.worker.state()
            );
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn stop_and_join(&self) {
        self.worker.interrupt("test over");
        self.worker.join();
    }
}
