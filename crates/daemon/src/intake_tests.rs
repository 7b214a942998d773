// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::handlers::builtin_registry;
use std::time::Duration;
use tw_adapters::{FakeCallbackSink, HandlerRegistry};
use tw_core::LogId;
use tw_engine::{RejectReason, WorkerConfig};

fn pool() -> (WorkerPool<HandlerRegistry, FakeCallbackSink>, FakeCallbackSink) {
    let sink = FakeCallbackSink::new();
    let pool = WorkerPool::new(builtin_registry(), sink.clone(), WorkerConfig::default());
    (pool, sink)
}

#[test]
fn blank_line_is_skipped() {
    let (pool, _) = pool();
    assert!(dispatch(&pool, "   ").unwrap().is_none());
    assert!(pool.is_empty());
}

#[test]
fn valid_line_runs_handler() {
    let (pool, sink) = pool();
    let line = r#"{"jobId":1,"logId":100,"executorHandler":"echo","executorParams":"hi"}"#;

    assert_eq!(dispatch(&pool, line).unwrap(), Some(EnqueueOutcome::Accepted));

    let calls = sink.wait_for(1, Duration::from_secs(5));
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].log_id, 100);
    assert_eq!(calls[0].outcome.message, "hi");
    pool.shutdown("test over");
}

#[test]
fn repeated_line_is_rejected_while_queued() {
    let (pool, sink) = pool();
    let slow = r#"{"jobId":1,"logId":1,"executorHandler":"sleep","executorParams":"200"}"#;
    let line = r#"{"jobId":1,"logId":2,"executorHandler":"sleep","executorParams":"0"}"#;

    assert_eq!(dispatch(&pool, slow).unwrap(), Some(EnqueueOutcome::Accepted));
    assert_eq!(dispatch(&pool, line).unwrap(), Some(EnqueueOutcome::Accepted));
    assert_eq!(
        dispatch(&pool, line).unwrap(),
        Some(EnqueueOutcome::Rejected(RejectReason::Duplicate(LogId::new(2))))
    );

    assert_eq!(sink.wait_for(2, Duration::from_secs(5)).len(), 2);
    pool.shutdown("test over");
}

#[test]
fn malformed_line_is_an_error() {
    let (pool, _) = pool();
    let err = dispatch(&pool, "{not json").unwrap_err();
    assert!(matches!(err, IntakeError::Trigger(_)));
    assert!(err.to_string().starts_with("invalid trigger payload"));
}
