// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tw_adapters::{handler_fn, HandlerError};
use tw_core::{ExecutionOutcome, LogTimestamp, OutcomeStatus};

#[test]
fn success_callback_carries_log_id_and_time() {
    let h = Harness::new();
    let echo = h.handler("echo", FakeHandler::new());
    h.start();

    let record = trigger_with_params(1, 100, "echo", "hello")
        .with_log_time(LogTimestamp::from_millis(1_769_760_849_250));
    h.accept(record);

    let calls = h.callbacks(1);
    assert_eq!(calls[0].log_id, 100);
    assert_eq!(calls[0].log_time, LogTimestamp::from_millis(1_769_760_849_250));
    assert_eq!(calls[0].outcome, ExecutionOutcome::success_with("hello"));
    assert_eq!(echo.executed_params(), vec!["hello"]);

    h.stop_and_join();
}

#[test]
fn outcomes_follow_acceptance_order() {
    let h = Harness::new();
    let echo = h.handler("echo", FakeHandler::gated());
    for log_id in [5, 3, 9, 1] {
        h.accept(trigger_with_params(1, log_id, "echo", &log_id.to_string()));
    }
    h.start();
    echo.open();

    h.callbacks(4);
    assert_eq!(h.sink.log_ids(), vec![5, 3, 9, 1]);
    assert_eq!(echo.executed_params(), vec!["5", "3", "9", "1"]);

    h.stop_and_join();
}

#[test]
fn handler_error_becomes_failure_and_loop_continues() {
    let h = Harness::new();
    h.handler("broken", FakeHandler::failing("disk full"));
    h.handler("echo", FakeHandler::new());
    h.start();

    h.accept(trigger(1, 1, "broken"));
    h.accept(trigger(1, 2, "echo"));

    let calls = h.callbacks(2);
    assert_eq!(calls[0].outcome, ExecutionOutcome::failure("disk full"));
    assert!(calls[1].outcome.is_success());

    h.stop_and_join();
}

#[test]
fn handler_panic_becomes_failure_and_loop_continues() {
    let h = Harness::new();
    h.registry.register_fn("boom", |_ctx| panic!("exploded"));
    h.handler("echo", FakeHandler::new());
    h.start();

    h.accept(trigger(1, 1, "boom"));
    h.accept(trigger(1, 2, "echo"));

    let calls = h.callbacks(2);
    assert_eq!(calls[0].outcome.status, OutcomeStatus::Failure);
    assert_eq!(calls[0].outcome.message, "job handler panicked: exploded");
    assert!(calls[1].outcome.is_success());
    h.wait_for_state(WorkerState::Idle);

    h.stop_and_join();
}

#[test]
fn unknown_handler_becomes_failure() {
    let h = Harness::new();
    h.start();

    h.accept(trigger(1, 1, "missing"));

    let calls = h.callbacks(1);
    assert_eq!(
        calls[0].outcome,
        ExecutionOutcome::failure("job handler not found: missing")
    );

    h.stop_and_join();
}

#[test]
fn timed_out_handler_error_is_reported() {
    let h = Harness::new();
    h.registry.register(
        "slow",
        handler_fn(|ctx| Err(HandlerError::TimedOut(ctx.timeout.unwrap_or_default()))),
    );
    h.start();

    h.accept(trigger(1, 1, "slow").with_timeout(Duration::from_secs(2)));

    let calls = h.callbacks(1);
    assert_eq!(
        calls[0].outcome,
        ExecutionOutcome::failure("job execute timeout after 2000ms")
    );

    h.stop_and_join();
}

#[test]
fn default_timeout_applies_when_record_has_none() {
    let h = Harness::with_config(
        WorkerConfig::default().with_default_timeout(Duration::from_secs(30)),
    );
    let echo = h.handler("echo", FakeHandler::new());
    h.start();

    h.accept(trigger(1, 1, "echo"));
    h.accept(trigger(1, 2, "echo").with_timeout(Duration::from_secs(3)));
    h.callbacks(2);

    let timeouts: Vec<_> = echo.calls().iter().map(|c| c.timeout).collect();
    assert_eq!(
        timeouts,
        vec![Some(Duration::from_secs(30)), Some(Duration::from_secs(3))]
    );

    h.stop_and_join();
}

#[test]
fn broadcast_shard_reaches_handler() {
    let h = Harness::new();
    let echo = h.handler("echo", FakeHandler::new());
    h.start();

    h.accept(trigger(1, 1, "echo").with_broadcast(2, 5));
    h.callbacks(1);

    let ctx = &echo.calls()[0];
    assert_eq!((ctx.shard_index(), ctx.shard_total()), (2, 5));

    h.stop_and_join();
}

#[test]
fn running_worker_is_active() {
    let h = Harness::new();
    let echo = h.handler("echo", FakeHandler::gated());
    h.start();
    assert!(!h.worker.is_active());

    h.accept(trigger(1, 1, "echo"));
    assert!(echo.wait_for_calls(1, WAIT));
    assert!(h.worker.is_active());
    assert_eq!(h.worker.state(), WorkerState::Running);

    echo.open();
    h.callbacks(1);
    h.wait_for_state(WorkerState::Idle);
    assert!(!h.worker.is_active());

    h.stop_and_join();
}

#[test]
fn start_twice_is_an_error() {
    let h = Harness::new();
    h.start();

    let err = h.worker.start().unwrap_err();
    assert!(matches!(err, WorkerError::AlreadyStarted(id) if id == 1));

    h.stop_and_join();
}
