// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn serial_execution_queues_behind_busy_worker() {
    let h = PoolHarness::new();
    let echo = h.handler("echo", FakeHandler::gated());

    assert_eq!(h.trigger(trigger(1, 1, "echo")), EnqueueOutcome::Accepted);
    assert!(echo.wait_for_calls(1, WAIT));
    assert_eq!(
        h.trigger(trigger_with_strategy(1, 2, "echo", BlockStrategy::SerialExecution)),
        EnqueueOutcome::Accepted
    );

    echo.open();
    h.callbacks(2);
    assert_eq!(h.sink.log_ids(), vec![1, 2]);
    assert_eq!(h.pool.len(), 1);
}

#[test]
fn discard_later_drops_trigger_for_busy_worker() {
    let h = PoolHarness::new();
    let echo = h.handler("echo", FakeHandler::gated());

    assert!(h.trigger(trigger(1, 1, "echo")).is_accepted());
    assert!(echo.wait_for_calls(1, WAIT));
    assert_eq!(
        h.trigger(trigger_with_strategy(1, 2, "echo", BlockStrategy::DiscardLater)),
        EnqueueOutcome::Rejected(RejectReason::Discarded)
    );

    echo.open();
    h.callbacks(1);
    assert_eq!(h.sink.log_ids(), vec![1]);
}

#[test]
fn cover_early_replaces_busy_worker() {
    let h = PoolHarness::new();
    let echo = h.handler("echo", FakeHandler::gated());

    assert!(h.trigger(trigger(1, 1, "echo")).is_accepted());
    assert!(echo.wait_for_calls(1, WAIT));
    assert!(h.trigger(trigger(1, 2, "echo")).is_accepted());
    let old = h.pool.worker(JobId::new(1)).unwrap();

    assert!(h
        .trigger(trigger_with_strategy(1, 3, "echo", BlockStrategy::CoverEarly))
        .is_accepted());
    assert_eq!(old.stop_reason().as_deref(), Some(COVER_EARLY_REASON));
    let new = h.pool.worker(JobId::new(1)).unwrap();
    assert!(!Arc::ptr_eq(&old, &new));

    echo.open();
    let calls = h.callbacks(3);
    // In-flight 1 completes; queued 2 is drained; 3 runs on the new worker
    let by_id = |id: i64| calls.iter().find(|c| c.log_id == id).unwrap().clone();
    assert!(by_id(1).outcome.is_success());
    assert_eq!(
        by_id(2).outcome.message,
        "block strategy effect: Cover Early [job not executed, in the job queue, killed.]"
    );
    assert!(by_id(3).outcome.is_success());
}

#[parameterized(
    serial = { BlockStrategy::SerialExecution },
    discard_later = { BlockStrategy::DiscardLater },
    cover_early = { BlockStrategy::CoverEarly },
)]
fn idle_worker_is_reused_whatever_the_strategy(strategy: BlockStrategy) {
    let h = PoolHarness::new();
    h.handler("echo", FakeHandler::new());

    assert!(h.trigger(trigger(1, 1, "echo")).is_accepted());
    h.callbacks(1);
    let first = h.pool.worker(JobId::new(1)).unwrap();
    h.wait_until("worker idle", || !first.is_active());

    assert!(h
        .trigger(trigger_with_strategy(1, 2, "echo", strategy))
        .is_accepted());
    h.callbacks(2);
    let second = h.pool.worker(JobId::new(1)).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn handler_change_replaces_worker() {
    let h = PoolHarness::new();
    h.handler("echo", FakeHandler::new());
    h.handler("other", FakeHandler::new());

    assert!(h.trigger(trigger(1, 1, "echo")).is_accepted());
    h.callbacks(1);
    let old = h.pool.worker(JobId::new(1)).unwrap();

    assert!(h.trigger(trigger(1, 2, "other")).is_accepted());
    h.callbacks(2);

    assert_eq!(old.stop_reason().as_deref(), Some(HANDLER_CHANGED_REASON));
    let new = h.pool.worker(JobId::new(1)).unwrap();
    assert_eq!(new.handler_name().as_deref(), Some("other"));
    assert_eq!(h.pool.len(), 1);
}

#[test]
fn duplicate_log_id_is_rejected_through_pool() {
    let h = PoolHarness::new();
    let echo = h.handler("echo", FakeHandler::gated());

    assert!(h.trigger(trigger(1, 1, "echo")).is_accepted());
    assert!(echo.wait_for_calls(1, WAIT));
    assert!(h.trigger(trigger(1, 2, "echo")).is_accepted());
    assert_eq!(
        h.trigger(trigger(1, 2, "echo")),
        EnqueueOutcome::Rejected(RejectReason::Duplicate(tw_core::LogId::new(2)))
    );
    echo.open();
    h.callbacks(2);
}

#[test]
fn jobs_get_separate_workers() {
    let h = PoolHarness::new();
    let echo = h.handler("echo", FakeHandler::gated());

    assert!(h.trigger(trigger(1, 1, "echo")).is_accepted());
    assert!(h.trigger(trigger(2, 2, "echo")).is_accepted());
    assert!(echo.wait_for_calls(2, WAIT));
    assert_eq!(h.pool.len(), 2);

    echo.open();
    h.callbacks(2);
}
