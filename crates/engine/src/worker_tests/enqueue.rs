// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Barrier;

#[test]
fn duplicate_log_id_rejected_until_dequeued() {
    let h = Harness::new();
    let echo = h.handler("echo", FakeHandler::new());

    h.accept(trigger(1, 100, "echo"));
    assert_eq!(
        h.worker.enqueue(trigger(1, 100, "echo")),
        EnqueueOutcome::Rejected(RejectReason::Duplicate(LogId::new(100)))
    );
    assert_eq!(h.worker.queue_len(), 1);

    h.start();
    h.callbacks(1);

    h.accept(trigger(1, 100, "echo"));
    let calls = h.callbacks(2);
    assert_eq!(calls[1].log_id, 100);
    assert_eq!(echo.calls().len(), 2);

    h.stop_and_join();
}

#[test]
fn concurrent_enqueues_of_one_log_id_accept_exactly_one() {
    const PRODUCERS: usize = 16;

    let h = Harness::new();
    let echo = h.handler("echo", FakeHandler::new());
    let barrier = Barrier::new(PRODUCERS);

    let outcomes: Vec<EnqueueOutcome> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..PRODUCERS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    h.worker.enqueue(trigger(1, 7, "echo"))
                })
            })
            .collect();
        handles.into_iter().map(|j| j.join().unwrap()).collect()
    });

    let accepted = outcomes.iter().filter(|o| o.is_accepted()).count();
    assert_eq!(accepted, 1);

    h.start();
    h.callbacks(1);
    h.stop_and_join();
    assert_eq!(echo.calls().len(), 1);
    assert_eq!(h.sink.calls().len(), 1);
}

#[test]
fn enqueue_records_handler_name() {
    let h = Harness::new();
    assert_eq!(h.worker.handler_name(), None);

    h.accept(trigger(1, 1, "echo"));
    assert_eq!(h.worker.handler_name().as_deref(), Some("echo"));

    // A rejected trigger does not change it
    let _ = h.worker.enqueue(trigger(1, 1, "other"));
    assert_eq!(h.worker.handler_name().as_deref(), Some("echo"));
}

#[test]
fn enqueue_after_stopped_is_rejected() {
    let h = Harness::new();
    h.start();
    h.worker.interrupt("shutdown");
    h.worker.join();
    assert_eq!(h.worker.state(), WorkerState::Stopped);

    assert_eq!(
        h.worker.enqueue(trigger(1, 5, "echo")),
        EnqueueOutcome::Rejected(RejectReason::Stopped)
    );
    assert!(h.sink.calls().is_empty());
}

#[test]
fn reject_reasons_render_upstream_messages() {
    assert_eq!(
        RejectReason::Duplicate(LogId::new(100)).to_string(),
        "repeat trigger job, logId:100"
    );
    assert_eq!(RejectReason::Stopped.to_string(), "job worker stopped");
    assert_eq!(
        RejectReason::Discarded.to_string(),
        "block strategy effect: Discard Later"
    );
}
