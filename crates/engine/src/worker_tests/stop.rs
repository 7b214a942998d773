// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tw_core::OutcomeStatus;

#[test]
fn idle_worker_stops_itself() {
    let h = Harness::with_config(
        WorkerConfig::default().with_idle_timeout(Duration::from_millis(50)),
    );
    h.start();

    h.wait_for_state(WorkerState::Stopped);
    assert!(!h.worker.is_active());
    assert_eq!(h.worker.stop_reason().as_deref(), Some(IDLE_TIMEOUT_REASON));
    h.worker.join();
    assert!(h.sink.calls().is_empty());
}

#[test]
fn idle_timer_restarts_after_each_record() {
    let h = Harness::with_config(
        WorkerConfig::default().with_idle_timeout(Duration::from_millis(300)),
    );
    h.handler("echo", FakeHandler::new());
    h.start();

    for log_id in 1..=3 {
        std::thread::sleep(Duration::from_millis(100));
        h.accept(trigger(1, log_id, "echo"));
    }

    h.callbacks(3);
    assert_ne!(h.worker.state(), WorkerState::Stopped);
    h.wait_for_state(WorkerState::Stopped);
    h.worker.join();
}

#[test]
fn request_stop_before_start_drains_everything() {
    let h = Harness::new();
    let echo = h.handler("echo", FakeHandler::new());
    for log_id in 1..=3 {
        h.accept(trigger(1, log_id, "echo"));
    }

    h.worker.request_stop("maintenance");
    assert_eq!(h.worker.state(), WorkerState::Stopping);
    h.start();
    h.worker.join();

    let calls = h.callbacks(3);
    assert_eq!(h.sink.log_ids(), vec![1, 2, 3]);
    for call in &calls {
        assert_eq!(call.outcome.status, OutcomeStatus::Failure);
        assert_eq!(
            call.outcome.message,
            "maintenance [job not executed, in the job queue, killed.]"
        );
    }
    assert!(echo.calls().is_empty());
    assert_eq!(h.worker.state(), WorkerState::Stopped);
    assert_eq!(h.worker.queue_len(), 0);
}

#[test]
fn stop_lets_in_flight_handler_finish_and_drains_the_rest() {
    let h = Harness::new();
    let echo = h.handler("echo", FakeHandler::gated());
    h.start();
    for log_id in 1..=4 {
        h.accept(trigger(1, log_id, "echo"));
    }
    assert!(echo.wait_for_calls(1, WAIT));

    h.worker.request_stop("maintenance");
    assert_eq!(h.worker.state(), WorkerState::Stopping);
    echo.open();
    h.worker.join();

    let calls = h.callbacks(4);
    assert!(calls[0].outcome.is_success());
    for call in &calls[1..] {
        assert!(call.outcome.message.contains("maintenance"));
        assert_eq!(call.outcome.status, OutcomeStatus::Failure);
    }
    assert_eq!(echo.calls().len(), 1);
}

#[test]
fn interrupt_wakes_parked_wait() {
    let h = Harness::with_config(
        WorkerConfig::default().with_idle_timeout(Duration::from_secs(60)),
    );
    h.start();
    std::thread::sleep(Duration::from_millis(50));

    let started = Instant::now();
    h.worker.interrupt("shutdown");
    h.worker.join();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(h.worker.state(), WorkerState::Stopped);
    assert_eq!(h.worker.stop_reason().as_deref(), Some("shutdown"));
}

#[test]
fn first_stop_reason_wins() {
    let h = Harness::new();
    h.worker.request_stop("first");
    h.worker.interrupt("second");
    assert_eq!(h.worker.stop_reason().as_deref(), Some("first"));
    assert!(h.worker.is_stop_requested());
}

#[test]
fn join_without_start_returns() {
    let h = Harness::new();
    h.worker.join();
    assert_eq!(h.worker.state(), WorkerState::Idle);
}
