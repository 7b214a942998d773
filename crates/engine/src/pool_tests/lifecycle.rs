// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn short_idle() -> WorkerConfig {
    WorkerConfig::default().with_idle_timeout(Duration::from_millis(50))
}

#[test]
fn idle_stopped_worker_is_replaced_on_next_trigger() {
    let h = PoolHarness::with_config(short_idle());
    h.handler("echo", FakeHandler::new());

    assert!(h.trigger(trigger(1, 1, "echo")).is_accepted());
    h.callbacks(1);
    let old = h.pool.worker(JobId::new(1)).unwrap();
    h.wait_until("idle stop", || old.state() == WorkerState::Stopped);

    assert!(h.trigger(trigger(1, 2, "echo")).is_accepted());
    let calls = h.callbacks(2);
    assert!(calls[1].outcome.is_success());
    let new = h.pool.worker(JobId::new(1)).unwrap();
    assert!(!Arc::ptr_eq(&old, &new));
}

#[test]
fn reap_removes_stopped_workers() {
    let h = PoolHarness::with_config(short_idle());
    h.handler("echo", FakeHandler::new());

    for job_id in 1..=3 {
        assert!(h.trigger(trigger(job_id, job_id, "echo")).is_accepted());
    }
    h.callbacks(3);
    h.wait_until("all idle stopped", || {
        (1..=3).all(|id| {
            h.pool
                .worker(JobId::new(id))
                .is_some_and(|w| w.state() == WorkerState::Stopped)
        })
    });

    assert_eq!(h.pool.reap(), 3);
    assert!(h.pool.is_empty());
    assert_eq!(h.pool.reap(), 0);
}

#[test]
fn kill_drains_queue_and_forgets_worker() {
    let h = PoolHarness::new();
    let echo = h.handler("echo", FakeHandler::gated());

    assert!(h.trigger(trigger(1, 1, "echo")).is_accepted());
    assert!(echo.wait_for_calls(1, WAIT));
    assert!(h.trigger(trigger(1, 2, "echo")).is_accepted());

    assert!(h.pool.kill(JobId::new(1), "scheduling center kill job."));
    assert!(!h.pool.kill(JobId::new(1), "again"));
    assert!(h.pool.worker(JobId::new(1)).is_none());

    echo.open();
    let calls = h.callbacks(2);
    assert!(calls[0].outcome.is_success());
    assert_eq!(
        calls[1].outcome.message,
        "scheduling center kill job. [job not executed, in the job queue, killed.]"
    );
}

#[test]
fn idle_beat_reports_busy_worker() {
    let h = PoolHarness::new();
    let echo = h.handler("echo", FakeHandler::gated());
    assert!(!h.pool.idle_beat(JobId::new(1)));

    assert!(h.trigger(trigger(1, 1, "echo")).is_accepted());
    assert!(echo.wait_for_calls(1, WAIT));
    assert!(h.pool.idle_beat(JobId::new(1)));
    assert!(h.pool.is_active());

    echo.open();
    h.callbacks(1);
    h.wait_until("idle", || !h.pool.idle_beat(JobId::new(1)));
    assert!(!h.pool.is_active());
}

#[test]
fn shutdown_drains_every_worker() {
    let h = PoolHarness::new();
    let echo = h.handler("echo", FakeHandler::gated());

    assert!(h.trigger(trigger(1, 1, "echo")).is_accepted());
    assert!(h.trigger(trigger(1, 2, "echo")).is_accepted());
    assert!(h.trigger(trigger(2, 3, "echo")).is_accepted());
    assert!(h.trigger(trigger(2, 4, "echo")).is_accepted());
    assert!(echo.wait_for_calls(2, WAIT));

    echo.open();
    h.pool.shutdown("executor shutdown");

    let calls = h.callbacks(4);
    let drained: Vec<i64> = calls
        .iter()
        .filter(|c| c.outcome.message.starts_with("executor shutdown"))
        .map(|c| c.log_id.get())
        .collect();
    let executed = calls.iter().filter(|c| c.outcome.is_success()).count();
    assert_eq!(executed + drained.len(), 4);
    assert!(h.pool.is_empty());
}
