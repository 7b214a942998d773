//! Trigger execution specs
//!
//! Triggers piped on stdin come back as one callback line each.

use crate::prelude::*;

#[test]
fn echo_trigger_reports_success() {
    let run = Run::new();
    let output = run.feed(&[&trigger(1, 100, "echo", "hello")]);
    assert!(output.status.success());

    let callbacks = callbacks(&output);
    assert_eq!(callbacks.len(), 1);
    let cb = &callbacks[0];
    assert_eq!(cb["logId"], 100);
    assert_eq!(cb["logDateTim"], 1_769_760_849_250i64);
    assert_eq!(cb["executeResult"]["code"], 200);
    assert_eq!(cb["executeResult"]["msg"], "hello");
}

#[test]
fn failures_are_reported_not_fatal() {
    let run = Run::new();
    let output = run.feed(&[
        &trigger(1, 1, "fail", "disk full"),
        &trigger(2, 2, "missing", ""),
        &trigger(3, 3, "echo", "still here"),
    ]);
    assert!(output.status.success());

    let callbacks = callbacks(&output);
    assert_eq!(callbacks.len(), 3);
    let failed = callback_for(&callbacks, 1);
    assert_eq!(failed["executeResult"]["code"], 500);
    assert_eq!(failed["executeResult"]["msg"], "disk full");
    let missing = callback_for(&callbacks, 2);
    assert_eq!(
        missing["executeResult"]["msg"],
        "job handler not found: missing"
    );
    assert_eq!(callback_for(&callbacks, 3)["executeResult"]["code"], 200);
}

#[test]
fn one_job_runs_in_order() {
    let run = Run::new();
    let output = run.feed(&[
        &trigger(1, 1, "sleep", "50"),
        &trigger(1, 2, "sleep", "0"),
        &trigger(1, 3, "sleep", "0"),
    ]);
    assert!(output.status.success());

    let callbacks = callbacks(&output);
    let ids: Vec<i64> = callbacks
        .iter()
        .map(|c| c["logId"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
    for cb in &callbacks {
        assert_eq!(cb["executeResult"]["code"], 200, "got {cb}");
    }
    assert_eq!(callbacks[0]["executeResult"]["msg"], "slept 50ms");
}

#[test]
fn handler_change_drains_queued_triggers() {
    let run = Run::new();
    let output = run.feed(&[
        &trigger(1, 1, "sleep", "200"),
        &trigger(1, 2, "sleep", "0"),
        &trigger(1, 3, "echo", "new handler"),
    ]);
    assert!(output.status.success());

    let callbacks = callbacks(&output);
    assert_eq!(callbacks.len(), 3);
    let drained = callback_for(&callbacks, 2);
    assert_eq!(drained["executeResult"]["code"], 500);
    assert_eq!(
        drained["executeResult"]["msg"],
        "change handler or glue type, and terminate the old job thread \
         [job not executed, in the job queue, killed.]"
    );
    let replaced = callback_for(&callbacks, 3);
    assert_eq!(replaced["executeResult"]["code"], 200);
    assert_eq!(replaced["executeResult"]["msg"], "new handler");
}

#[test]
fn duplicate_log_id_is_rejected_while_queued() {
    let run = Run::new();
    let output = run.feed(&[
        &trigger(1, 1, "sleep", "200"),
        &trigger(1, 2, "sleep", "0"),
        &trigger(1, 2, "sleep", "1"),
    ]);
    assert!(output.status.success());

    let callbacks = callbacks(&output);
    assert_eq!(callbacks.len(), 2);
    assert_eq!(
        callback_for(&callbacks, 2)["executeResult"]["msg"],
        "slept 0ms"
    );
    assert!(run.log().contains("trigger rejected"));
}

#[test]
fn discard_later_drops_trigger_for_busy_job() {
    let run = Run::new();
    let output = run.feed(&[
        &trigger(1, 1, "sleep", "200"),
        &trigger_with_strategy(1, 2, "sleep", "0", "DISCARD_LATER"),
    ]);
    assert!(output.status.success());

    let callbacks = callbacks(&output);
    assert_eq!(callbacks.len(), 1);
    assert_eq!(callbacks[0]["logId"], 1);
    assert_eq!(callbacks[0]["executeResult"]["code"], 200);
    assert!(run.log().contains("busy worker, trigger discarded"));
}

#[test]
fn idle_workers_are_reaped_while_others_run() {
    let run = Run::new().env("TW_IDLE_TIMEOUT_MS", "20");
    let output = run.feed(&[
        &trigger(1, 1, "sleep", "0"),
        &trigger(2, 2, "sleep", "500"),
    ]);
    assert!(output.status.success());

    let callbacks = callbacks(&output);
    assert_eq!(callbacks.len(), 2);
    assert_eq!(callback_for(&callbacks, 2)["executeResult"]["code"], 200);
    assert!(run.log().contains("reaped idle workers"), "{}", run.log());
}

#[test]
fn handler_timeout_from_env_fails_slow_trigger() {
    let run = Run::new().env("TW_HANDLER_TIMEOUT_MS", "20");
    let output = run.feed(&[&trigger(1, 1, "sleep", "5000")]);
    assert!(output.status.success());

    let callbacks = callbacks(&output);
    assert_eq!(
        callbacks[0]["executeResult"]["msg"],
        "job execute timeout after 20ms"
    );
}

#[test]
fn malformed_lines_are_skipped() {
    let run = Run::new();
    let output = run.feed(&["{not json", "", &trigger(1, 1, "echo", "ok")]);
    assert!(output.status.success());

    let callbacks = callbacks(&output);
    assert_eq!(callbacks.len(), 1);
    assert!(run.log().contains("dropping trigger line"));
}
