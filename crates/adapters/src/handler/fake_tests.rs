// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tw_core::test_support::trigger_with_params;

fn ctx(params: &str) -> ExecutionContext {
    ExecutionContext::from(&trigger_with_params(1, 1, "fake", params))
}

#[test]
fn fake_handler_records_calls() {
    let handler = FakeHandler::new();

    let outcome = handler.execute(&ctx("first")).unwrap();
    handler.execute(&ctx("second")).unwrap();

    assert_eq!(outcome, ExecutionOutcome::success_with("first"));
    assert_eq!(handler.executed_params(), vec!["first", "second"]);
}

#[test]
fn failing_handler_returns_error() {
    let handler = FakeHandler::failing("bad input");
    let err = handler.execute(&ctx("x")).unwrap_err();
    assert_eq!(err.to_string(), "bad input");
    assert_eq!(handler.calls().len(), 1);
}

#[test]
fn gated_handler_blocks_until_opened() {
    let handler = FakeHandler::gated();
    let running = handler.clone();
    let thread = std::thread::spawn(move || running.execute(&ctx("held")));

    assert!(handler.wait_for_calls(1, Duration::from_secs(5)));
    assert!(!thread.is_finished());

    handler.open();
    let outcome = thread.join().unwrap().unwrap();
    assert_eq!(outcome.message, "held");
}

#[test]
fn wait_for_calls_times_out() {
    let handler = FakeHandler::new();
    assert!(!handler.wait_for_calls(1, Duration::from_millis(20)));
}
