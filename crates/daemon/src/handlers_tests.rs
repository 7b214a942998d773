// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tw_adapters::HandlerResolver;
use tw_core::test_support::trigger_with_params;
use yare::parameterized;

fn ctx(handler: &str, params: &str) -> ExecutionContext {
    ExecutionContext::from(&trigger_with_params(1, 1, handler, params))
}

fn run(handler: &str, params: &str) -> Result<ExecutionOutcome, HandlerError> {
    let registry = builtin_registry();
    let handler_impl = registry.resolve(handler).unwrap();
    handler_impl.execute(&ctx(handler, params))
}

#[test]
fn registry_holds_builtins() {
    assert_eq!(builtin_registry().names(), vec!["echo", "fail", "sleep"]);
}

#[test]
fn echo_returns_params() {
    assert_eq!(
        run("echo", "hello").unwrap(),
        ExecutionOutcome::success_with("hello")
    );
}

#[test]
fn fail_returns_params_as_error() {
    let err = run("fail", "boom").unwrap_err();
    assert_eq!(err.to_string(), "boom");
}

#[parameterized(
    zero = { "0", "slept 0ms" },
    short = { "5", "slept 5ms" },
    padded = { " 3 ", "slept 3ms" },
)]
fn sleep_succeeds(params: &str, message: &str) {
    assert_eq!(
        run("sleep", params).unwrap(),
        ExecutionOutcome::success_with(message)
    );
}

#[parameterized(
    empty = { "" },
    negative = { "-1" },
    word = { "soon" },
)]
fn sleep_rejects_bad_params(params: &str) {
    let err = run("sleep", params).unwrap_err();
    assert!(err.to_string().starts_with("invalid sleep millis"));
}

#[test]
fn sleep_stops_at_timeout() {
    let record = trigger_with_params(1, 1, "sleep", "5000");
    let ctx = ExecutionContext::for_record(&record, Some(Duration::from_millis(20)));
    let err = sleep(&ctx).unwrap_err();
    assert!(matches!(err, HandlerError::TimedOut(t) if t == Duration::from_millis(20)));
}
