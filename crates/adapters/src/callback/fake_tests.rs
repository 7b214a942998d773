// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tw_core::test_support::TEST_LOG_TIME;
use tw_core::ExecutionOutcome;

#[test]
fn fake_sink_records_calls() {
    let sink = FakeCallbackSink::new();

    sink.deliver(CallbackRecord::new(
        LogId::new(1),
        TEST_LOG_TIME,
        ExecutionOutcome::success(),
    ));
    sink.deliver(CallbackRecord::new(
        LogId::new(2),
        TEST_LOG_TIME,
        ExecutionOutcome::failure("boom"),
    ));

    assert_eq!(sink.log_ids(), vec![1, 2]);
    assert_eq!(sink.calls_for(2)[0].outcome.message, "boom");
    assert!(sink.calls_for(3).is_empty());
}

#[test]
fn wait_for_returns_after_delivery_from_another_thread() {
    let sink = FakeCallbackSink::new();
    let producer = sink.clone();

    let handle = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(20));
        producer.deliver(CallbackRecord::new(
            LogId::new(5),
            TEST_LOG_TIME,
            ExecutionOutcome::success(),
        ));
    });

    let calls = sink.wait_for(1, Duration::from_secs(5));
    handle.join().unwrap();
    assert_eq!(calls.len(), 1);
}

#[test]
fn wait_for_gives_up_at_deadline() {
    let sink = FakeCallbackSink::new();
    let calls = sink.wait_for(1, Duration::from_millis(20));
    assert!(calls.is_empty());
}
