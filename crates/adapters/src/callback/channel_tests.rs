// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tw_core::test_support::TEST_LOG_TIME;
use tw_core::{ExecutionOutcome, LogId};

fn callback(log_id: i64) -> CallbackRecord {
    CallbackRecord::new(LogId::new(log_id), TEST_LOG_TIME, ExecutionOutcome::success())
}

#[test]
fn delivers_in_order_from_another_thread() {
    let (sink, mut rx) = ChannelCallbackSink::new();

    let producer = sink.clone();
    std::thread::spawn(move || {
        for id in 1..=3 {
            producer.deliver(callback(id));
        }
    })
    .join()
    .unwrap();

    let ids: Vec<i64> = std::iter::from_fn(|| rx.try_recv().ok())
        .map(|c| c.log_id.get())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn dropped_receiver_does_not_panic() {
    let (sink, rx) = ChannelCallbackSink::new();
    drop(rx);

    sink.deliver(callback(1));
}

#[tokio::test]
async fn receiver_awaits_callbacks() {
    let (sink, mut rx) = ChannelCallbackSink::new();

    sink.deliver(callback(9));
    let received = rx.recv().await.unwrap();
    assert_eq!(received.log_id, LogId::new(9));
}
