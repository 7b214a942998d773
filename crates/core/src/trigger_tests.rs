// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const ADMIN_PAYLOAD: &str = r#"{
    "jobId": 1,
    "executorHandler": "demoJobHandler",
    "executorParams": "a=1",
    "executorBlockStrategy": "DISCARD_LATER",
    "executorTimeout": 30,
    "logId": 100,
    "logDateTim": 1769760849250,
    "glueType": "BEAN",
    "glueSource": "",
    "glueUpdatetime": 0,
    "broadcastIndex": 2,
    "broadcastTotal": 5
}"#;

#[test]
fn decodes_admin_payload() {
    let record = TriggerRecord::from_json(ADMIN_PAYLOAD).unwrap();

    assert_eq!(record.job_id, JobId::new(1));
    assert_eq!(record.log_id, LogId::new(100));
    assert_eq!(record.handler, "demoJobHandler");
    assert_eq!(record.params, "a=1");
    assert_eq!(record.block_strategy, BlockStrategy::DiscardLater);
    assert_eq!(record.timeout, Some(Duration::from_secs(30)));
    assert_eq!(record.log_time, LogTimestamp::from_millis(1_769_760_849_250));
    assert_eq!(record.broadcast, Some(BroadcastShard::new(2, 5)));
}

#[test]
fn minimal_payload_uses_defaults() {
    let record = TriggerRecord::from_json(r#"{"jobId": 7, "logId": 8}"#).unwrap();

    assert_eq!(record.handler, "");
    assert_eq!(record.params, "");
    assert_eq!(record.block_strategy, BlockStrategy::SerialExecution);
    assert_eq!(record.timeout, None);
    assert_eq!(record.log_time, LogTimestamp::default());
    assert_eq!(record.broadcast, None);
}

#[test]
fn accepts_long_log_time_field_name() {
    let record =
        TriggerRecord::from_json(r#"{"jobId": 1, "logId": 2, "logDateTime": 99}"#).unwrap();
    assert_eq!(record.log_time, LogTimestamp::from_millis(99));
}

#[test]
fn null_handler_and_params_decode_as_empty() {
    let record = TriggerRecord::from_json(
        r#"{"jobId": 1, "logId": 2, "executorHandler": null, "executorParams": null}"#,
    )
    .unwrap();
    assert_eq!(record.handler, "");
    assert_eq!(record.params, "");
}

#[yare::parameterized(
    zero     = { 0 },
    negative = { -1 },
)]
fn non_positive_timeout_means_none(secs: i64) {
    let payload = format!(r#"{{"jobId": 1, "logId": 2, "executorTimeout": {secs}}}"#);
    let record = TriggerRecord::from_json(&payload).unwrap();
    assert_eq!(record.timeout, None);
}

#[test]
fn missing_log_id_is_a_parse_error() {
    let err = TriggerRecord::from_json(r#"{"jobId": 1}"#).unwrap_err();
    assert!(matches!(err, TriggerError::Parse(_)));
    assert!(err.to_string().contains("logId"), "got: {err}");
}

#[test]
fn encodes_with_wire_field_names() {
    let record = TriggerRecord::new(JobId::new(1), LogId::new(100), "echo")
        .with_params("hi")
        .with_timeout(Duration::from_secs(5))
        .with_log_time(LogTimestamp::from_millis(10));

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["jobId"], 1);
    assert_eq!(value["logId"], 100);
    assert_eq!(value["executorHandler"], "echo");
    assert_eq!(value["executorParams"], "hi");
    assert_eq!(value["executorBlockStrategy"], "SERIAL_EXECUTION");
    assert_eq!(value["executorTimeout"], 5);
    assert_eq!(value["logDateTim"], 10);
    assert!(value.get("logDateTime").is_none());
    assert!(value.get("broadcastIndex").is_none());
}

#[yare::parameterized(
    serial  = { "SERIAL_EXECUTION", BlockStrategy::SerialExecution },
    discard = { "DISCARD_LATER",    BlockStrategy::DiscardLater },
    cover   = { "COVER_EARLY",      BlockStrategy::CoverEarly },
)]
fn block_strategy_wire_names(name: &str, expected: BlockStrategy) {
    let payload = format!(r#"{{"jobId": 1, "logId": 2, "executorBlockStrategy": "{name}"}}"#);
    let record = TriggerRecord::from_json(&payload).unwrap();
    assert_eq!(record.block_strategy, expected);
    assert_eq!(expected.to_string(), name);
}

#[test]
fn unknown_block_strategy_is_a_parse_error() {
    let payload = r#"{"jobId": 1, "logId": 2, "executorBlockStrategy": "FIRST_COME"}"#;
    let err = TriggerRecord::from_json(payload).unwrap_err();
    assert!(matches!(err, TriggerError::Parse(_)));
}

#[test]
fn block_strategy_titles() {
    assert_eq!(BlockStrategy::DiscardLater.title(), "Discard Later");
    assert_eq!(BlockStrategy::CoverEarly.title(), "Cover Early");
}

#[test]
fn builder_sets_broadcast_shard() {
    let record = TriggerRecord::new(JobId::new(1), LogId::new(1), "echo").with_broadcast(0, 3);
    let shard = record.broadcast.unwrap();
    assert_eq!(shard.to_string(), "0/3");
}
