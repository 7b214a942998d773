// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashSet;

crate::define_id! {
    /// Test ID type for macro verification.
    pub struct TestId;
}

#[test]
fn define_id_new_and_get() {
    let id = TestId::new(42);
    assert_eq!(id.get(), 42);
    assert_eq!(id, 42);
}

#[test]
fn define_id_display() {
    assert_eq!(TestId::new(7).to_string(), "7");
    assert_eq!(TestId::new(-3).to_string(), "-3");
}

#[yare::parameterized(
    plain      = { "100",   Some(100) },
    padded     = { " 100 ", Some(100) },
    negative   = { "-1",    Some(-1) },
    not_number = { "abc",   None },
    empty      = { "",      None },
)]
fn define_id_from_str(input: &str, expected: Option<i64>) {
    let parsed = input.parse::<TestId>().ok();
    assert_eq!(parsed, expected.map(TestId::new));
}

#[test]
fn define_id_serializes_as_bare_integer() {
    let json = serde_json::to_string(&LogId::new(100)).unwrap();
    assert_eq!(json, "100");

    let parsed: LogId = serde_json::from_str("100").unwrap();
    assert_eq!(parsed, LogId::new(100));
}

#[test]
fn log_ids_hash_by_value() {
    let mut set = HashSet::new();
    assert!(set.insert(LogId::new(1)));
    assert!(!set.insert(LogId::from(1)));
    assert!(set.insert(LogId::new(2)));
}
