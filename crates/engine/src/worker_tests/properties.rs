// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use std::collections::HashSet;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Before the loop starts every id is still pending, so repeats are
    /// rejected and each distinct id yields exactly one outcome, in order.
    #[test]
    fn one_outcome_per_distinct_log_id(log_ids in prop::collection::vec(0i64..20, 1..40)) {
        let h = Harness::new();
        h.handler("echo", FakeHandler::new());

        let mut first_seen = Vec::new();
        let mut seen = HashSet::new();
        for &log_id in &log_ids {
            let outcome = h.worker.enqueue(trigger(1, log_id, "echo"));
            prop_assert_eq!(outcome.is_accepted(), seen.insert(log_id));
            if outcome.is_accepted() {
                first_seen.push(log_id);
            }
        }

        h.start();
        let calls = h.sink.wait_for(first_seen.len(), WAIT);
        h.stop_and_join();

        prop_assert_eq!(calls.len(), first_seen.len());
        prop_assert_eq!(h.sink.log_ids(), first_seen);
    }

    /// Whatever the stop point, every accepted record gets one callback.
    #[test]
    fn stop_never_loses_an_outcome(count in 1i64..20, stop_after in 0usize..20) {
        let h = Harness::new();
        h.handler("echo", FakeHandler::new());
        h.start();

        for log_id in 0..count {
            h.accept(trigger(1, log_id, "echo"));
            if log_id as usize == stop_after {
                h.worker.request_stop("maintenance");
                break;
            }
        }
        let accepted = (count as usize).min(stop_after + 1);
        h.worker.interrupt("maintenance");
        h.worker.join();

        let ids = h.sink.log_ids();
        prop_assert_eq!(ids.len(), accepted);
        prop_assert_eq!(ids, (0..accepted as i64).collect::<Vec<_>>());
    }
}
