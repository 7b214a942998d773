// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! FIFO trigger queue with log-id deduplication

use super::state::{Phase, PhaseCell};
use parking_lot::{Condvar, Mutex};
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tw_core::{LogId, TriggerRecord};

/// Why [`TriggerQueue::push`] refused a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PushError {
    Duplicate,
    Closed,
}

/// Result of one wait on the queue
#[derive(Debug)]
pub(crate) enum Next {
    Record(TriggerRecord),
    Stop,
    IdleTimeout,
}

#[derive(Default)]
struct Records {
    items: VecDeque<TriggerRecord>,
    closed: bool,
}

/// Queue shared between producers and one run loop.
///
/// `records` and `pending` are separate locks; no path holds both.
#[derive(Default)]
pub(crate) struct TriggerQueue {
    records: Mutex<Records>,
    /// Log ids queued and not yet dequeued
    pending: Mutex<HashSet<LogId>>,
    has_data: Condvar,
}

impl TriggerQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append `record` unless its log id is already pending or the queue is
    /// closed.
    pub(crate) fn push(&self, record: TriggerRecord) -> Result<(), PushError> {
        let log_id = record.log_id;
        if !self.pending.lock().insert(log_id) {
            return Err(PushError::Duplicate);
        }

        let mut records = self.records.lock();
        if records.closed {
            drop(records);
            self.pending.lock().remove(&log_id);
            return Err(PushError::Closed);
        }
        records.items.push_back(record);
        drop(records);
        self.has_data.notify_one();
        Ok(())
    }

    /// Block until a record arrives, the stop flag is set, or the idle
    /// deadline passes.
    ///
    /// A dequeued record is marked Running before the queue lock is released
    /// so observers never see an empty queue with an Idle phase mid-handoff.
    /// On idle timeout the queue is closed under the same lock, so no record
    /// can be accepted after the loop has decided to stop.
    pub(crate) fn next(&self, stop: &AtomicBool, phase: &PhaseCell, idle: Duration) -> Next {
        let deadline = Instant::now() + idle;
        let mut records = self.records.lock();
        loop {
            if stop.load(Ordering::Acquire) {
                return Next::Stop;
            }
            if let Some(record) = records.items.pop_front() {
                phase.store(Phase::Running);
                drop(records);
                self.pending.lock().remove(&record.log_id);
                return Next::Record(record);
            }
            if self.has_data.wait_until(&mut records, deadline).timed_out()
                && records.items.is_empty()
                && !stop.load(Ordering::Acquire)
            {
                records.closed = true;
                return Next::IdleTimeout;
            }
        }
    }

    /// Wake a parked [`TriggerQueue::next`] so it re-checks the stop flag.
    pub(crate) fn wake(&self) {
        let _records = self.records.lock();
        self.has_data.notify_all();
    }

    /// Close the queue and take everything left, in FIFO order.
    pub(crate) fn close_and_drain(&self) -> Vec<TriggerRecord> {
        let drained: Vec<TriggerRecord> = {
            let mut records = self.records.lock();
            records.closed = true;
            records.items.drain(..).collect()
        };
        let mut pending = self.pending.lock();
        for record in &drained {
            pending.remove(&record.log_id);
        }
        drained
    }

    pub(crate) fn len(&self) -> usize {
        self.records.lock().items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
