// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Channel-backed callback sink.

use super::CallbackSink;
use tokio::sync::mpsc;
use tw_core::CallbackRecord;

/// Forwards callbacks into an unbounded channel.
///
/// Sending never blocks, so worker threads can deliver without a runtime.
/// The receiving half is owned by whatever forwards callbacks upstream.
#[derive(Clone, Debug)]
pub struct ChannelCallbackSink {
    tx: mpsc::UnboundedSender<CallbackRecord>,
}

impl ChannelCallbackSink {
    /// Create a sink and the receiver its callbacks arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<CallbackRecord>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl CallbackSink for ChannelCallbackSink {
    fn deliver(&self, callback: CallbackRecord) {
        let log_id = callback.log_id;
        if self.tx.send(callback).is_err() {
            tracing::warn!(%log_id, "callback receiver closed, dropping callback");
        }
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
