// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Callback sinks: where outcomes go after a worker is done with a trigger

mod channel;

pub use channel::ChannelCallbackSink;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeCallbackSink;

use tw_core::CallbackRecord;

/// Receives one callback per accepted trigger.
///
/// Delivery is fire-and-forget from the worker's point of view: it never
/// waits for acknowledgement and never retries. Batching and retry belong
/// to the implementation.
pub trait CallbackSink: Clone + Send + Sync + 'static {
    fn deliver(&self, callback: CallbackRecord);
}
