// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Boundaries between the worker core and the outside world

pub mod callback;
pub mod handler;
pub mod traced;

pub use callback::{CallbackSink, ChannelCallbackSink};
pub use handler::{
    handler_fn, HandlerError, HandlerRegistry, HandlerResolver, JobHandler, ResolveError,
};
pub use traced::{TracedResolver, TracedSink};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use callback::FakeCallbackSink;
#[cfg(any(test, feature = "test-support"))]
pub use handler::FakeHandler;
