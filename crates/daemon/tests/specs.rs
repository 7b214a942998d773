//! Black-box tests for the twd binary.
//!
//! These tests are black-box: they pipe trigger lines into `twd` and verify
//! the callback lines on stdout and the exit status.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/help.rs"]
mod help;
#[path = "specs/triggers.rs"]
mod triggers;
