//! Daemon help and version specs
//!
//! Verify twd --help and --version work without reading config or stdin.

use crate::prelude::*;
use yare::parameterized;

#[parameterized(
    long = { "--version" },
    short = { "-v" },
    capital = { "-V" },
)]
fn version_flag_prints_version(flag: &str) {
    let output = twd().arg(flag).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.starts_with(concat!("twd ", env!("CARGO_PKG_VERSION"))),
        "expected version, got: {stdout}"
    );
}

#[parameterized(
    long = { "--help" },
    short = { "-h" },
    word = { "help" },
)]
fn help_flag_shows_usage(flag: &str) {
    let output = twd().arg(flag).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("USAGE:"), "expected USAGE section, got: {stdout}");
    assert!(stdout.contains("--help"), "expected --help in output");
    assert!(stdout.contains("--version"), "expected --version in output");
    assert!(stdout.contains("echo"), "expected builtin handlers listed");
}

#[test]
fn unknown_argument_fails() {
    let output = twd().arg("--bogus").output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unexpected argument '--bogus'"),
        "got: {stderr}"
    );
}
