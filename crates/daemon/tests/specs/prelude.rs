//! Shared helpers for the twd black-box tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use assert_cmd::Command;
use serde_json::Value;
use std::process::Output;
use std::time::Duration;
use tempfile::TempDir;

// Hard cap per invocation; a hung daemon fails the test instead of the run.
const SPEC_TIMEOUT: Duration = Duration::from_secs(20);

/// Command for the twd binary with no environment leaking in.
pub fn twd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_twd"));
    for var in [
        "TW_CONFIG",
        "TW_IDLE_TIMEOUT_MS",
        "TW_HANDLER_TIMEOUT_MS",
        "TW_LOG_PATH",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd.timeout(SPEC_TIMEOUT);
    cmd
}

/// A daemon run isolated in its own state directory.
pub struct Run {
    pub state: TempDir,
    envs: Vec<(String, String)>,
}

impl Run {
    pub fn new() -> Self {
        Self {
            state: tempfile::tempdir().unwrap(),
            envs: Vec::new(),
        }
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Feed `lines` on stdin, wait for exit.
    pub fn feed(&self, lines: &[&str]) -> Output {
        let mut input = lines.join("\n");
        input.push('\n');
        let mut cmd = twd();
        cmd.env("TW_STATE_DIR", self.state.path());
        for (k, v) in &self.envs {
            cmd.env(k, v);
        }
        cmd.write_stdin(input).output().unwrap()
    }

    pub fn log(&self) -> String {
        std::fs::read_to_string(self.state.path().join("daemon.log")).unwrap_or_default()
    }
}

/// Parse every stdout line as JSON.
pub fn callbacks(output: &Output) -> Vec<Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

/// The callback for `log_id`, which must be unique.
pub fn callback_for(callbacks: &[Value], log_id: i64) -> Value {
    let matching: Vec<&Value> = callbacks
        .iter()
        .filter(|c| c["logId"] == log_id)
        .collect();
    assert_eq!(
        matching.len(),
        1,
        "expected one callback for {log_id}, got {callbacks:?}"
    );
    matching[0].clone()
}

/// Build one trigger line.
pub fn trigger(job_id: i64, log_id: i64, handler: &str, params: &str) -> String {
    serde_json::json!({
        "jobId": job_id,
        "logId": log_id,
        "executorHandler": handler,
        "executorParams": params,
        "logDateTim": 1_769_760_849_250i64,
    })
    .to_string()
}

/// Build one trigger line with a block strategy.
pub fn trigger_with_strategy(
    job_id: i64,
    log_id: i64,
    handler: &str,
    params: &str,
    strategy: &str,
) -> String {
    let mut value: Value = serde_json::from_str(&trigger(job_id, log_id, handler, params)).unwrap();
    value["executorBlockStrategy"] = Value::from(strategy);
    value.to_string()
}
