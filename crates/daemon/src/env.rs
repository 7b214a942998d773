// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::time::Duration;

/// Resolve state directory: TW_STATE_DIR > platform state dir/tw > ~/.local/state/tw
pub fn state_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("TW_STATE_DIR") {
        return Some(PathBuf::from(dir));
    }
    if let Some(dir) = dirs::state_dir() {
        return Some(dir.join("tw"));
    }
    dirs::home_dir().map(|home| home.join(".local/state/tw"))
}

/// Explicit config file path
pub fn config_path() -> Option<PathBuf> {
    std::env::var("TW_CONFIG").ok().map(PathBuf::from)
}

/// Idle timeout override for job workers
pub fn idle_timeout() -> Option<Duration> {
    duration_ms("TW_IDLE_TIMEOUT_MS")
}

/// Default handler timeout override
pub fn handler_timeout() -> Option<Duration> {
    duration_ms("TW_HANDLER_TIMEOUT_MS")
}

/// Log file override
pub fn log_path() -> Option<PathBuf> {
    std::env::var("TW_LOG_PATH").ok().map(PathBuf::from)
}

fn duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}
