// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration: state directory, optional TOML file, env overrides.

use crate::env;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tw_engine::WorkerConfig;

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine state directory")]
    NoStateDir,
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// On-disk config file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub idle_timeout_ms: Option<u64>,
    pub handler_timeout_ms: Option<u64>,
    pub log_path: Option<PathBuf>,
}

impl FileConfig {
    pub fn parse(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root state directory (e.g. ~/.local/state/tw)
    pub state_dir: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
    /// Settings handed to every job worker
    pub worker: WorkerConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// Precedence, lowest first: defaults, config file
    /// (`TW_CONFIG` or `<state_dir>/config.toml`), environment.
    pub fn load() -> Result<Self, ConfigError> {
        let state_dir = env::state_dir().ok_or(ConfigError::NoStateDir)?;
        let file = match env::config_path() {
            Some(path) => Some(read_file(&path)?),
            None => {
                let path = state_dir.join("config.toml");
                if path.exists() {
                    Some(read_file(&path)?)
                } else {
                    None
                }
            }
        };

        let mut config = Self::from_file(state_dir, file.unwrap_or_default());
        if let Some(idle) = env::idle_timeout() {
            config.worker.idle_timeout = idle;
        }
        if let Some(timeout) = env::handler_timeout() {
            config.worker.default_timeout = Some(timeout);
        }
        if let Some(log_path) = env::log_path() {
            config.log_path = log_path;
        }
        Ok(config)
    }

    /// Defaults for `state_dir` overlaid with `file`.
    pub fn from_file(state_dir: PathBuf, file: FileConfig) -> Self {
        let mut worker = WorkerConfig::default();
        if let Some(ms) = file.idle_timeout_ms {
            worker.idle_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = file.handler_timeout_ms {
            worker.default_timeout = Some(Duration::from_millis(ms));
        }
        Self {
            log_path: file
                .log_path
                .unwrap_or_else(|| state_dir.join("daemon.log")),
            state_dir,
            worker,
        }
    }
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    FileConfig::parse(path, &text)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
