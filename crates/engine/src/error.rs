// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for workers and the worker pool

use thiserror::Error;
use tw_core::JobId;

/// Errors from driving a worker's lifecycle
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("worker for job {0} already started")]
    AlreadyStarted(JobId),
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Errors from routing a trigger through the pool
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("worker error: {0}")]
    Worker(#[from] WorkerError),
}
