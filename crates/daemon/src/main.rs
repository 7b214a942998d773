// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger worker daemon (twd)
//!
//! Reads trigger records from stdin, runs them on per-job workers, and
//! writes callback records to stdout.
//!
//! Architecture:
//! - Intake: main task reading stdin lines into the worker pool
//! - Workers: one thread per job id, owned by the pool
//! - Output task: forwards callbacks from the channel sink to stdout

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info, warn};
use tw_adapters::{ChannelCallbackSink, TracedResolver, TracedSink};
use tw_daemon::{dispatch, forward_callbacks, handlers, Config, ConfigError};
use tw_engine::WorkerPool;

/// How often stopped workers are reaped, and how often a draining daemon
/// checks whether the pool has gone quiet.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle info flags before any config is read
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("twd {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("twd {}", env!("CARGO_PKG_VERSION"));
                println!("Trigger worker daemon - runs job triggers on per-job worker threads");
                println!();
                println!("USAGE:");
                println!("    twd < triggers.jsonl");
                println!();
                println!("Reads one JSON trigger record per line from stdin and writes one");
                println!("JSON callback record per executed or drained trigger to stdout.");
                println!("Exits once stdin is closed and every worker is idle.");
                println!();
                println!("BUILTIN HANDLERS:");
                println!("    echo     Succeed with the params as the message");
                println!("    sleep    Sleep for params milliseconds");
                println!("    fail     Fail with the params as the message");
                println!();
                println!("OPTIONS:");
                println!("    -h, --help       Print help information");
                println!("    -v, --version    Print version information");
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: twd [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config = Config::load()?;
    let log_guard = setup_logging(&config)?;
    info!(
        idle_timeout_ms = config.worker.idle_timeout.as_millis() as u64,
        "starting trigger worker daemon"
    );

    let (sink, callbacks) = ChannelCallbackSink::new();
    let pool = Arc::new(WorkerPool::new(
        TracedResolver::new(handlers::builtin_registry()),
        TracedSink::new(sink),
        config.worker.clone(),
    ));
    let output = tokio::spawn(forward_callbacks(callbacks, tokio::io::stdout()));

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    // NOTE: created outside the loop so select! does not reset it
    let mut tick = tokio::time::interval(TICK_INTERVAL);
    let mut stdin_open = true;

    let reason = loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => {
                    if let Err(e) = dispatch(&*pool, &line) {
                        warn!(error = %e, "dropping trigger line");
                    }
                }
                Ok(None) => {
                    info!("stdin closed, waiting for workers to finish");
                    stdin_open = false;
                }
                Err(e) => {
                    error!(error = %e, "failed to read stdin");
                    stdin_open = false;
                }
            },

            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
                break "executor shutdown";
            }

            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down...");
                break "executor shutdown";
            }

            _ = tick.tick() => {
                let reap_pool = Arc::clone(&pool);
                match tokio::task::spawn_blocking(move || reap_pool.reap()).await {
                    Ok(0) => {}
                    Ok(reaped) => info!(reaped, "reaped idle workers"),
                    Err(e) => error!(error = %e, "reap task failed"),
                }
                if !stdin_open && !pool.is_active() {
                    break "executor shutdown";
                }
            }
        }
    };

    // Joining workers blocks, keep it off the runtime threads
    let shutdown_pool = Arc::clone(&pool);
    tokio::task::spawn_blocking(move || shutdown_pool.shutdown(reason)).await?;
    // Dropping the pool drops the last sink, which ends the output task
    drop(pool);
    match output.await? {
        Ok(written) => info!(written, "callbacks flushed"),
        Err(e) => error!(error = %e, "failed to write callbacks"),
    }

    info!("Daemon stopped");
    drop(log_guard);
    Ok(())
}

fn setup_logging(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, ConfigError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Create log directory if needed
    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Set up file appender
    let file_appender = tracing_appender::rolling::never(
        config.log_path.parent().ok_or(ConfigError::NoStateDir)?,
        config
            .log_path
            .file_name()
            .ok_or(ConfigError::NoStateDir)?,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Set up subscriber with env filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}
