// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Callback forwarding: one JSON callback record per line.

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tw_core::CallbackRecord;

/// Write every callback received on `rx` to `out` until all senders are
/// gone. Returns the number of records written.
pub async fn forward_callbacks<W>(
    mut rx: mpsc::UnboundedReceiver<CallbackRecord>,
    mut out: W,
) -> std::io::Result<usize>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;
    while let Some(callback) = rx.recv().await {
        let mut line = serde_json::to_vec(&callback)?;
        line.push(b'\n');
        out.write_all(&line).await?;
        out.flush().await?;
        written += 1;
    }
    tracing::debug!(written, "callback stream closed");
    Ok(written)
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
