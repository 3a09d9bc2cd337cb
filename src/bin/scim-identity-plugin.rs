//! Stdio host transport for the SCIM identity plugin.
//!
//! Reads one JSON `PluginOperationRequest` per stdin line and writes one JSON
//! `PluginOperationResponse` per stdout line. Requests run concurrently, so
//! responses may come back out of order; hosts correlate them by `requestId`.
//! Logs go to stderr, filtered by `RUST_LOG` (default `info`).
//!
//! Hosts send `configure` first and wait for its response before querying.
//! Ctrl-C cancels in-flight backend calls; their responses still get written.

use log::{debug, error, info};
use scim_identity_plugin::{PluginOperationHandler, PluginOperationResponse, ScimPlugin};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .format_timestamp_secs()
        .init();

    info!(
        "{} {} waiting for requests on stdin",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let handler = Arc::new(PluginOperationHandler::new(ScimPlugin::new()));
    let shutdown = CancellationToken::new();
    let (tx, rx) = mpsc::channel::<PluginOperationResponse>(64);

    let writer = tokio::spawn(write_responses(rx));

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, cancelling in-flight requests");
            signal_token.cancel();
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight = JoinSet::new();

    loop {
        let line = tokio::select! {
            _ = shutdown.cancelled() => break,
            line = lines.next_line() => line?,
        };
        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        let handler = Arc::clone(&handler);
        let tx = tx.clone();
        let cancellation = shutdown.child_token();
        in_flight.spawn(async move {
            let response = handler.handle_json(&line, cancellation).await;
            if tx.send(response).await.is_err() {
                debug!("Response writer closed, dropping response");
            }
        });
    }

    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            error!("Request task failed: {}", e);
        }
    }
    drop(tx);
    writer.await??;

    info!("stdin closed, exiting");
    Ok(())
}

async fn write_responses(
    mut rx: mpsc::Receiver<PluginOperationResponse>,
) -> Result<(), std::io::Error> {
    let mut stdout = tokio::io::stdout();
    while let Some(response) = rx.recv().await {
        let mut line = serde_json::to_vec(&response)?;
        line.push(b'\n');
        stdout.write_all(&line).await?;
        stdout.flush().await?;
    }
    Ok(())
}
