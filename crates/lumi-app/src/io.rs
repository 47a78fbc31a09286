use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lumi_core::types::AppEvent;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::bridge::{BridgeRequest, SurfaceBridge, dispatch_surface_message};

/// Feed stdin lines into the event loop. Lines starting with `:t ` are
/// translation requests, `:l ` single-word lookups, `:s ` inbound surface
/// messages (JSON), `:p` a position request to the surface, `:c` clears
/// its decorations; anything else is text to annotate.
pub async fn watcher_io(
    event_tx: AsyncSender<AppEvent>,
    selection_tx: AsyncSender<String>,
    bridge: Arc<SurfaceBridge>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    if atty::is(atty::Stream::Stdin) {
        tracing::info!("stdin is a tty, type text to annotate (:l word, :t text)");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("stdin watcher stopping");
                return Ok(());
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!("stdin closed");
                    return Ok(());
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                if let Some(rest) = line.strip_prefix(":s ") {
                    match serde_json::from_str(rest) {
                        Ok(message) => {
                            dispatch_surface_message(&bridge, &event_tx, &selection_tx, message)
                                .await?;
                        }
                        Err(e) => tracing::warn!("unparseable surface message: {e}"),
                    }
                    continue;
                }
                if line == ":p" {
                    // The reply comes back as a later `:s` line; waiting
                    // here would stall the watcher for the whole window.
                    let bridge = bridge.clone();
                    tokio::spawn(async move {
                        match bridge.request("getCurrentPosition", json!({})).await {
                            Ok(position) => tracing::info!("position: {position}"),
                            Err(e) => tracing::warn!("position request failed: {e}"),
                        }
                    });
                    continue;
                }
                if line == ":c" {
                    if let Err(e) = bridge.notify("clearDecorations", json!({})).await {
                        tracing::warn!("clearDecorations failed: {e}");
                    }
                    continue;
                }

                let event = if let Some(rest) = line.strip_prefix(":t ") {
                    AppEvent::Translate(rest.to_string())
                } else if let Some(rest) = line.strip_prefix(":l ") {
                    AppEvent::LookupWord(rest.to_string())
                } else {
                    AppEvent::TextInput(line.to_string())
                };
                event_tx.send(event).await?;
            }
        }
    }
}

/// Ship outgoing bridge traffic to the embedding layer, one JSON line per
/// message.
pub async fn surface_output_loop(out_rx: AsyncReceiver<BridgeRequest>) -> anyhow::Result<()> {
    loop {
        let request = out_rx.recv().await?;
        println!("@surface {}", serde_json::to_string(&request)?);
    }
}

/// Render outbound events for the terminal.
pub async fn output_loop(out_rx: AsyncReceiver<AppEvent>) -> anyhow::Result<()> {
    loop {
        match out_rx.recv().await? {
            AppEvent::ShowEntry { word, entry } => match entry {
                Some(entry) => {
                    let first = entry
                        .definitions
                        .first()
                        .map(|d| format!("{} {}", d.part_of_speech, d.meaning))
                        .unwrap_or_default();
                    println!("{word}: {first}");
                }
                None => println!("{word}: (no entry)"),
            },
            AppEvent::ShowTranslation(result) => {
                println!("[{}] {}", result.provider, result.translation);
            }
            other => {
                tracing::debug!("output loop ignoring {:?}", std::mem::discriminant(&other));
            }
        }
    }
}
