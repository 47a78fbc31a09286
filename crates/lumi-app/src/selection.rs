use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use lumi_core::types::AppEvent;
use tokio_util::sync::CancellationToken;

/// Coalesce a burst of selection changes into one lookup.
///
/// Every new selection restarts the quiet window; only the last selection
/// standing when the window elapses is forwarded. Selections that are
/// empty or longer than `max_len` characters are dropped at receipt.
pub async fn debounce_selections(
    selection_rx: AsyncReceiver<String>,
    event_tx: AsyncSender<AppEvent>,
    window: Duration,
    max_len: usize,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut pending: Option<String> = None;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("selection stage stopping");
                return Ok(());
            }
            selection = selection_rx.recv() => {
                let selection = selection?.trim().to_string();
                if selection.is_empty() {
                    continue;
                }
                if selection.chars().count() > max_len {
                    tracing::debug!("ignoring selection of {} chars", selection.len());
                    continue;
                }
                pending = Some(selection);
            }
            _ = tokio::time::sleep(window), if pending.is_some() => {
                if let Some(selection) = pending.take() {
                    event_tx.send(AppEvent::LookupWord(selection)).await?;
                }
            }
        }
    }
}
