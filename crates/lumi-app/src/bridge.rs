use std::collections::HashMap;
use std::time::Duration;

use kanal::AsyncSender;
use lumi_core::types::AppEvent;
use serde::Serialize;
use tokio::sync::{Mutex, oneshot};
use uuid::Uuid;

/// Outgoing message to the embedded rendering surface, in the wire shape
/// the surface speaks. Notifications carry no id; requests do, and the
/// surface echoes it back.
#[derive(Debug, Clone, Serialize)]
pub struct BridgeRequest {
    #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(rename = "type")]
    pub command: String,
    pub payload: serde_json::Value,
}

/// Response from the surface to a request it was sent.
#[derive(Debug, Clone)]
pub struct BridgeResponse {
    pub id: Uuid,
    pub result: Result<serde_json::Value, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// No response arrived inside the timeout window.
    #[error("request timed out")]
    Timeout,

    #[error("surface connection closed")]
    Closed,

    #[error("surface error: {0}")]
    Remote(String),
}

/// Request/response exchange with a rendering surface that only speaks
/// messages. Every request gets a fresh uuid; a response that arrives
/// after its request timed out finds no pending slot and is dropped.
pub struct SurfaceBridge {
    outgoing: AsyncSender<BridgeRequest>,
    pending: Mutex<HashMap<Uuid, oneshot::Sender<Result<serde_json::Value, String>>>>,
    timeout: Duration,
}

impl SurfaceBridge {
    pub fn new(outgoing: AsyncSender<BridgeRequest>, timeout: Duration) -> Self {
        Self {
            outgoing,
            pending: Mutex::new(HashMap::new()),
            timeout,
        }
    }

    /// Fire-and-forget command (navigation, decoration updates).
    pub async fn notify(
        &self,
        command: &str,
        payload: serde_json::Value,
    ) -> Result<(), BridgeError> {
        self.outgoing
            .send(BridgeRequest {
                id: None,
                command: command.to_string(),
                payload,
            })
            .await
            .map_err(|_| BridgeError::Closed)
    }

    /// Send a request and wait for the matching response. The caller
    /// never hangs: the pending slot is dropped when the window elapses.
    pub async fn request(
        &self,
        command: &str,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, BridgeError> {
        let id = Uuid::new_v4();
        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id, tx);

        let sent = self
            .outgoing
            .send(BridgeRequest {
                id: Some(id),
                command: command.to_string(),
                payload,
            })
            .await;
        if sent.is_err() {
            self.pending.lock().await.remove(&id);
            return Err(BridgeError::Closed);
        }

        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(Ok(value))) => Ok(value),
            Ok(Ok(Err(message))) => Err(BridgeError::Remote(message)),
            Ok(Err(_)) => Err(BridgeError::Closed),
            Err(_) => {
                self.pending.lock().await.remove(&id);
                tracing::warn!("bridge request {command:?} timed out");
                Err(BridgeError::Timeout)
            }
        }
    }

    /// Resolve the pending request a response belongs to. Late and
    /// unknown responses are ignored.
    pub async fn handle_response(&self, response: BridgeResponse) {
        match self.pending.lock().await.remove(&response.id) {
            Some(tx) => {
                let _ = tx.send(response.result);
            }
            None => {
                tracing::debug!("ignoring late response {}", response.id);
            }
        }
    }
}

/// Translate surface notifications into app events. Selection changes go
/// through the debounce stage; unrecognized notification types are
/// dropped the way unknown messages are.
pub async fn forward_surface_event(
    event_tx: &AsyncSender<AppEvent>,
    selection_tx: &AsyncSender<String>,
    kind: &str,
    payload: serde_json::Value,
) -> anyhow::Result<()> {
    match kind {
        "selectionChanged" => {
            if let Some(text) = payload.get("text").and_then(|v| v.as_str()) {
                selection_tx.send(text.to_string()).await?;
            }
        }
        "decorationActivated" => {
            if let Some(word) = payload.get("word").and_then(|v| v.as_str()) {
                event_tx.send(AppEvent::LookupWord(word.to_string())).await?;
            }
        }
        other => {
            tracing::debug!("ignoring surface event {other:?}");
        }
    }
    Ok(())
}

/// Route one inbound surface message: a `requestId` marks it as the reply
/// to a pending request, a `type` as a notification. Anything else (and
/// any unparseable id) is dropped.
pub async fn dispatch_surface_message(
    bridge: &SurfaceBridge,
    event_tx: &AsyncSender<AppEvent>,
    selection_tx: &AsyncSender<String>,
    message: serde_json::Value,
) -> anyhow::Result<()> {
    if let Some(raw_id) = message.get("requestId").and_then(|v| v.as_str()) {
        let Ok(id) = Uuid::parse_str(raw_id) else {
            tracing::debug!("ignoring response with malformed id {raw_id:?}");
            return Ok(());
        };
        let result = match message.get("error").and_then(|v| v.as_str()) {
            Some(error) => Err(error.to_string()),
            None => Ok(message
                .get("result")
                .cloned()
                .unwrap_or(serde_json::Value::Null)),
        };
        bridge.handle_response(BridgeResponse { id, result }).await;
        return Ok(());
    }

    if let Some(kind) = message.get("type").and_then(|v| v.as_str()) {
        let payload = message
            .get("payload")
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        return forward_surface_event(event_tx, selection_tx, kind, payload).await;
    }

    tracing::debug!("ignoring surface message without type or requestId");
    Ok(())
}
