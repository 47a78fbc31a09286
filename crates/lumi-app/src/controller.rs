use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use lumi_core::dictionary::DictionaryProvider;
use lumi_core::language::LanguageAnalyzer;
use lumi_core::types::AppEvent;
use lumi_translator::TranslationProvider;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::bridge::{BridgeRequest, SurfaceBridge};
use crate::events::event_loop;
use crate::io::{output_loop, surface_output_loop, watcher_io};
use crate::selection::debounce_selections;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub input_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub app_to_out: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    /// Raw selection bursts, debounced before they become lookups.
    pub selections: (AsyncSender<String>, AsyncReceiver<String>),
    /// Outgoing bridge traffic for the rendering surface.
    pub surface_out: (AsyncSender<BridgeRequest>, AsyncReceiver<BridgeRequest>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            input_to_app: kanal::bounded_async(64),
            app_to_out: kanal::bounded_async(256), // lookup burst capacity
            selections: kanal::bounded_async(64),
            surface_out: kanal::bounded_async(64),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub async fn spawn_tasks(
        &self,
        analyzer: Arc<dyn LanguageAnalyzer>,
        dictionary: Arc<dyn DictionaryProvider>,
        translator: Arc<dyn TranslationProvider>,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.input_to_app.1.clone(),
            self.channels.app_to_out.0.clone(),
            analyzer,
            dictionary,
            translator,
        ));

        // Output loop
        tasks.spawn(output_loop(self.channels.app_to_out.1.clone()));

        // Selection debounce stage
        let (debounce, max_selection_len, request_timeout) = {
            let config = self.state.config.read().await;
            (
                Duration::from_millis(config.annotate.debounce_ms),
                config.annotate.max_selection_len,
                Duration::from_millis(config.network.request_timeout_ms),
            )
        };
        tasks.spawn(debounce_selections(
            self.channels.selections.1.clone(),
            self.channels.input_to_app.0.clone(),
            debounce,
            max_selection_len,
            self.cancel_token.child_token(),
        ));

        // Rendering-surface bridge
        let bridge = Arc::new(SurfaceBridge::new(
            self.channels.surface_out.0.clone(),
            request_timeout,
        ));
        tasks.spawn(surface_output_loop(self.channels.surface_out.1.clone()));

        // Watcher IO
        tasks.spawn(watcher_io(
            self.channels.input_to_app.0.clone(),
            self.channels.selections.0.clone(),
            bridge,
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
