use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lumi_core::dictionary::DictionaryProvider;
use lumi_core::language::LanguageAnalyzer;
use lumi_core::types::AppEvent;
use lumi_translator::TranslationProvider;

use crate::state::AppState;

pub mod annotate_text;
pub mod lookup_word;
pub mod translate_text;

use annotate_text::handle_text_input;
use lookup_word::handle_lookup;
use translate_text::handle_translate;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<AppEvent>,
    out_tx: AsyncSender<AppEvent>,
    analyzer: Arc<dyn LanguageAnalyzer>,
    dictionary: Arc<dyn DictionaryProvider>,
    translator: Arc<dyn TranslationProvider>,
) -> anyhow::Result<()> {
    tracing::info!(
        "event loop started (dictionary: {}, translator: {})",
        dictionary.name(),
        translator.name()
    );

    loop {
        let event = input_rx.recv().await?;
        handle_event(
            &state,
            analyzer.as_ref(),
            dictionary.as_ref(),
            translator.as_ref(),
            &out_tx,
            event,
        )
        .await?;
    }
}

async fn handle_event(
    state: &AppState,
    analyzer: &dyn LanguageAnalyzer,
    dictionary: &dyn DictionaryProvider,
    translator: &dyn TranslationProvider,
    out_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::ConfigChanged => {}
        AppEvent::TextInput(text) => {
            tracing::debug!("text input: {} chars", text.len());
            handle_text_input(&text, analyzer, dictionary, out_tx).await?;
        }
        AppEvent::LookupWord(word) => {
            handle_lookup(&word, analyzer, dictionary, out_tx).await?;
        }
        AppEvent::Translate(text) => {
            handle_translate(state, &text, translator, out_tx).await?;
        }
        AppEvent::ShowEntry { .. } | AppEvent::ShowTranslation(_) => {
            // Outbound-only events, handled by the output loop.
        }
    }

    Ok(())
}
