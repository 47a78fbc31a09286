use kanal::AsyncSender;
use lumi_core::types::AppEvent;
use lumi_translator::TranslationProvider;

use crate::state::AppState;

pub async fn handle_translate(
    state: &AppState,
    text: &str,
    translator: &dyn TranslationProvider,
    out_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (target_lang, source_lang) = {
        let config = state.config.read().await;
        (
            config.translator.target_lang.clone(),
            config.translator.source_lang.clone(),
        )
    };

    let result = translator
        .translate(text, &target_lang, source_lang.as_deref())
        .await;
    tracing::debug!("translated via {}", result.provider);

    out_tx.send(AppEvent::ShowTranslation(result)).await?;
    Ok(())
}
