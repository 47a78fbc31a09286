use kanal::AsyncSender;
use lumi_core::dictionary::DictionaryProvider;
use lumi_core::language::LanguageAnalyzer;
use lumi_core::types::AppEvent;

pub async fn handle_lookup(
    word: &str,
    analyzer: &dyn LanguageAnalyzer,
    dictionary: &dyn DictionaryProvider,
    out_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let lemma = analyzer.lemma(word);
    let entry = dictionary.lookup(&lemma).await;

    match &entry {
        Some(entry) => tracing::info!(
            "{word:?} -> {} ({} definitions)",
            entry.lemma,
            entry.definitions.len()
        ),
        None => tracing::info!("{word:?} -> {lemma}: no entry"),
    }

    out_tx
        .send(AppEvent::ShowEntry {
            word: word.to_string(),
            entry,
        })
        .await?;
    Ok(())
}
