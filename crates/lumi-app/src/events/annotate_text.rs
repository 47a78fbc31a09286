use kanal::AsyncSender;
use lumi_core::dictionary::DictionaryProvider;
use lumi_core::language::LanguageAnalyzer;
use lumi_core::types::AppEvent;
use lumi_document::Document;

/// How many looked-up lemmas are pushed to the output per input.
const MAX_SHOWN: usize = 10;

pub async fn handle_text_input(
    text: &str,
    analyzer: &dyn LanguageAnalyzer,
    dictionary: &dyn DictionaryProvider,
    out_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let normalized = analyzer.normalize(text);
    let tokens = analyzer.tokenize(&normalized);
    tracing::debug!("tokenized into {} tokens", tokens.len());

    // Annotate into a headless tree; spans carry the lemma each word
    // resolves to.
    let mut doc = Document::new();
    let container = doc.create_element("p");
    let root = doc.root();
    doc.append_child(root, container);
    lumi_annotate::render(&mut doc, container, &tokens);

    let mut lemmas: Vec<String> = Vec::new();
    for token in &tokens {
        if token.is_word && !lemmas.contains(&token.lemma) {
            lemmas.push(token.lemma.clone());
        }
    }
    if lemmas.is_empty() {
        tracing::debug!("no words in input, nothing to look up");
        return Ok(());
    }

    let entries = dictionary.batch_lookup(&lemmas).await;
    let found = entries.values().filter(|e| e.is_some()).count();
    tracing::info!("looked up {} lemmas, {} found", lemmas.len(), found);

    for lemma in lemmas.into_iter().take(MAX_SHOWN) {
        let entry = entries.get(&lemma).cloned().flatten();
        out_tx
            .send(AppEvent::ShowEntry { word: lemma, entry })
            .await?;
    }

    Ok(())
}
