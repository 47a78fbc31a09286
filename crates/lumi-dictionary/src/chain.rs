use std::collections::HashMap;
use std::sync::Arc;

use lumi_core::dictionary::DictionaryProvider;
use lumi_core::types::DictionaryEntry;

/// Ordered fallback over several providers: the first `Some` wins. A
/// provider's miss (or soft failure) just moves the query to the next one.
pub struct DictionaryChain {
    providers: Vec<Arc<dyn DictionaryProvider>>,
}

impl DictionaryChain {
    pub fn new(providers: Vec<Arc<dyn DictionaryProvider>>) -> Self {
        Self { providers }
    }
}

#[async_trait::async_trait]
impl DictionaryProvider for DictionaryChain {
    fn name(&self) -> &str {
        "chain"
    }

    fn is_offline(&self) -> bool {
        self.providers.iter().all(|p| p.is_offline())
    }

    async fn lookup(&self, word: &str) -> Option<DictionaryEntry> {
        for provider in &self.providers {
            if let Some(entry) = provider.lookup(word).await {
                tracing::debug!(provider = provider.name(), word, "dictionary hit");
                return Some(entry);
            }
        }
        None
    }

    async fn batch_lookup(&self, words: &[String]) -> HashMap<String, Option<DictionaryEntry>> {
        let mut results: HashMap<String, Option<DictionaryEntry>> = words
            .iter()
            .map(|w| (w.trim().to_lowercase(), None))
            .collect();
        let mut remaining: Vec<String> = results.keys().cloned().collect();

        for provider in &self.providers {
            if remaining.is_empty() {
                break;
            }

            let found = provider.batch_lookup(&remaining).await;
            for (key, entry) in found {
                if entry.is_some() {
                    results.insert(key, entry);
                }
            }

            remaining.retain(|key| matches!(results.get(key), Some(None)));
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use lumi_core::types::Definition;

    use super::*;

    struct Miss {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl DictionaryProvider for Miss {
        fn name(&self) -> &str {
            "miss"
        }

        async fn lookup(&self, _word: &str) -> Option<DictionaryEntry> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            None
        }
    }

    struct Hit;

    #[async_trait::async_trait]
    impl DictionaryProvider for Hit {
        fn name(&self) -> &str {
            "hit"
        }

        fn is_offline(&self) -> bool {
            true
        }

        async fn lookup(&self, word: &str) -> Option<DictionaryEntry> {
            Some(DictionaryEntry {
                word: word.to_string(),
                lemma: word.trim().to_lowercase(),
                phonetic: None,
                audio_url: None,
                definitions: vec![Definition {
                    part_of_speech: "n.".to_string(),
                    meaning: "something".to_string(),
                    meaning_cn: None,
                    examples: None,
                }],
                examples: None,
                synonyms: vec![],
                antonyms: vec![],
                word_forms: None,
            })
        }
    }

    #[tokio::test]
    async fn falls_through_to_next_provider() {
        let miss = Arc::new(Miss {
            calls: AtomicUsize::new(0),
        });
        let chain = DictionaryChain::new(vec![miss.clone(), Arc::new(Hit)]);

        let entry = chain.lookup("wolf").await;
        assert!(entry.is_some());
        assert_eq!(miss.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn batch_fills_misses_from_later_providers() {
        let chain = DictionaryChain::new(vec![
            Arc::new(Miss {
                calls: AtomicUsize::new(0),
            }),
            Arc::new(Hit),
        ]);

        let words = vec!["Wolf".to_string(), "study".to_string()];
        let results = chain.batch_lookup(&words).await;

        assert_eq!(results.len(), 2);
        assert!(results["wolf"].is_some());
        assert!(results["study"].is_some());
    }

    #[tokio::test]
    async fn offline_only_when_all_providers_are() {
        let online = DictionaryChain::new(vec![
            Arc::new(Miss {
                calls: AtomicUsize::new(0),
            }),
            Arc::new(Hit),
        ]);
        assert!(!online.is_offline());

        let offline = DictionaryChain::new(vec![Arc::new(Hit)]);
        assert!(offline.is_offline());
    }
}
