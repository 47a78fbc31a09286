use std::collections::HashMap;

use crate::types::DictionaryEntry;

/// Dictionary lookup capability.
///
/// Lookups fail soft: a provider that cannot answer (network down, malformed
/// response) returns `None` and logs the cause; it never errors across this
/// boundary. A definitive "no such word" is also `None`, but providers cache
/// that case so it is not re-queried.
#[async_trait::async_trait]
pub trait DictionaryProvider: Send + Sync {
    /// Provider name ("remote", "offline", "free-dictionary", ...)
    fn name(&self) -> &str;

    /// True when the provider works without network access
    fn is_offline(&self) -> bool {
        false
    }

    /// Look up a single word (lowercased and trimmed by the provider)
    async fn lookup(&self, word: &str) -> Option<DictionaryEntry>;

    /// Look up many words at once. The default resolves them one by one;
    /// providers with a batch endpoint override this.
    async fn batch_lookup(&self, words: &[String]) -> HashMap<String, Option<DictionaryEntry>> {
        let mut results = HashMap::new();
        for word in words {
            let key = word.trim().to_lowercase();
            let entry = self.lookup(word).await;
            results.insert(key, entry);
        }
        results
    }
}
