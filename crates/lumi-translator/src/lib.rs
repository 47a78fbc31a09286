use std::sync::Arc;

use anyhow::bail;
use lumi_config::translator::TranslatorConfig;
use lumi_core::types::TranslationResult;

pub mod mock;
pub mod ollama;
pub mod remote;

pub use mock::MockTranslator;
pub use ollama::OllamaTranslator;
pub use remote::RemoteTranslator;

/// Translation capability.
///
/// `translate` never errors across this boundary: a provider that cannot
/// answer returns the `"fallback"` result echoing the source text, and that
/// result is not cached.
#[async_trait::async_trait]
pub trait TranslationProvider: Send + Sync {
    fn name(&self) -> &str;

    fn is_offline(&self) -> bool {
        false
    }

    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> TranslationResult;
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Cache key for a translation: language pair plus a hash of the full text.
pub(crate) fn cache_key(text: &str, target_lang: &str, source_lang: Option<&str>) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    format!(
        "{}:{}:{:016x}",
        source_lang.unwrap_or("auto"),
        target_lang,
        hasher.finish()
    )
}

/// Degraded result when every attempt to translate failed.
pub(crate) fn fallback(text: &str) -> TranslationResult {
    TranslationResult {
        source: text.to_string(),
        translation: text.to_string(),
        detected_language: None,
        provider: "fallback".to_string(),
        confidence: None,
    }
}

/// Build the configured translation provider once at startup.
pub fn create_translation_provider(
    network: &lumi_config::network::NetworkConfig,
    config: &TranslatorConfig,
) -> anyhow::Result<Arc<dyn TranslationProvider>> {
    let provider: Arc<dyn TranslationProvider> = match config.provider.as_str() {
        "remote" => Arc::new(RemoteTranslator::new(
            network.api_base.clone(),
            network.auth_token.clone(),
        )),
        "ollama" => Arc::new(OllamaTranslator::new(config.ollama.clone())),
        "mock" => Arc::new(MockTranslator),
        other => bail!("unknown translation provider: {other}"),
    };
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_distinguishes_pairs_and_text() {
        let a = cache_key("hello", "zh", None);
        let b = cache_key("hello", "zh", Some("en"));
        let c = cache_key("hello", "fr", None);
        let d = cache_key("goodbye", "zh", None);

        assert!(a.starts_with("auto:zh:"));
        assert!(b.starts_with("en:zh:"));
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn fallback_echoes_source() {
        let result = fallback("unchanged");
        assert_eq!(result.translation, "unchanged");
        assert_eq!(result.provider, "fallback");
    }
}
