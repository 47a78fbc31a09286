use lumi_core::types::TranslationResult;

use crate::TranslationProvider;

/// Deterministic provider for tests and offline runs. Echoes the source
/// text tagged with the target language.
pub struct MockTranslator;

#[async_trait::async_trait]
impl TranslationProvider for MockTranslator {
    fn name(&self) -> &str {
        "mock"
    }

    fn is_offline(&self) -> bool {
        true
    }

    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> TranslationResult {
        TranslationResult {
            source: text.to_string(),
            translation: format!("[{target_lang}] {text}"),
            detected_language: source_lang.map(str::to_string),
            provider: "mock".to_string(),
            confidence: Some(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_with_target_tag() {
        let provider = MockTranslator;
        let result = provider.translate("hello", "zh", Some("en")).await;
        assert_eq!(result.translation, "[zh] hello");
        assert_eq!(result.provider, "mock");
        assert_eq!(result.detected_language.as_deref(), Some("en"));
    }
}
