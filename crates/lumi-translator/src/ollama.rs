use lumi_config::translator::OllamaConfig;
use lumi_core::cache::MemoCache;
use lumi_core::types::TranslationResult;
use serde::{Deserialize, Serialize};

use crate::{TranslateError, TranslationProvider, cache_key, fallback};

/// Prompt directive asking the model to skip its visible reasoning preamble.
/// Models that ignore it still answer; the raw trimmed response is used
/// either way.
const NO_THINK: &str = "/no_think";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

fn language_name(code: &str) -> &str {
    match code {
        "zh" => "Chinese",
        "en" => "English",
        "ja" => "Japanese",
        "fr" => "French",
        "de" => "German",
        "es" => "Spanish",
        other => other,
    }
}

/// Translation and definition-by-inference against a locally reachable
/// generative-model endpoint.
pub struct OllamaTranslator {
    client: reqwest::Client,
    config: OllamaConfig,
    cache: MemoCache<TranslationResult>,
}

impl OllamaTranslator {
    pub fn new(config: OllamaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            cache: MemoCache::new(),
        }
    }

    pub async fn check_availability(&self) -> bool {
        let url = format!("{}/api/tags", self.config.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn generate(&self, prompt: String, num_predict: u32) -> Result<String, TranslateError> {
        let url = format!("{}/api/generate", self.config.base_url);
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.config.temperature,
                num_predict,
            },
        };

        let response = self.client.post(&url).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: GenerateResponse = response.json().await?;
        Ok(body.response.trim().to_string())
    }

    /// A concise model-generated explanation of `word`, optionally grounded
    /// in its surrounding context. `None` on any failure.
    pub async fn define(&self, word: &str, context: Option<&str>) -> Option<String> {
        let prompt = match context {
            Some(context) => {
                let context = clamp_chars(context, 256);
                format!(
                    "{NO_THINK}\nIn one short sentence, explain what the English word \"{word}\" means in this context: {context}"
                )
            }
            None => format!(
                "{NO_THINK}\nIn one short sentence, explain the common meaning of the English word \"{word}\"."
            ),
        };

        match self.generate(prompt, 256).await {
            Ok(answer) if !answer.is_empty() => Some(answer),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("model definition of {word:?} failed: {e}");
                None
            }
        }
    }
}

fn clamp_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[async_trait::async_trait]
impl TranslationProvider for OllamaTranslator {
    fn name(&self) -> &str {
        "ollama"
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
        let key = cache_key(text, target_lang, source_lang);
        let prompt = format!(
            "{NO_THINK}\nTranslate the following text to {}. Only output the translation, nothing else.\n\nText: {text}",
            language_name(target_lang)
        );

        let outcome = self
            .cache
            .get_or_fetch(&key, || async {
                let translation = self
                    .generate(prompt, self.config.num_predict)
                    .await?;
                Ok::<_, TranslateError>(Some(TranslationResult {
                    source: text.to_string(),
                    translation,
                    detected_language: None,
                    provider: "ollama".to_string(),
                    confidence: None,
                }))
            })
            .await;

        match outcome {
            Ok(Some(result)) => result,
            Ok(None) => fallback(text),
            Err(e) => {
                tracing::warn!("ollama translation failed: {e}");
                fallback(text)
            }
        }
    }
}
