use lumi_core::cache::MemoCache;
use lumi_core::types::TranslationResult;
use serde::{Deserialize, Serialize};

use crate::{TranslateError, TranslationProvider, cache_key, fallback};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest<'a> {
    text: &'a str,
    target_lang: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_lang: Option<&'a str>,
}

#[derive(Deserialize)]
struct ApiEnvelope {
    success: bool,
    data: Option<TranslationResult>,
}

/// Translator backed by the backend `/translate` endpoint.
pub struct RemoteTranslator {
    client: reqwest::Client,
    api_base: String,
    auth_token: Option<String>,
    cache: MemoCache<TranslationResult>,
}

impl RemoteTranslator {
    pub fn new(api_base: String, auth_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
            auth_token,
            cache: MemoCache::new(),
        }
    }

    async fn fetch(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<TranslationResult, TranslateError> {
        let url = format!("{}/translate", self.api_base);
        let mut request = self.client.post(&url).json(&TranslateRequest {
            text,
            target_lang,
            source_lang,
        });
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: ApiEnvelope = response.json().await?;
        match body.data {
            Some(result) if body.success => Ok(result),
            _ => Err(TranslateError::ApiError(
                "no translation in response".to_string(),
            )),
        }
    }
}

#[async_trait::async_trait]
impl TranslationProvider for RemoteTranslator {
    fn name(&self) -> &str {
        "remote"
    }

    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> TranslationResult {
        let key = cache_key(text, target_lang, source_lang);
        let outcome = self
            .cache
            .get_or_fetch(&key, || async {
                self.fetch(text, target_lang, source_lang).await.map(Some)
            })
            .await;

        match outcome {
            Ok(Some(result)) => result,
            Ok(None) => fallback(text),
            Err(e) => {
                tracing::warn!("remote translation failed: {e}");
                fallback(text)
            }
        }
    }
}
