use std::collections::HashMap;

use lumi_core::cache::MemoCache;
use lumi_core::dictionary::DictionaryProvider;
use lumi_core::types::DictionaryEntry;
use serde::Deserialize;

use crate::error::DictionaryError;

#[derive(Deserialize)]
struct ApiEnvelope<T> {
    success: bool,
    data: Option<T>,
}

/// Dictionary provider backed by the backend HTTP API.
///
/// Positive and definitive-miss (404) results are memoized for the lifetime
/// of the instance; transient failures are not.
pub struct RemoteDictionary {
    client: reqwest::Client,
    api_base: String,
    auth_token: Option<String>,
    cache: MemoCache<DictionaryEntry>,
}

impl RemoteDictionary {
    pub fn new(api_base: String, auth_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
            auth_token,
            cache: MemoCache::new(),
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch(&self, lemma: &str) -> Result<Option<DictionaryEntry>, DictionaryError> {
        let url = format!("{}/dictionary/{}", self.api_base, lemma);
        let response = self.authorize(self.client.get(&url)).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(DictionaryError::Status(response.status()));
        }

        let body: ApiEnvelope<DictionaryEntry> = response.json().await?;
        if !body.success {
            return Ok(None);
        }
        Ok(body.data)
    }

    async fn fetch_batch(
        &self,
        words: &[String],
    ) -> Result<HashMap<String, Option<DictionaryEntry>>, DictionaryError> {
        let url = format!("{}/dictionary/batch", self.api_base);
        let response = self
            .authorize(self.client.post(&url))
            .json(&serde_json::json!({ "words": words }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DictionaryError::Status(response.status()));
        }

        let body: ApiEnvelope<HashMap<String, Option<DictionaryEntry>>> =
            response.json().await?;
        Ok(body.data.unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl DictionaryProvider for RemoteDictionary {
    fn name(&self) -> &str {
        "remote"
    }

    async fn lookup(&self, word: &str) -> Option<DictionaryEntry> {
        let lemma = word.trim().to_lowercase();
        match self.cache.get_or_fetch(&lemma, || self.fetch(&lemma)).await {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("remote dictionary lookup for {lemma:?} failed: {e}");
                None
            }
        }
    }

    async fn batch_lookup(&self, words: &[String]) -> HashMap<String, Option<DictionaryEntry>> {
        let mut results = HashMap::new();
        let mut uncached = Vec::new();

        for word in words {
            let key = word.trim().to_lowercase();
            match self.cache.peek(&key).await {
                Some(hit) => {
                    results.insert(key, hit);
                }
                None => uncached.push(key),
            }
        }

        if uncached.is_empty() {
            return results;
        }

        match self.fetch_batch(&uncached).await {
            Ok(entries) => {
                for key in uncached {
                    let entry = entries.get(&key).cloned().flatten();
                    self.cache.insert(&key, entry.clone()).await;
                    results.insert(key, entry);
                }
            }
            Err(e) => {
                // Misses from a failed batch are transient: report None but
                // leave the keys uncached for the next attempt.
                tracing::warn!("batch dictionary lookup failed: {e}");
                for key in uncached {
                    results.insert(key, None);
                }
            }
        }

        results
    }
}
