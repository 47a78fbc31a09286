use lumi_core::cache::MemoCache;
use lumi_core::dictionary::DictionaryProvider;
use lumi_core::types::{Definition, DictionaryEntry};
use serde::Deserialize;

use crate::error::DictionaryError;

// dictionaryapi.dev response shape
#[derive(Debug, Deserialize)]
struct ApiPhonetic {
    text: Option<String>,
    audio: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiDefinition {
    definition: String,
    example: Option<String>,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    antonyms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMeaning {
    #[serde(rename = "partOfSpeech")]
    part_of_speech: String,
    definitions: Vec<ApiDefinition>,
}

#[derive(Debug, Deserialize)]
struct ApiEntry {
    word: String,
    phonetic: Option<String>,
    #[serde(default)]
    phonetics: Vec<ApiPhonetic>,
    meanings: Vec<ApiMeaning>,
}

fn normalize_part_of_speech(pos: &str) -> String {
    match pos.to_lowercase().as_str() {
        "noun" => "n.",
        "verb" => "v.",
        "adjective" => "adj.",
        "adverb" => "adv.",
        "pronoun" => "pron.",
        "preposition" => "prep.",
        "conjunction" => "conj.",
        "interjection" | "exclamation" => "interj.",
        _ => return pos.to_string(),
    }
    .to_string()
}

fn dedup_preserving(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items.into_iter().filter(|i| seen.insert(i.clone())).collect()
}

/// Flatten the API's nested meanings into the common entry shape.
fn transform_entry(api: ApiEntry) -> DictionaryEntry {
    let mut definitions = Vec::new();
    let mut examples = Vec::new();
    let mut synonyms = Vec::new();
    let mut antonyms = Vec::new();

    for meaning in &api.meanings {
        for def in &meaning.definitions {
            definitions.push(Definition {
                part_of_speech: normalize_part_of_speech(&meaning.part_of_speech),
                meaning: def.definition.clone(),
                meaning_cn: None,
                examples: def.example.clone().map(|e| vec![e]),
            });

            if let Some(example) = &def.example {
                examples.push(example.clone());
            }
            synonyms.extend(def.synonyms.iter().cloned());
            antonyms.extend(def.antonyms.iter().cloned());
        }
    }

    // Prefer the first phonetics entry that actually carries audio; fall
    // back to any entry with a transcription.
    let mut phonetic = api.phonetic.clone();
    let mut audio_url = None;
    if let Some(with_audio) = api
        .phonetics
        .iter()
        .find(|p| p.audio.as_deref().is_some_and(|a| !a.is_empty()))
    {
        audio_url = with_audio.audio.clone();
        if phonetic.is_none() {
            phonetic = with_audio.text.clone();
        }
    }
    if phonetic.is_none() {
        phonetic = api.phonetics.iter().find_map(|p| p.text.clone());
    }

    DictionaryEntry {
        lemma: api.word.to_lowercase(),
        word: api.word,
        phonetic,
        audio_url,
        definitions,
        examples: if examples.is_empty() {
            None
        } else {
            Some(examples)
        },
        synonyms: dedup_preserving(synonyms),
        antonyms: dedup_preserving(antonyms),
        word_forms: None,
    }
}

/// Dictionary provider querying dictionaryapi.dev directly, normalizing its
/// richer response into the common entry shape.
pub struct FreeDictionary {
    client: reqwest::Client,
    api_base: String,
    cache: MemoCache<DictionaryEntry>,
}

impl FreeDictionary {
    pub fn new(api_base: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
            cache: MemoCache::new(),
        }
    }

    async fn fetch(&self, lemma: &str) -> Result<Option<DictionaryEntry>, DictionaryError> {
        let url = format!("{}/{}", self.api_base, lemma);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(DictionaryError::Status(response.status()));
        }

        let entries: Vec<ApiEntry> = response.json().await?;
        Ok(entries.into_iter().next().map(transform_entry))
    }
}

#[async_trait::async_trait]
impl DictionaryProvider for FreeDictionary {
    fn name(&self) -> &str {
        "free-dictionary"
    }

    async fn lookup(&self, word: &str) -> Option<DictionaryEntry> {
        let lemma = word.trim().to_lowercase();
        match self.cache.get_or_fetch(&lemma, || self.fetch(&lemma)).await {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("free-dictionary lookup for {lemma:?} failed: {e}");
                None
            }
        }
    }
}
