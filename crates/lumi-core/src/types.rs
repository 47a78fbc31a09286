use serde::{Deserialize, Serialize};

/// Dictionary entry in the shape the backend and popup layers exchange.
/// Field names follow the wire format (camelCase JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub word: String,
    pub lemma: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    pub definitions: Vec<Definition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub antonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_forms: Option<Vec<WordForm>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub part_of_speech: String,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning_cn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
}

/// An inflected form recorded alongside an entry (plural, past, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordForm {
    pub form: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Cross-task application events.
#[derive(Debug, Clone)]
pub enum AppEvent {
    ConfigChanged,
    /// Raw text to annotate (stdin, clipboard, a reader page).
    TextInput(String),
    /// A settled selection to look up.
    LookupWord(String),
    /// Free text to translate on demand.
    Translate(String),
    ShowEntry {
        word: String,
        entry: Option<DictionaryEntry>,
    },
    ShowTranslation(TranslationResult),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub source: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}
