use serde::{Deserialize, Serialize};

/// One segment of a tokenized text run.
///
/// The ordered token texts concatenate back to the exact source string;
/// offsets are byte offsets into that string, contiguous and non-decreasing.
/// `lemma` is non-empty exactly when `is_word` is true, and always lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub is_word: bool,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// Text processing interface for language implementations.
pub trait LanguageAnalyzer: Send + Sync {
    /// Language identifier (ISO 639-1 code: "en", ...)
    fn language_code(&self) -> &str;

    /// Normalize text (Unicode normalization, whitespace, etc.)
    fn normalize(&self, text: &str) -> String;

    /// Break text into word and non-word tokens
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Normalized base form of a single word
    fn lemma(&self, word: &str) -> String;
}
