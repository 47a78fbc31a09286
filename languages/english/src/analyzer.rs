use lumi_core::language::{LanguageAnalyzer, Token};
use unicode_normalization::UnicodeNormalization;

use crate::{lemmatizer, tokenizer};

/// English language analyzer: ASCII word segmentation plus rule-based
/// morphological normalization.
pub struct EnglishAnalyzer;

impl EnglishAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnglishAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for EnglishAnalyzer {
    fn language_code(&self) -> &str {
        "en"
    }

    fn normalize(&self, text: &str) -> String {
        // NFKC, then drop hard line breaks so reflowed content tokenizes
        // the same as flat text.
        text.nfkc()
            .collect::<String>()
            .replace(['\n', '\r'], " ")
            .trim()
            .to_string()
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        tokenizer::tokenize(text)
    }

    fn lemma(&self, word: &str) -> String {
        lemmatizer::lemma(word)
    }
}
