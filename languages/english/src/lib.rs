pub mod analyzer;
pub mod lemmatizer;
pub mod tokenizer;

pub use analyzer::EnglishAnalyzer;
pub use lemmatizer::{is_inflected_form, lemma};
pub use tokenizer::{context_window, count_words, sentences, tokenize, unique_lemmas, words};
