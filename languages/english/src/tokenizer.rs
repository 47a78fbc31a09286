use lumi_core::language::Token;

use crate::lemmatizer::lemma;

/// Byte spans of word matches: maximal ASCII-letter runs with at most one
/// internal apostrophe group ("don't", "it's").
fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_alphabetic() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            if i < bytes.len()
                && bytes[i] == b'\''
                && i + 1 < bytes.len()
                && bytes[i + 1].is_ascii_alphabetic()
            {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                    i += 1;
                }
            }
            spans.push((start, i));
        } else {
            i += 1;
        }
    }

    spans
}

/// Segment `text` into an ordered run of word and non-word tokens.
///
/// Never fails; the token texts concatenate back to `text` exactly, offsets
/// are contiguous byte offsets, and no two adjacent tokens are both words.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for (start, end) in word_spans(text) {
        if start > last {
            tokens.push(Token {
                text: text[last..start].to_string(),
                lemma: String::new(),
                is_word: false,
                start_offset: last,
                end_offset: start,
            });
        }

        let word = &text[start..end];
        tokens.push(Token {
            text: word.to_string(),
            lemma: lemma(word),
            is_word: true,
            start_offset: start,
            end_offset: end,
        });

        last = end;
    }

    if last < text.len() {
        tokens.push(Token {
            text: text[last..].to_string(),
            lemma: String::new(),
            is_word: false,
            start_offset: last,
            end_offset: text.len(),
        });
    }

    tokens
}

/// The word matches of `text`, in order.
pub fn words(text: &str) -> Vec<&str> {
    word_spans(text)
        .into_iter()
        .map(|(start, end)| &text[start..end])
        .collect()
}

/// Lemmas of the words in `text`, deduplicated, first occurrence order.
pub fn unique_lemmas(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut lemmas = Vec::new();
    for word in words(text) {
        let base = lemma(word);
        if seen.insert(base.clone()) {
            lemmas.push(base);
        }
    }
    lemmas
}

pub fn count_words(text: &str) -> usize {
    word_spans(text).len()
}

/// Sentences split on `.`, `!` or `?` runs, trimmed and non-empty.
pub fn sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// A window of text around `offset`, clamped to char boundaries, with
/// ellipses when truncated on either side.
pub fn context_window(text: &str, offset: usize, window: usize) -> String {
    let mut start = offset.saturating_sub(window).min(text.len());
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = offset.saturating_add(window).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }

    let mut context = text[start..end].to_string();
    if start > 0 {
        context = format!("...{context}");
    }
    if end < text.len() {
        context = format!("{context}...");
    }
    context.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reassemble(tokens: &[Token]) -> String {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn round_trips_source_text() {
        let samples = [
            "Hello, world! The wolves were running.",
            "don't stop",
            "  leading and trailing  ",
            "no-letters: 1234 …",
            "",
            "word",
        ];

        for text in samples {
            let tokens = tokenize(text);
            assert_eq!(reassemble(&tokens), text, "round-trip failed: {text:?}");
        }
    }

    #[test]
    fn offsets_are_contiguous() {
        let tokens = tokenize("It's a test — sentence #2.");
        let mut expected = 0;
        for token in &tokens {
            assert_eq!(token.start_offset, expected);
            assert!(token.end_offset >= token.start_offset);
            expected = token.end_offset;
        }
        assert_eq!(expected, "It's a test — sentence #2.".len());
    }

    #[test]
    fn adjacent_tokens_alternate() {
        let tokens = tokenize("one two three");
        for pair in tokens.windows(2) {
            assert!(!(pair[0].is_word && pair[1].is_word));
        }
    }

    #[test]
    fn lemma_set_iff_word() {
        for token in tokenize("The children were reading, weren't they?") {
            if token.is_word {
                assert!(!token.lemma.is_empty());
                assert_eq!(token.lemma, token.lemma.to_lowercase());
            } else {
                assert!(token.lemma.is_empty());
            }
        }
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn letterless_input_is_one_token() {
        let tokens = tokenize("12 34 -- !!");
        assert_eq!(tokens.len(), 1);
        assert!(!tokens[0].is_word);
        assert_eq!(tokens[0].text, "12 34 -- !!");
    }

    #[test]
    fn apostrophes_stay_internal() {
        let tokens = tokenize("don't 'quoted'");
        let words: Vec<&str> = tokens
            .iter()
            .filter(|t| t.is_word)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(words, vec!["don't", "quoted"]);
    }

    #[test]
    fn single_apostrophe_group_per_word() {
        let words = words("y'all'd");
        assert_eq!(words, vec!["y'all", "d"]);
    }

    #[test]
    fn unique_lemmas_dedupe_in_order() {
        let lemmas = unique_lemmas("Runs, running, ran; wolves and a wolf.");
        assert_eq!(lemmas, vec!["run", "wolf", "and", "a"]);
    }

    #[test]
    fn sentence_split() {
        assert_eq!(
            sentences("First. Second!? Third... "),
            vec!["First", "Second", "Third"]
        );
    }

    #[test]
    fn context_window_clamps_and_marks() {
        let text = "abcdefghij";
        assert_eq!(context_window(text, 5, 2), "...defg...");
        assert_eq!(context_window(text, 0, 100), "abcdefghij");
    }

    #[test]
    fn word_count() {
        assert_eq!(count_words("one two, three!"), 3);
        assert_eq!(count_words("1234"), 0);
    }
}
