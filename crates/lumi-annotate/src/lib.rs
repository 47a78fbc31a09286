//! Rewrites a document subtree so every word token becomes an
//! interactive span while the visible text stays byte-identical.

use lumi_core::language::Token;
use lumi_document::{Document, NodeId};

pub const TOKEN_CLASS: &str = "lumi-token";
pub const LEMMA_ATTR: &str = "data-lemma";
pub const ANNOTATED_ATTR: &str = "data-annotated";

/// A word the reader activated, resolved to its token span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEvent {
    pub word: String,
    pub lemma: String,
}

/// Replace `container`'s children with the token run: verbatim text nodes
/// for non-word tokens, `span.lumi-token` wrappers for words.
///
/// A run without a single word token leaves the container untouched, so
/// punctuation-only or whitespace-only content is never rewritten.
pub fn render(doc: &mut Document, container: NodeId, tokens: &[Token]) {
    if !tokens.iter().any(|t| t.is_word) {
        return;
    }

    for child in doc.children(container).to_vec() {
        doc.detach(child);
    }

    for token in tokens {
        if token.is_word {
            let span = doc.create_element("span");
            doc.set_attr(span, "class", TOKEN_CLASS);
            doc.set_attr(span, LEMMA_ATTR, &token.lemma);
            let text = doc.create_text(&token.text);
            doc.append_child(span, text);
            doc.append_child(container, span);
        } else {
            let text = doc.create_text(&token.text);
            doc.append_child(container, text);
        }
    }
}

/// Resolve an activation (click, tap) on `node` to the nearest
/// ancestor-or-self token span.
pub fn activate(doc: &Document, node: NodeId) -> Option<WordEvent> {
    let mut current = Some(node);
    while let Some(id) = current {
        if doc.attr(id, "class") == Some(TOKEN_CLASS) {
            let word = doc.text_content(id);
            let lemma = doc
                .attr(id, LEMMA_ATTR)
                .map(str::to_string)
                .unwrap_or_else(|| word.to_lowercase());
            return Some(WordEvent { word, lemma });
        }
        current = doc.parent(id);
    }
    None
}

/// Tokenize and render one element's direct text, once. A marker
/// attribute keeps repeated passes from re-wrapping already-annotated
/// content.
pub fn process_element<F>(doc: &mut Document, element: NodeId, tokenize: F)
where
    F: Fn(&str) -> Vec<Token>,
{
    if doc.attr(element, ANNOTATED_ATTR).is_some() {
        return;
    }

    let text = doc.text_content(element);
    let tokens = tokenize(&text);
    render(doc, element, &tokens);
    doc.set_attr(element, ANNOTATED_ATTR, "true");
}

/// Annotate the block elements under `root` that `visible` accepts.
/// Keeps per-pass cost bounded to what the reader can currently see;
/// later passes pick up elements scrolled into view.
///
/// Returns how many elements were processed this pass.
pub fn process_visible<F, P>(doc: &mut Document, root: NodeId, visible: P, tokenize: F) -> usize
where
    F: Fn(&str) -> Vec<Token>,
    P: Fn(&Document, NodeId) -> bool,
{
    let candidates: Vec<NodeId> = doc
        .descendants(root)
        .into_iter()
        .filter(|&n| doc.is_element(n))
        .filter(|&n| doc.children(n).iter().any(|&c| !doc.is_element(c)))
        .filter(|&n| doc.attr(n, ANNOTATED_ATTR).is_none())
        .filter(|&n| doc.attr(n, "class") != Some(TOKEN_CLASS))
        .filter(|&n| visible(doc, n))
        .collect();

    let count = candidates.len();
    for element in candidates {
        process_element(doc, element, &tokenize);
    }
    if count > 0 {
        tracing::debug!("annotated {count} elements");
    }
    count
}
