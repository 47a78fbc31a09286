use serde::{Deserialize, Serialize};

use crate::path::StructuralPath;

/// Persisted description of a highlighted snippet. Immutable once built;
/// callers store it and hand it back for restoration after the document
/// tree has been rebuilt.
///
/// Offsets are byte offsets into the text segment the selection started
/// in, recorded as seen at creation time. Restoration relocates the
/// literal `text` inside the resolved element rather than trusting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightAnchor {
    #[serde(rename = "xpath")]
    pub path: StructuralPath,
    pub start_offset: usize,
    pub end_offset: usize,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape_matches_stored_records() {
        let anchor = HighlightAnchor {
            path: "//p[1]".parse().unwrap(),
            start_offset: 6,
            end_offset: 11,
            text: "world".to_string(),
        };

        let json = serde_json::to_value(&anchor).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "xpath": "//p[1]",
                "startOffset": 6,
                "endOffset": 11,
                "text": "world",
            })
        );

        let back: HighlightAnchor = serde_json::from_value(json).unwrap();
        assert_eq!(back, anchor);
    }
}
