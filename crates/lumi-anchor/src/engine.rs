use crate::anchor::HighlightAnchor;
use crate::style::HighlightStyle;
use crate::surface::{DocumentSurface, HighlightId, SurfaceRange, WrapError};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RestoreError {
    /// The stored path no longer resolves to an element.
    #[error("anchor path no longer resolves")]
    BrokenPath,

    /// The element exists but no segment under it contains the anchored
    /// literal.
    #[error("anchored text not found under the resolved element")]
    TextNotFound,

    #[error("wrap failed: {0}")]
    Wrap(#[from] WrapError),
}

/// Creates, removes and re-anchors highlights over a [`DocumentSurface`].
///
/// Restoration is best effort: the path is resolved to the first matching
/// element and the literal to its first occurrence, so a snippet repeated
/// inside one element can re-anchor to the earlier copy.
pub struct HighlightEngine<S: DocumentSurface> {
    surface: S,
    next_id: u64,
}

impl<S: DocumentSurface> HighlightEngine<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            next_id: 1,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn allocate_id(&mut self) -> HighlightId {
        let id = HighlightId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Surround when the range sits in one segment; fall back to
    /// extract-and-reinsert when it crosses a boundary. Any other failure
    /// leaves the tree untouched.
    fn wrap(
        &mut self,
        range: &SurfaceRange<S::Segment>,
        id: HighlightId,
        style: &HighlightStyle,
    ) -> Result<(), WrapError> {
        match self.surface.surround(range, id, style) {
            Err(WrapError::CrossesBoundary) => self.surface.extract_and_reinsert(range, id, style),
            other => other,
        }
    }

    /// Wrap the live range and return the anchor describing it along with
    /// the id of the new wrapper.
    pub fn create(
        &mut self,
        range: &SurfaceRange<S::Segment>,
        style: &HighlightStyle,
    ) -> Result<(HighlightId, HighlightAnchor), WrapError> {
        let anchor = HighlightAnchor {
            path: self.surface.path_to(self.surface.segment_element(range.start)),
            start_offset: range.start_offset,
            end_offset: range.end_offset,
            text: self.surface.range_text(range),
        };

        let id = self.allocate_id();
        self.wrap(range, id, style)?;
        Ok((id, anchor))
    }

    /// Remove the wrapper for `id`. Returns false when it was never
    /// created or already removed.
    pub fn remove(&mut self, id: HighlightId) -> bool {
        self.surface.unwrap_highlight(id)
    }

    /// Re-anchor a stored highlight onto the current tree. Offsets are
    /// recomputed from where the literal is found, not taken from the
    /// anchor.
    pub fn restore(
        &mut self,
        anchor: &HighlightAnchor,
        style: &HighlightStyle,
    ) -> Result<HighlightId, RestoreError> {
        let element = self
            .surface
            .resolve_path(&anchor.path)
            .ok_or(RestoreError::BrokenPath)?;

        let (segment, found_at) = self
            .surface
            .find_segment(element, &anchor.text)
            .ok_or(RestoreError::TextNotFound)?;

        let range = SurfaceRange::within(segment, found_at, found_at + anchor.text.len());
        let id = self.allocate_id();
        self.wrap(&range, id, style)?;
        Ok(id)
    }

    /// Restore a batch, skipping anchors that fail. Returns how many were
    /// restored.
    pub fn restore_all(&mut self, anchors: &[HighlightAnchor], style: &HighlightStyle) -> usize {
        let mut restored = 0;
        for anchor in anchors {
            match self.restore(anchor, style) {
                Ok(_) => restored += 1,
                Err(e) => {
                    tracing::warn!("skipping highlight at {}: {e}", anchor.path);
                }
            }
        }
        restored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::StructuralPath;

    /// One element ("//p[1]") holding a flat list of text segments.
    /// Wrapping records rather than mutates, which is enough to observe
    /// which strategy the engine picked.
    struct FlatSurface {
        segments: Vec<String>,
        wrapped: Vec<(HighlightId, String)>,
        surround_calls: usize,
        extract_calls: usize,
    }

    impl FlatSurface {
        fn new(segments: &[&str]) -> Self {
            Self {
                segments: segments.iter().map(|s| s.to_string()).collect(),
                wrapped: Vec::new(),
                surround_calls: 0,
                extract_calls: 0,
            }
        }
    }

    impl DocumentSurface for FlatSurface {
        type Element = usize;
        type Segment = usize;

        fn path_to(&self, _element: usize) -> StructuralPath {
            "//p[1]".parse().unwrap()
        }

        fn resolve_path(&self, path: &StructuralPath) -> Option<usize> {
            (path.to_string() == "//p[1]").then_some(0)
        }

        fn segment_element(&self, _segment: usize) -> usize {
            0
        }

        fn segment_text(&self, segment: usize) -> String {
            self.segments[segment].clone()
        }

        fn find_segment(&self, _element: usize, literal: &str) -> Option<(usize, usize)> {
            self.segments
                .iter()
                .enumerate()
                .find_map(|(i, text)| text.find(literal).map(|at| (i, at)))
        }

        fn range_text(&self, range: &SurfaceRange<usize>) -> String {
            if range.start == range.end {
                return self.segments[range.start][range.start_offset..range.end_offset]
                    .to_string();
            }
            let mut text = self.segments[range.start][range.start_offset..].to_string();
            for segment in &self.segments[range.start + 1..range.end] {
                text.push_str(segment);
            }
            text.push_str(&self.segments[range.end][..range.end_offset]);
            text
        }

        fn surround(
            &mut self,
            range: &SurfaceRange<usize>,
            id: HighlightId,
            _style: &HighlightStyle,
        ) -> Result<(), WrapError> {
            self.surround_calls += 1;
            if range.start != range.end {
                return Err(WrapError::CrossesBoundary);
            }
            if range.end_offset > self.segments[range.start].len()
                || range.start_offset > range.end_offset
            {
                return Err(WrapError::InvalidRange);
            }
            self.wrapped.push((id, self.range_text(range)));
            Ok(())
        }

        fn extract_and_reinsert(
            &mut self,
            range: &SurfaceRange<usize>,
            id: HighlightId,
            _style: &HighlightStyle,
        ) -> Result<(), WrapError> {
            self.extract_calls += 1;
            self.wrapped.push((id, self.range_text(range)));
            Ok(())
        }

        fn unwrap_highlight(&mut self, id: HighlightId) -> bool {
            let before = self.wrapped.len();
            self.wrapped.retain(|(wrapped_id, _)| *wrapped_id != id);
            self.wrapped.len() != before
        }
    }

    #[test]
    fn create_wraps_in_place_and_builds_anchor() {
        let mut engine = HighlightEngine::new(FlatSurface::new(&["Hello world"]));
        let range = SurfaceRange::within(0usize, 6, 11);

        let (id, anchor) = engine.create(&range, &HighlightStyle::default()).unwrap();

        assert_eq!(anchor.text, "world");
        assert_eq!(anchor.path.to_string(), "//p[1]");
        assert_eq!(anchor.start_offset, 6);
        assert_eq!(anchor.end_offset, 11);
        assert_eq!(engine.surface().wrapped, vec![(id, "world".to_string())]);
        assert_eq!(engine.surface().extract_calls, 0);
    }

    #[test]
    fn cross_boundary_falls_back_to_extract() {
        let mut engine = HighlightEngine::new(FlatSurface::new(&["abc", "def"]));
        let range = SurfaceRange {
            start: 0usize,
            start_offset: 1,
            end: 1,
            end_offset: 2,
        };

        let (_, anchor) = engine.create(&range, &HighlightStyle::default()).unwrap();

        assert_eq!(anchor.text, "bcde");
        assert_eq!(engine.surface().surround_calls, 1);
        assert_eq!(engine.surface().extract_calls, 1);
    }

    #[test]
    fn invalid_range_does_not_fall_back() {
        let mut engine = HighlightEngine::new(FlatSurface::new(&["abc"]));
        let range = SurfaceRange::within(0usize, 2, 9);

        let result = engine.create(&range, &HighlightStyle::default());

        assert_eq!(result.unwrap_err(), WrapError::InvalidRange);
        assert_eq!(engine.surface().extract_calls, 0);
        assert!(engine.surface().wrapped.is_empty());
    }

    #[test]
    fn remove_is_idempotent() {
        let mut engine = HighlightEngine::new(FlatSurface::new(&["Hello world"]));
        let (id, _) = engine
            .create(&SurfaceRange::within(0usize, 0, 5), &HighlightStyle::default())
            .unwrap();

        assert!(engine.remove(id));
        assert!(!engine.remove(id));
    }

    #[test]
    fn restore_relocates_the_literal() {
        let mut engine = HighlightEngine::new(FlatSurface::new(&["xx", "say Hello world"]));
        let anchor = HighlightAnchor {
            path: "//p[1]".parse().unwrap(),
            // Stale offsets from the original tree.
            start_offset: 0,
            end_offset: 5,
            text: "world".to_string(),
        };

        engine.restore(&anchor, &HighlightStyle::default()).unwrap();

        assert_eq!(engine.surface().wrapped[0].1, "world");
    }

    #[test]
    fn restore_reports_broken_path_and_missing_text() {
        let mut engine = HighlightEngine::new(FlatSurface::new(&["Hello world"]));

        let broken = HighlightAnchor {
            path: "//div[2]".parse().unwrap(),
            start_offset: 0,
            end_offset: 5,
            text: "world".to_string(),
        };
        assert_eq!(
            engine.restore(&broken, &HighlightStyle::default()),
            Err(RestoreError::BrokenPath)
        );

        let missing = HighlightAnchor {
            path: "//p[1]".parse().unwrap(),
            start_offset: 0,
            end_offset: 4,
            text: "gone".to_string(),
        };
        assert_eq!(
            engine.restore(&missing, &HighlightStyle::default()),
            Err(RestoreError::TextNotFound)
        );
    }

    #[test]
    fn restore_all_skips_failures() {
        let mut engine = HighlightEngine::new(FlatSurface::new(&["Hello world"]));
        let good = HighlightAnchor {
            path: "//p[1]".parse().unwrap(),
            start_offset: 0,
            end_offset: 5,
            text: "Hello".to_string(),
        };
        let broken = HighlightAnchor {
            path: "//div[9]".parse().unwrap(),
            start_offset: 0,
            end_offset: 5,
            text: "Hello".to_string(),
        };

        let restored = engine.restore_all(
            &[good.clone(), broken, good],
            &HighlightStyle::default(),
        );

        assert_eq!(restored, 2);
        assert_eq!(engine.surface().wrapped.len(), 2);
    }
}
