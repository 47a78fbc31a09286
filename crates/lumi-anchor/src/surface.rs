use std::fmt::Debug;

use crate::path::StructuralPath;
use crate::style::HighlightStyle;

/// Identity of a live highlight wrapper within a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HighlightId(pub u64);

impl std::fmt::Display for HighlightId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A selection over a surface's text segments. Offsets are byte offsets
/// into the segment text; `start` and `end` may be the same segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceRange<S> {
    pub start: S,
    pub start_offset: usize,
    pub end: S,
    pub end_offset: usize,
}

impl<S: Copy> SurfaceRange<S> {
    /// Range fully inside one segment.
    pub fn within(segment: S, start_offset: usize, end_offset: usize) -> Self {
        Self {
            start: segment,
            start_offset,
            end: segment,
            end_offset,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WrapError {
    /// The range spans more than one text segment; a plain surround would
    /// tear the tree.
    #[error("range crosses a segment boundary")]
    CrossesBoundary,

    #[error("range offsets are invalid for the segment")]
    InvalidRange,

    /// The endpoints do not share a parent element, so even the
    /// extract-and-reinsert strategy cannot wrap them.
    #[error("selection endpoints are disjoint")]
    DisjointSelection,
}

/// What a highlightable rendering surface must expose.
///
/// The engine never touches node internals; everything it needs for
/// anchoring and wrapping goes through this trait, which keeps the restore
/// algorithm runnable against a fake surface in tests.
pub trait DocumentSurface {
    type Element: Copy + Eq + Debug;
    type Segment: Copy + Eq + Debug;

    /// Root-relative path of `element`, indexed among same-tag siblings.
    fn path_to(&self, element: Self::Element) -> StructuralPath;

    /// First element matching `path` in document order, if any.
    fn resolve_path(&self, path: &StructuralPath) -> Option<Self::Element>;

    /// Element that directly contains `segment`.
    fn segment_element(&self, segment: Self::Segment) -> Self::Element;

    fn segment_text(&self, segment: Self::Segment) -> String;

    /// First segment under `element` (document order) whose text contains
    /// `literal`, together with the literal's byte offset in that segment.
    fn find_segment(&self, element: Self::Element, literal: &str)
    -> Option<(Self::Segment, usize)>;

    /// Verbatim text covered by `range`.
    fn range_text(&self, range: &SurfaceRange<Self::Segment>) -> String;

    /// Wrap a single-segment range in a new highlight wrapper. Fails with
    /// `CrossesBoundary` when the range spans segments.
    fn surround(
        &mut self,
        range: &SurfaceRange<Self::Segment>,
        id: HighlightId,
        style: &HighlightStyle,
    ) -> Result<(), WrapError>;

    /// Wrap a range whose endpoints share a parent element by extracting
    /// the covered nodes into a new wrapper reinserted in place.
    fn extract_and_reinsert(
        &mut self,
        range: &SurfaceRange<Self::Segment>,
        id: HighlightId,
        style: &HighlightStyle,
    ) -> Result<(), WrapError>;

    /// Remove the wrapper for `id`, promoting its children in place.
    /// Adjacent text segments are left unmerged. Returns false when no
    /// wrapper with that id exists.
    fn unwrap_highlight(&mut self, id: HighlightId) -> bool;
}
