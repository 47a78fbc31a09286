use lumi_anchor::path::{PathStep, StructuralPath};
use lumi_anchor::style::HighlightStyle;
use lumi_anchor::surface::{DocumentSurface, HighlightId, SurfaceRange, WrapError};

use crate::tree::{Document, NodeId};

pub const HIGHLIGHT_CLASS: &str = "lumi-highlight";
pub const HIGHLIGHT_ID_ATTR: &str = "data-highlight-id";

impl Document {
    fn highlight_span(&mut self, id: HighlightId, style: &HighlightStyle) -> NodeId {
        let span = self.create_element("span");
        self.set_attr(span, "class", HIGHLIGHT_CLASS);
        self.set_attr(span, "style", &style.to_css());
        self.set_attr(span, HIGHLIGHT_ID_ATTR, &id.to_string());
        span
    }

    /// Split one text segment at `[start, end)` and wrap the middle.
    /// The original segment node becomes the wrapped middle; before/after
    /// remainders become fresh siblings.
    fn wrap_single(
        &mut self,
        segment: NodeId,
        start: usize,
        end: usize,
        id: HighlightId,
        style: &HighlightStyle,
    ) -> Result<(), WrapError> {
        let text = self
            .text(segment)
            .ok_or(WrapError::InvalidRange)?
            .to_string();
        if start >= end
            || end > text.len()
            || !text.is_char_boundary(start)
            || !text.is_char_boundary(end)
        {
            return Err(WrapError::InvalidRange);
        }
        let parent = self.parent(segment).ok_or(WrapError::InvalidRange)?;
        let mut at = self
            .position_in_parent(segment)
            .ok_or(WrapError::InvalidRange)?;

        self.detach(segment);
        self.set_text(segment, &text[start..end]);

        if start > 0 {
            let before = self.create_text(&text[..start]);
            self.insert_child(parent, at, before);
            at += 1;
        }

        let span = self.highlight_span(id, style);
        self.append_child(span, segment);
        self.insert_child(parent, at, span);

        if end < text.len() {
            let after = self.create_text(&text[end..]);
            self.insert_child(parent, at + 1, after);
        }
        Ok(())
    }
}

impl DocumentSurface for Document {
    type Element = NodeId;
    type Segment = NodeId;

    fn path_to(&self, element: NodeId) -> StructuralPath {
        let mut steps = Vec::new();
        let mut current = element;
        while let Some(parent) = self.parent(current) {
            if let Some(tag) = self.tag(current) {
                let index = 1 + self
                    .children(parent)
                    .iter()
                    .take_while(|&&c| c != current)
                    .filter(|&&c| self.tag(c) == Some(tag))
                    .count();
                steps.push(PathStep {
                    tag: tag.to_string(),
                    index,
                });
            }
            current = parent;
        }
        steps.reverse();
        StructuralPath::new(steps)
    }

    fn resolve_path(&self, path: &StructuralPath) -> Option<NodeId> {
        let mut current = self.root();
        for step in path.steps() {
            let mut seen = 0;
            current = self.children(current).iter().copied().find(|&child| {
                if self.tag(child) == Some(step.tag.as_str()) {
                    seen += 1;
                    seen == step.index
                } else {
                    false
                }
            })?;
        }
        Some(current)
    }

    fn segment_element(&self, segment: NodeId) -> NodeId {
        self.parent(segment).unwrap_or_else(|| self.root())
    }

    fn segment_text(&self, segment: NodeId) -> String {
        self.text(segment).unwrap_or_default().to_string()
    }

    fn find_segment(&self, element: NodeId, literal: &str) -> Option<(NodeId, usize)> {
        self.text_segments(element).into_iter().find_map(|segment| {
            self.text(segment)
                .and_then(|text| text.find(literal))
                .map(|at| (segment, at))
        })
    }

    fn range_text(&self, range: &SurfaceRange<NodeId>) -> String {
        let slice = |segment: NodeId, from: usize, to: Option<usize>| -> String {
            let text = self.text(segment).unwrap_or_default();
            let to = to.unwrap_or(text.len()).min(text.len());
            text.get(from..to).unwrap_or_default().to_string()
        };

        if range.start == range.end {
            return slice(range.start, range.start_offset, Some(range.end_offset));
        }

        let segments = self.text_segments(self.root());
        let from = segments.iter().position(|&s| s == range.start);
        let to = segments.iter().position(|&s| s == range.end);
        let (Some(from), Some(to)) = (from, to) else {
            return String::new();
        };
        if from > to {
            return String::new();
        }

        let mut out = slice(range.start, range.start_offset, None);
        for &segment in &segments[from + 1..to] {
            out.push_str(self.text(segment).unwrap_or_default());
        }
        out.push_str(&slice(range.end, 0, Some(range.end_offset)));
        out
    }

    fn surround(
        &mut self,
        range: &SurfaceRange<NodeId>,
        id: HighlightId,
        style: &HighlightStyle,
    ) -> Result<(), WrapError> {
        if range.start != range.end {
            return Err(WrapError::CrossesBoundary);
        }
        self.wrap_single(range.start, range.start_offset, range.end_offset, id, style)
    }

    fn extract_and_reinsert(
        &mut self,
        range: &SurfaceRange<NodeId>,
        id: HighlightId,
        style: &HighlightStyle,
    ) -> Result<(), WrapError> {
        if range.start == range.end {
            return self.wrap_single(
                range.start,
                range.start_offset,
                range.end_offset,
                id,
                style,
            );
        }

        let parent = self.parent(range.start).ok_or(WrapError::InvalidRange)?;
        if self.parent(range.end) != Some(parent) {
            return Err(WrapError::DisjointSelection);
        }

        let start_text = self.segment_text(range.start);
        let end_text = self.segment_text(range.end);
        if range.start_offset > start_text.len()
            || range.end_offset > end_text.len()
            || !start_text.is_char_boundary(range.start_offset)
            || !end_text.is_char_boundary(range.end_offset)
        {
            return Err(WrapError::InvalidRange);
        }

        let pos_start = self
            .position_in_parent(range.start)
            .ok_or(WrapError::InvalidRange)?;
        let mut pos_end = self
            .position_in_parent(range.end)
            .ok_or(WrapError::InvalidRange)?;
        if pos_start > pos_end {
            return Err(WrapError::InvalidRange);
        }

        // Split the start segment; the moved run begins either at the
        // segment itself or at the fresh node holding its tail.
        let mut moved_from = pos_start;
        if range.start_offset > 0 {
            self.set_text(range.start, &start_text[..range.start_offset]);
            let head_tail = self.create_text(&start_text[range.start_offset..]);
            self.insert_child(parent, pos_start + 1, head_tail);
            moved_from = pos_start + 1;
            pos_end += 1;
        }

        // Split the end segment; anything past the end offset stays behind.
        if range.end_offset < end_text.len() {
            self.set_text(range.end, &end_text[..range.end_offset]);
            let tail = self.create_text(&end_text[range.end_offset..]);
            self.insert_child(parent, pos_end + 1, tail);
        }

        let moved: Vec<NodeId> = self.children(parent)[moved_from..=pos_end].to_vec();
        let span = self.highlight_span(id, style);
        for node in moved {
            self.append_child(span, node);
        }
        self.insert_child(parent, moved_from, span);
        Ok(())
    }

    fn unwrap_highlight(&mut self, id: HighlightId) -> bool {
        let Some(span) = self.find_by_attr(HIGHLIGHT_ID_ATTR, &id.to_string()) else {
            return false;
        };
        let Some(parent) = self.parent(span) else {
            return false;
        };
        let Some(at) = self.position_in_parent(span) else {
            return false;
        };

        let children: Vec<NodeId> = self.children(span).to_vec();
        self.detach(span);
        for (i, child) in children.into_iter().enumerate() {
            self.insert_child(parent, at + i, child);
        }
        true
    }
}
