use std::collections::BTreeMap;

/// Handle into a [`Document`] arena. Stays valid for the document's
/// lifetime; detached nodes keep their id and can be reinserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        attrs: BTreeMap<String, String>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed tree of elements and text segments.
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    pub fn new() -> Self {
        let root_node = Node {
            kind: NodeKind::Element {
                tag: "body".to_string(),
                attrs: BTreeMap::new(),
            },
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root_node],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_string(),
            attrs: BTreeMap::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Element { .. })
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if let NodeKind::Text(current) = &mut self.node_mut(id).kind {
            *current = text.to_string();
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { attrs, .. } => attrs.get(name).map(String::as_str),
            NodeKind::Text(_) => None,
        }
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.node_mut(id).kind {
            attrs.insert(name.to_string(), value.to_string());
        }
    }

    /// Child's position among its parent's children.
    pub fn position_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Remove `id` from its current parent, if any.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|&c| c != id);
            self.node_mut(id).parent = None;
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Insert `child` at `index` among `parent`'s children. An index past
    /// the end appends.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        let children = &mut self.node_mut(parent).children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.node_mut(child).parent = Some(parent);
    }

    /// All nodes under `id` in document order, `id` excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Text nodes under `id` in document order.
    pub fn text_segments(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|&n| !self.is_element(n))
            .collect()
    }

    /// Concatenated text of every segment under `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.text(id) {
            out.push_str(text);
        }
        for segment in self.text_segments(id) {
            if let Some(text) = self.text(segment) {
                out.push_str(text);
            }
        }
        out
    }

    /// First element in document order with `attrs[name] == value`.
    pub fn find_by_attr(&self, name: &str, value: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&n| self.attr(n, name) == Some(value))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(doc: &mut Document, text: &str) -> NodeId {
        let p = doc.create_element("p");
        let t = doc.create_text(text);
        doc.append_child(p, t);
        let root = doc.root();
        doc.append_child(root, p);
        p
    }

    #[test]
    fn traversal_is_document_order() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, "ab");
        let b = doc.create_element("b");
        let inner = doc.create_text("cd");
        doc.append_child(b, inner);
        doc.append_child(p, b);
        let tail = doc.create_text("ef");
        doc.append_child(p, tail);

        let texts: Vec<_> = doc
            .text_segments(doc.root())
            .into_iter()
            .map(|n| doc.text(n).unwrap().to_string())
            .collect();
        assert_eq!(texts, ["ab", "cd", "ef"]);
        assert_eq!(doc.text_content(p), "abcdef");
    }

    #[test]
    fn insert_and_detach_keep_positions_consistent() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, "one");
        let extra = doc.create_text("zero");
        doc.insert_child(p, 0, extra);

        assert_eq!(doc.position_in_parent(extra), Some(0));
        assert_eq!(doc.text_content(p), "zeroone");

        doc.detach(extra);
        assert_eq!(doc.text_content(p), "one");
        assert_eq!(doc.parent(extra), None);
    }

    #[test]
    fn find_by_attr_scans_in_document_order() {
        let mut doc = Document::new();
        let first = paragraph(&mut doc, "a");
        let second = paragraph(&mut doc, "b");
        doc.set_attr(first, "data-k", "v");
        doc.set_attr(second, "data-k", "v");

        assert_eq!(doc.find_by_attr("data-k", "v"), Some(first));
        assert_eq!(doc.find_by_attr("data-k", "missing"), None);
    }
}
