/// Name of the synthetic root scope. `#` is outside the shortcode name
/// character class, so no real tag can collide with it.
pub const ROOT_NAME: &str = "#root";

/// Index of a node within its [`ScopeTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One nested shortcode region of a document (or the whole document, for the
/// root node).
///
/// Captured lines keep their original terminators (`\n` or `\r\n`; the final
/// line of a document may have none), so reassembling a tree is a plain
/// concatenation and round-trips the input byte-for-byte.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeNode {
    /// Shortcode name, or [`ROOT_NAME`] for the root.
    pub name: String,
    /// Child scopes in order of first appearance in the source.
    pub children: Vec<NodeId>,
    /// Enclosing scope; traversal only, never ownership.
    pub parent: Option<NodeId>,
    /// Raw lines of this scope's extent, including its own delimiter lines.
    /// A closed single-line scope holds just the marker-bounded slice of the
    /// shared line instead.
    pub lines: Vec<String>,
    /// Output of the rewrite stage, written exactly once per scope.
    pub modified_lines: Vec<String>,
    /// Line index at which this scope begins, relative to the parent's lines.
    pub start_line: usize,
    /// `None` while the scope is still open (unclosed at end of input is
    /// tolerated). `Some(start_line)` for a scope opened and closed on one
    /// source line; `Some(start_line + 1)` otherwise, since the parent keeps
    /// exactly two placeholder lines, the opening and the closing one.
    pub end_line: Option<usize>,
    /// Byte column of the open marker's start within the shared line.
    /// Meaningful only when the scope is inline.
    pub start: usize,
    /// Byte column of the close marker's end within the shared line.
    /// Meaningful only when the scope is inline.
    pub end: usize,
}

impl ScopeNode {
    fn new(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            children: Vec::new(),
            parent,
            lines: Vec::new(),
            modified_lines: Vec::new(),
            start_line: 0,
            end_line: None,
            start: 0,
            end: 0,
        }
    }

    /// Whether this scope was opened and closed on the same source line.
    pub fn is_inline(&self) -> bool {
        self.end_line == Some(self.start_line)
    }

    /// Whether this scope closed and spans more than one source line, i.e.
    /// its last captured line is its own close-delimiter line.
    pub fn is_closed_multiline(&self) -> bool {
        self.end_line == Some(self.start_line + 1)
    }
}

/// Arena-backed scope tree. Nodes own their children by id; the parent link
/// is a plain back-index used for ascending during parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeTree {
    nodes: Vec<ScopeNode>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![ScopeNode::new(ROOT_NAME.to_string(), None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Attach a fresh node under `parent` and return its id. Insertion order
    /// is preserved in `children`.
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ScopeNode::new(name.into(), Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &ScopeNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut ScopeNode {
        &mut self.nodes[id.0]
    }

    /// All node ids in creation order (root first).
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}
