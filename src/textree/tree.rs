//! Tree and node model
//!
//! The tree is an arena: it owns every node in a single `Vec`, and structure
//! is expressed through `NodeId` indices. Child order is insertion order.
//! The only mutation the tree supports is appending a child, and only the
//! tree builder (same crate) can reach it; once a parse finishes the tree is
//! a passive, read-only product handed to a formatter.
//!
//! Traversal for serialization goes through the [`Visitor`] trait: `accept`
//! walks the tree in pre-order, calling `enter_node` on the way down and
//! `leave_node` on the way back up.

use crate::textree::classify::AttributeMap;

/// Tag carried by the sentinel root node of every tree.
pub const ROOT_TAG: &str = "root";

/// Handle to a node inside its owning [`Tree`].
///
/// Ids are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One element of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    tag: String,
    content: Option<String>,
    attributes: AttributeMap,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Create a detached node. It gains a parent when appended to a tree.
    pub fn new(tag: &str, content: Option<String>, attributes: AttributeMap) -> Self {
        Self {
            tag: tag.to_string(),
            content,
            attributes,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// The parent id; `None` only for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-owned document tree with a sentinel root.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// Create a tree holding only the sentinel root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(ROOT_TAG, None, AttributeMap::new())],
            root: NodeId(0),
        }
    }

    /// The sentinel root id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Access a node by id.
    ///
    /// Ids issued by this tree are always valid; the arena never removes
    /// nodes.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Fallible access, for callers holding ids of uncertain provenance.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Total node count, sentinel root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds nothing beyond the sentinel root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Append `node` as the last child of `parent`, returning the new id.
    pub(crate) fn append_child(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Walk the whole tree in pre-order, root included.
    pub fn accept(&self, visitor: &mut dyn Visitor) {
        self.walk(self.root, visitor);
    }

    fn walk(&self, id: NodeId, visitor: &mut dyn Visitor) {
        let node = self.node(id);
        visitor.enter_node(self, id, node);
        for &child in node.children() {
            self.walk(child, visitor);
        }
        visitor.leave_node(self, id, node);
    }

    /// Ids of the whole tree in pre-order, root included.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        // Arena insertion order is already pre-order for an append-only tree
        // built left to right, but we walk explicitly to keep the contract
        // independent of that detail.
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut pending = vec![self.root];
        while let Some(id) = pending.pop() {
            order.push(id);
            pending.extend(self.node(id).children().iter().rev().copied());
        }
        order.into_iter()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Visitor for tree traversal.
///
/// Implement this to walk the tree. `enter_node` fires before a node's
/// children are visited, `leave_node` after; the default `leave_node` is
/// empty so leaf-oriented visitors only implement one method.
pub trait Visitor {
    fn enter_node(&mut self, tree: &Tree, id: NodeId, node: &Node);

    fn leave_node(&mut self, _tree: &Tree, _id: NodeId, _node: &Node) {}
}
