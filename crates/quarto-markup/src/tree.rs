/*
 * tree.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The markup tree arena and borrowed node handles.
//!
//! Nodes live in one `Vec` owned by [`Tree`] and refer to each other by
//! [`NodeId`]. Children are owned by exactly one parent; parent and sibling
//! links are plain ids, so the tree has no reference cycles.
//!
//! Links, child positions and document ranks are filled in by
//! [`Tree::index`]. Until then every path-dependent accessor returns `None`.

use crate::error::{Error, Result};
use crate::node::{Attributes, NodeData, NodeId, NodeKind};
use std::fmt;

/// A parsed markup document.
#[derive(Debug, Clone)]
pub struct Tree {
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) root: NodeId,
    pub(crate) indexed: bool,
}

impl Tree {
    pub(crate) fn from_parts(nodes: Vec<NodeData>, root: NodeId) -> Self {
        debug_assert!(root.index() < nodes.len());
        Self {
            nodes,
            root,
            indexed: false,
        }
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: self.root,
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.index() < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A built tree always holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether [`Tree::index`] has run.
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Insert or overwrite one attribute on an element.
    ///
    /// Returns the previous value, if any. Children are not touched.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>> {
        let data = self
            .nodes
            .get_mut(id.index())
            .ok_or(Error::UnknownNode(id))?;
        match &mut data.kind {
            NodeKind::Element { attributes, .. } => Ok(attributes.insert(name.into(), value.into())),
            NodeKind::Text(_) => Err(Error::NotAnElement(id)),
        }
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

/// A borrowed handle to one node of a [`Tree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(tree: &'a Tree, id: NodeId) -> Self {
        Self { tree, id }
    }

    fn data(self) -> &'a NodeData {
        self.tree.data(self.id)
    }

    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn tree(self) -> &'a Tree {
        self.tree
    }

    pub fn kind(self) -> &'a NodeKind {
        &self.data().kind
    }

    /// The element name, or `"text"` for text nodes.
    pub fn type_name(self) -> &'a str {
        self.kind().type_name()
    }

    pub fn is_text(self) -> bool {
        matches!(self.kind(), NodeKind::Text(_))
    }

    pub fn is_element(self) -> bool {
        !self.is_text()
    }

    /// The payload of a text node.
    pub fn text(self) -> Option<&'a str> {
        match self.kind() {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    /// The attribute map of an element; text nodes have none.
    pub fn attribute_map(self) -> Option<&'a Attributes> {
        match self.kind() {
            NodeKind::Element { attributes, .. } => Some(attributes),
            NodeKind::Text(_) => None,
        }
    }

    /// Iterate over `(name, value)` pairs. Empty for text nodes.
    pub fn attributes(self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.attribute_map()
            .into_iter()
            .flat_map(|attributes| attributes.iter())
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn attribute(self, name: &str) -> Option<&'a str> {
        self.attribute_map()?.get(name).map(String::as_str)
    }

    pub fn children(self) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + ExactSizeIterator {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |&id| NodeRef::new(tree, id))
    }

    pub fn child_count(self) -> usize {
        self.data().children.len()
    }

    pub fn child_at(self, index: usize) -> Option<NodeRef<'a>> {
        let id = *self.data().children.get(index)?;
        Some(NodeRef::new(self.tree, id))
    }

    /// Path of child indices from the root. `None` before indexing.
    ///
    /// Rebuilt from the parent chain on every call.
    pub fn path(self) -> Option<Vec<usize>> {
        if !self.tree.indexed {
            return None;
        }
        let mut path = Vec::new();
        let mut node = self;
        while let Some(parent) = node.parent() {
            path.push(node.data().position);
            node = parent;
        }
        path.reverse();
        Some(path)
    }

    /// Number of ancestors. `None` before indexing.
    pub fn depth(self) -> Option<usize> {
        self.tree
            .indexed
            .then(|| std::iter::successors(self.parent(), |node| node.parent()).count())
    }

    /// Position in a pre-order walk of the whole tree. `None` before
    /// indexing.
    pub(crate) fn rank(self) -> Option<usize> {
        self.tree.indexed.then(|| self.data().rank)
    }

    /// The enclosing element. `None` for the root and before indexing.
    pub fn parent(self) -> Option<NodeRef<'a>> {
        self.link(self.data().parent)
    }

    /// The preceding sibling. `None` for a first child and before indexing.
    pub fn prev(self) -> Option<NodeRef<'a>> {
        self.link(self.data().prev)
    }

    /// The following sibling. `None` for a last child and before indexing.
    pub fn next(self) -> Option<NodeRef<'a>> {
        self.link(self.data().next)
    }

    fn link(self, id: Option<NodeId>) -> Option<NodeRef<'a>> {
        if !self.tree.indexed {
            return None;
        }
        id.map(|id| NodeRef::new(self.tree, id))
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("type", &self.type_name())
            .finish()
    }
}
