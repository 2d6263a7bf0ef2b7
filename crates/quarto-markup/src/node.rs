/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Node storage for markup trees.

use indexmap::IndexMap;
use std::fmt;

/// The type name reported for text nodes.
pub const TEXT_TYPE: &str = "text";

/// Attribute map of an element. Names are unique; a later insert overwrites
/// the value but keeps the original position.
pub type Attributes = IndexMap<String, String>;

/// Handle of a node within its [`Tree`](crate::Tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A tagged node with attributes and children.
    Element { name: String, attributes: Attributes },
    /// A literal text leaf, never parsed further.
    Text(String),
}

impl NodeKind {
    /// The element name, or [`TEXT_TYPE`] for text.
    pub fn type_name(&self) -> &str {
        match self {
            NodeKind::Element { name, .. } => name,
            NodeKind::Text(_) => TEXT_TYPE,
        }
    }
}

/// Arena slot for one node.
///
/// `position`, `rank`, `parent`, `prev` and `next` are only meaningful once
/// the tree has been indexed; [`Tree`](crate::Tree) hides them until then.
#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) children: Vec<NodeId>,
    /// Index among the parent's children.
    pub(crate) position: usize,
    /// Pre-order rank within the whole tree.
    pub(crate) rank: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

impl NodeData {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            position: 0,
            rank: 0,
            parent: None,
            prev: None,
            next: None,
        }
    }
}
