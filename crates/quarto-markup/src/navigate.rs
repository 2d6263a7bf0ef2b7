/*
 * navigate.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Traversal and lookup over a markup tree.

use crate::node::NodeId;
use crate::tree::{NodeRef, Tree};

/// Pre-order depth-first iterator over a subtree.
///
/// Each call to [`NodeRef::traverse`] starts a fresh walk.
#[derive(Debug, Clone)]
pub struct Traverse<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.data(id).children.iter().rev().copied());
        Some(NodeRef::new(self.tree, id))
    }
}

impl<'a> NodeRef<'a> {
    /// Walk this node and its descendants in document order.
    pub fn traverse(self) -> Traverse<'a> {
        Traverse {
            tree: self.tree(),
            stack: vec![self.id()],
        }
    }

    /// Call `visit` on this node and every descendant in document order.
    pub fn visit(self, mut visit: impl FnMut(NodeRef<'a>)) {
        for node in self.traverse() {
            visit(node);
        }
    }

    /// Resolve a descendant by child indices, starting at this node.
    ///
    /// An empty path resolves to this node. Any index out of range gives
    /// `None`.
    pub fn child(self, path: &[usize]) -> Option<NodeRef<'a>> {
        path.iter()
            .try_fold(self, |node, &index| node.child_at(index))
    }

    /// Like [`NodeRef::child`], calling `visit` on every node along the way,
    /// starting with this one.
    pub fn follow_path(
        self,
        path: &[usize],
        mut visit: impl FnMut(NodeRef<'a>),
    ) -> Option<NodeRef<'a>> {
        visit(self);
        path.iter().try_fold(self, |node, &index| {
            let next = node.child_at(index)?;
            visit(next);
            Some(next)
        })
    }

    /// The first direct child whose type name is `name`.
    pub fn first_of_type(self, name: &str) -> Option<NodeRef<'a>> {
        self.children().find(|child| child.type_name() == name)
    }
}

impl Tree {
    /// Walk the whole tree in document order.
    pub fn traverse(&self) -> Traverse<'_> {
        self.root().traverse()
    }
}
