/*
 * order.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Document order between indexed nodes.
//!
//! Indexing records each node's rank in a pre-order walk, which orders nodes
//! exactly as [`document_order`] orders their paths.

use crate::node::NodeId;
use crate::tree::{NodeRef, Tree};
use std::cmp::Ordering;

/// Compare two paths in document order.
///
/// The first differing index decides. When one path is a prefix of the other
/// the shorter one (the ancestor) comes first; equal paths are `Equal`.
pub fn document_order(a: &[usize], b: &[usize]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.cmp(y))
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

impl Tree {
    /// Document order of two nodes. `None` before indexing or for ids that
    /// are not in this tree.
    pub fn document_order(&self, a: NodeId, b: NodeId) -> Option<Ordering> {
        let (a, b) = (self.get(a)?, self.get(b)?);
        Some(a.rank()?.cmp(&b.rank()?))
    }

    /// Sort ids into document order. Leaves the slice untouched before
    /// indexing.
    pub fn sort_in_document_order(&self, ids: &mut [NodeId]) {
        if !self.indexed {
            return;
        }
        ids.sort_by(|&a, &b| self.document_order(a, b).unwrap_or(Ordering::Equal));
    }
}

impl<'a> NodeRef<'a> {
    /// Whether this node appears before `other` in the source.
    pub fn is_before(self, other: NodeRef<'a>) -> bool {
        self.partial_cmp(&other) == Some(Ordering::Less)
    }

    /// Whether this node appears after `other` in the source.
    pub fn is_after(self, other: NodeRef<'a>) -> bool {
        self.partial_cmp(&other) == Some(Ordering::Greater)
    }
}

/// Nodes of different trees are incomparable. Before indexing only a node
/// and itself compare.
impl PartialOrd for NodeRef<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !std::ptr::eq(self.tree(), other.tree()) {
            return None;
        }
        if self.id() == other.id() {
            return Some(Ordering::Equal);
        }
        Some(self.rank()?.cmp(&other.rank()?))
    }
}
