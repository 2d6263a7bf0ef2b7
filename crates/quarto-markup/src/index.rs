/*
 * index.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Parent/sibling linking and document ranks.

use crate::tree::Tree;

impl Tree {
    /// Link every node to its parent and siblings, and record its child
    /// position and pre-order rank.
    ///
    /// Must run once after building and before any path-dependent query.
    /// Running it again without changing the tree gives identical results.
    pub fn index(&mut self) {
        let root = self.root;
        let data = &mut self.nodes[root.index()];
        data.position = 0;
        data.parent = None;
        data.prev = None;
        data.next = None;

        let mut rank = 0;
        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            self.nodes[id.index()].rank = rank;
            rank += 1;

            // text nodes have no children, so this is a no-op for them
            let children = std::mem::take(&mut self.nodes[id.index()].children);
            for (i, &child) in children.iter().enumerate() {
                let data = &mut self.nodes[child.index()];
                data.position = i;
                data.parent = Some(id);
                data.prev = i.checked_sub(1).map(|j| children[j]);
                data.next = children.get(i + 1).copied();
            }
            pending.extend(children.iter().rev());
            self.nodes[id.index()].children = children;
        }
        self.indexed = true;

        tracing::debug!(nodes = self.nodes.len(), "indexed markup tree");
    }
}
