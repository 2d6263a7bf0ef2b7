/*
 * builder.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Tree construction.
//!
//! A fragment that starts with a recognized opening tag becomes an element;
//! anything else becomes a text node. An element's content ends at the
//! **last** closing tag with its name, and that content is chopped into
//! fragments that are built the same way.
//!
//! The input is scanned for tags once. Fragments are then regions of that
//! scan, built from an explicit work stack, so nesting depth is bounded by
//! memory rather than by the call stack.

use crate::attributes::parse_attributes;
use crate::chop::{Region, TagScan};
use crate::context::DiagnosticSink;
use crate::diagnostic::{DiagnosticMessage, DiagnosticMessageBuilder};
use crate::node::{Attributes, NodeData, NodeId, NodeKind};
use crate::tag::{TagMatcher, TagSet};
use crate::tree::Tree;

/// Builds unindexed [`Tree`]s for one tag set.
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder<'s> {
    matcher: TagMatcher<'s>,
}

impl<'s> TreeBuilder<'s> {
    pub fn new(tags: &'s TagSet) -> Self {
        Self {
            matcher: TagMatcher::new(tags),
        }
    }

    /// Build a tree from `text`.
    ///
    /// Never fails. A missing closing tag leaves that element without
    /// children and reports one diagnostic to `sink`. The returned tree still
    /// needs [`Tree::index`] before paths or links can be read.
    pub fn build<S>(&self, text: &str, sink: &mut S) -> Tree
    where
        S: DiagnosticSink + ?Sized,
    {
        tracing::debug!(
            bytes = text.len(),
            any_tag = self.matcher.tags().is_any(),
            "building markup tree"
        );

        let scan = TagScan::new(text, &self.matcher);
        let mut nodes: Vec<NodeData> = Vec::new();
        // children are pushed in reverse so ids come out in pre-order
        let mut pending = vec![(scan.trim(scan.whole()), None::<NodeId>)];

        while let Some((fragment, parent)) = pending.pop() {
            let id = NodeId::new(nodes.len());
            let (data, content) = build_node(&scan, &fragment, sink);
            nodes.push(data);
            if let Some(parent) = parent {
                nodes[parent.index()].children.push(id);
            }
            if let Some(content) = content {
                for piece in scan.fragments(&content).into_iter().rev() {
                    pending.push((piece, Some(id)));
                }
            }
        }

        Tree::from_parts(nodes, NodeId::new(0))
    }
}

/// Make the node for one fragment, returning the region its children come
/// from.
fn build_node<S>(scan: &TagScan<'_>, fragment: &Region, sink: &mut S) -> (NodeData, Option<Region>)
where
    S: DiagnosticSink + ?Sized,
{
    let text = scan.text();
    let Some(open_index) = scan.leading_open(fragment) else {
        let payload = text[fragment.bytes.clone()].to_string();
        return (NodeData::new(NodeKind::Text(payload)), None);
    };
    let open = scan.tag(open_index);

    let mut attributes = Attributes::new();
    for (name, value) in parse_attributes(open.attributes) {
        attributes.insert(name, value);
    }
    let data = NodeData::new(NodeKind::Element {
        name: open.name.to_string(),
        attributes,
    });

    let content = match scan.last_closing(open.name, open_index + 1..fragment.tags.end) {
        Some(close) => Some(scan.trim(Region {
            bytes: open.end..scan.tag(close).start,
            tags: open_index + 1..close,
        })),
        None => {
            sink.report(missing_closing_tag(
                open.name,
                &text[open.end..fragment.bytes.end],
            ));
            None
        }
    };
    (data, content)
}

/// Diagnostic for an opening tag whose closing tag never appears.
pub fn missing_closing_tag(name: &str, searched: &str) -> DiagnosticMessage {
    DiagnosticMessageBuilder::warning("Missing Closing Tag")
        .with_code("Q-13-1")
        .problem(format!(
            "didn't find closing tag </{}> in {}",
            name,
            searched.trim_ascii()
        ))
        .add_info(format!("`<{}>` was built without children", name))
        .add_hint(format!("Add `</{}>` after the element's content?", name))
        .build()
}
