/*
 * property_tests.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Property tests: well-formed markup parses back into the tree it was
//! rendered from, and indexing agrees with source order.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use quarto_markup::chop::chop;
use quarto_markup::{parse, MarkupParseContext, NodeRef, TagMatcher, TagSet, Tree};

const NAMES: &[&str] = &["page", "section", "item"];

/// A tree shape to render as markup.
#[derive(Debug, Clone)]
enum Shape {
    Element {
        name: String,
        id: Option<String>,
        children: Vec<Shape>,
    },
    Text(String),
}

impl Shape {
    fn render(&self, out: &mut String) {
        match self {
            Shape::Text(text) => out.push_str(text),
            Shape::Element { name, id, children } => {
                out.push('<');
                out.push_str(name);
                if let Some(id) = id {
                    out.push_str(&format!(" id=\"{}\"", id));
                }
                out.push('>');
                render_children(children, out);
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }

    /// Pre-order list of (type name, text payload).
    fn flatten(&self, out: &mut Vec<(String, Option<String>)>) {
        match self {
            Shape::Text(text) => out.push(("text".to_string(), Some(text.clone()))),
            Shape::Element { name, children, .. } => {
                out.push((name.clone(), None));
                for child in children {
                    child.flatten(out);
                }
            }
        }
    }
}

fn render_children(children: &[Shape], out: &mut String) {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        child.render(out);
    }
}

/// Adjacent text runs render as one run separated by a space.
fn merge_texts(children: Vec<Shape>) -> Vec<Shape> {
    let mut merged: Vec<Shape> = Vec::new();
    for child in children {
        match (merged.last_mut(), child) {
            (Some(Shape::Text(previous)), Shape::Text(next)) => {
                previous.push(' ');
                previous.push_str(&next);
            }
            (_, child) => merged.push(child),
        }
    }
    merged
}

fn element(inner: impl Strategy<Value = Shape>) -> impl Strategy<Value = Shape> {
    (
        prop::sample::select(NAMES),
        prop::option::of("[a-z]{1,6}"),
        prop::collection::vec(inner, 0..4),
    )
        .prop_map(|(name, id, children)| Shape::Element {
            name: name.to_string(),
            id,
            children: merge_texts(children),
        })
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = "[a-z]{1,8}".prop_map(Shape::Text);
    let node = leaf.prop_recursive(4, 32, 4, |inner| element(inner));
    element(node)
}

fn build(shape: &Shape) -> (Tree, MarkupParseContext) {
    let mut text = String::new();
    shape.render(&mut text);
    let tags = TagSet::new(NAMES.iter().copied()).unwrap();
    let mut ctx = MarkupParseContext::new();
    let tree = parse(&text, &tags, &mut ctx);
    (tree, ctx)
}

fn flatten_tree(tree: &Tree) -> Vec<(String, Option<String>)> {
    tree.traverse()
        .map(|n| (n.type_name().to_string(), n.text().map(str::to_string)))
        .collect()
}

/// Walk `shape` and the node built from it together, checking every
/// element's child count against the chopped inner content.
fn check_child_counts(
    shape: &Shape,
    node: NodeRef<'_>,
    matcher: &TagMatcher<'_>,
) -> Result<(), TestCaseError> {
    match shape {
        Shape::Text(_) => {
            prop_assert_eq!(node.child_count(), 0);
        }
        Shape::Element { children, .. } => {
            let mut inner = String::new();
            render_children(children, &mut inner);
            prop_assert_eq!(node.child_count(), chop(&inner, matcher).len());
            prop_assert_eq!(node.child_count(), children.len());
            for (child, child_node) in children.iter().zip(node.children()) {
                check_child_counts(child, child_node, matcher)?;
            }
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn parses_back_the_rendered_shape(shape in shape()) {
        let (tree, ctx) = build(&shape);
        let mut expected = Vec::new();
        shape.flatten(&mut expected);

        prop_assert!(!ctx.has_diagnostics());
        prop_assert_eq!(flatten_tree(&tree), expected);
    }

    #[test]
    fn traversal_is_strictly_increasing_in_document_order(shape in shape()) {
        let (tree, _) = build(&shape);
        let nodes: Vec<_> = tree.traverse().collect();
        for pair in nodes.windows(2) {
            prop_assert!(pair[0] < pair[1]);
            prop_assert!(pair[1] > pair[0]);
        }
        for node in &nodes {
            prop_assert_eq!(node.partial_cmp(node), Some(std::cmp::Ordering::Equal));
        }
    }

    #[test]
    fn every_path_resolves_to_its_node(shape in shape(), bogus in 4usize..10) {
        let (tree, _) = build(&shape);
        let root = tree.root();
        for node in tree.traverse() {
            let path = node.path().unwrap();
            prop_assert_eq!(root.child(&path), Some(node));

            for (i, child) in node.children().enumerate() {
                let mut expected = path.clone();
                expected.push(i);
                prop_assert_eq!(child.path().unwrap(), expected);
            }

            let mut past_end = path;
            past_end.push(node.child_count() + bogus);
            prop_assert_eq!(root.child(&past_end), None);
        }
    }

    #[test]
    fn child_count_matches_chopped_fragments(shape in shape()) {
        let (tree, _) = build(&shape);
        let tags = TagSet::new(NAMES.iter().copied()).unwrap();
        let matcher = TagMatcher::new(&tags);

        check_child_counts(&shape, tree.root(), &matcher)?;
    }

    #[test]
    fn indexing_twice_is_idempotent(shape in shape()) {
        let (mut tree, _) = build(&shape);
        let snapshot = |tree: &Tree| {
            tree.traverse()
                .map(|n| {
                    (
                        n.path().unwrap(),
                        n.parent().map(|p| p.id()),
                        n.prev().map(|p| p.id()),
                        n.next().map(|p| p.id()),
                    )
                })
                .collect::<Vec<_>>()
        };
        let first = snapshot(&tree);
        tree.index();
        prop_assert_eq!(first, snapshot(&tree));
    }
}
