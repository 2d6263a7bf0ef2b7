/*
 * integration_tests.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! End-to-end tests for parsing, indexing and querying markup trees.

use pretty_assertions::assert_eq;
use quarto_markup::{
    parse, parse_with_config, DiagnosticKind, IgnoreDiagnostics, MarkupConfig,
    MarkupParseContext, NodeKind, TagSet, TracingSink, TreeBuilder,
};
use std::cmp::Ordering;

const SITE_PAGE: &str = r#"
<page title="Home" menu = main>
  <header>Welcome</header>
  Some introduction text
  that spans lines.
  <section id="news">
    <item date=2024-01-05>First post</item>
    <item date=2024-02-11>Second post</item>
  </section>
  <section id="about">
    <em>not structural</em> here
  </section>
</page>
"#;

fn site_tags() -> TagSet {
    TagSet::from_list("page|header|section|item").unwrap()
}

#[test]
fn test_home_page_scenario() {
    let tags = TagSet::from_list("page|section").unwrap();
    let mut ctx = MarkupParseContext::new();
    let tree = parse(
        r#"<page title="Home"><section>Intro</section><section>More</section></page>"#,
        &tags,
        &mut ctx,
    );

    let page = tree.root();
    assert_eq!(page.type_name(), "page");
    assert_eq!(page.attributes().collect::<Vec<_>>(), vec![("title", "Home")]);
    assert_eq!(page.child_count(), 2);

    let first = page.child_at(0).unwrap();
    let second = page.child_at(1).unwrap();
    assert_eq!(first.type_name(), "section");
    assert_eq!(second.type_name(), "section");
    assert_eq!(first.child_at(0).unwrap().text(), Some("Intro"));
    assert_eq!(second.child_at(0).unwrap().text(), Some("More"));

    assert_eq!(first.path(), Some(vec![0]));
    assert_eq!(second.path(), Some(vec![1]));
    assert_eq!(
        tree.document_order(first.id(), second.id()),
        Some(Ordering::Less)
    );
    assert!(first < second);
    assert!(!ctx.has_diagnostics());
}

#[test]
fn test_missing_closing_tag_scenario() {
    let mut ctx = MarkupParseContext::new();
    let tree = parse("<a><b>x</b>", &TagSet::Any, &mut ctx);

    assert_eq!(tree.root().type_name(), "a");
    assert_eq!(tree.root().child_count(), 0);
    assert_eq!(ctx.diagnostics().len(), 1);
    assert_eq!(ctx.diagnostics()[0].kind, DiagnosticKind::Warning);
    assert!(ctx.diagnostics()[0].to_string().contains("</a>"));
}

#[test]
fn test_plain_text_scenario() {
    let mut ctx = MarkupParseContext::new();
    let tree = parse("just text", &TagSet::Any, &mut ctx);

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.root().kind(), &NodeKind::Text("just text".to_string()));
    assert_eq!(tree.root().path(), Some(vec![]));
    assert!(!ctx.has_diagnostics());
}

#[test]
fn test_site_page_structure() {
    let mut ctx = MarkupParseContext::new();
    let tree = parse(SITE_PAGE, &site_tags(), &mut ctx);
    assert!(!ctx.has_diagnostics());

    let page = tree.root();
    assert_eq!(page.attribute("title"), Some("Home"));
    assert_eq!(page.attribute("menu"), Some("main"));

    let kinds: Vec<_> = page.children().map(|c| c.type_name()).collect();
    assert_eq!(kinds, vec!["header", "text", "section", "section"]);
    assert_eq!(
        page.child_at(1).unwrap().text(),
        Some("Some introduction text\n  that spans lines.")
    );

    let news = page.first_of_type("section").unwrap();
    assert_eq!(news.attribute("id"), Some("news"));
    let dates: Vec<_> = news
        .children()
        .map(|item| item.attribute("date").unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-01-05", "2024-02-11"]);

    let about = news.next().unwrap();
    assert_eq!(about.attribute("id"), Some("about"));
    assert_eq!(about.child_count(), 1);
    assert_eq!(
        about.child_at(0).unwrap().text(),
        Some("<em>not structural</em> here")
    );
    assert_eq!(about.prev(), Some(news));
    assert_eq!(about.parent(), Some(page));
}

#[test]
fn test_traversal_is_document_order() {
    let tree = parse(SITE_PAGE, &site_tags(), &mut IgnoreDiagnostics);
    let nodes: Vec<_> = tree.traverse().collect();

    for pair in nodes.windows(2) {
        assert!(pair[0] < pair[1], "{:?} should precede {:?}", pair[0], pair[1]);
    }

    let mut ids: Vec<_> = nodes.iter().rev().map(|n| n.id()).collect();
    tree.sort_in_document_order(&mut ids);
    let expected: Vec<_> = nodes.iter().map(|n| n.id()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_every_node_resolves_by_path() {
    let tree = parse(SITE_PAGE, &site_tags(), &mut IgnoreDiagnostics);
    let root = tree.root();

    for node in tree.traverse() {
        let path = node.path().unwrap();
        assert_eq!(root.child(&path), Some(node));

        if let Some(parent) = node.parent() {
            let parent_path = parent.path().unwrap();
            assert_eq!(&path[..path.len() - 1], parent_path.as_slice());
        }
    }

    assert_eq!(root.child(&[7]), None);
    assert_eq!(root.child(&[2, 0, 0, 0]), None);
}

#[test]
fn test_attribute_mutation_after_indexing() {
    let mut tree = parse(SITE_PAGE, &site_tags(), &mut IgnoreDiagnostics);
    let news = tree.root().child(&[2]).unwrap().id();

    let previous = tree.set_attribute(news, "id", "updates").unwrap();
    assert_eq!(previous.as_deref(), Some("news"));
    tree.set_attribute(news, "hidden", "true").unwrap();

    let news = tree.get(news).unwrap();
    assert_eq!(
        news.attributes().collect::<Vec<_>>(),
        vec![("id", "updates"), ("hidden", "true")]
    );
    assert_eq!(news.child_count(), 2);
    assert_eq!(news.path(), Some(vec![2]));
}

#[test]
fn test_unindexed_tree_hides_paths() {
    let tree = TreeBuilder::new(&site_tags()).build(SITE_PAGE, &mut IgnoreDiagnostics);
    assert!(!tree.is_indexed());

    let header = tree.root().child_at(0).unwrap();
    assert_eq!(header.path(), None);
    assert_eq!(header.parent(), None);
    assert_eq!(header.next(), None);
    assert_eq!(tree.root().partial_cmp(&header), None);
}

#[test]
fn test_parse_with_config() {
    let config = MarkupConfig::from_toml_str(r#"tags = ["page", "section"]"#).unwrap();
    let tree = parse_with_config(
        "<page><section>a</section><item>b</item></page>",
        &config,
        &mut TracingSink,
    )
    .unwrap();

    assert!(tree.is_indexed());
    let kinds: Vec<_> = tree.root().children().map(|c| c.type_name()).collect();
    assert_eq!(kinds, vec!["section", "text"]);

    let config = MarkupConfig::from_yaml_str("index: false").unwrap();
    let tree = parse_with_config("<a>b</a>", &config, &mut TracingSink).unwrap();
    assert!(!tree.is_indexed());

    let config = MarkupConfig {
        tags: vec!["<bad>".to_string()],
        index: true,
    };
    assert!(parse_with_config("<a>b</a>", &config, &mut TracingSink).is_err());
}

#[test]
fn test_display_of_parsed_page() {
    let tags = TagSet::from_list("page|section").unwrap();
    let tree = parse(
        r#"<page title="Home"><section>Intro</section></page>"#,
        &tags,
        &mut IgnoreDiagnostics,
    );
    assert_eq!(
        tree.to_string(),
        "\n<page title = Home> \n<section> \n<text> Intro </text>\n</section>\n</page>"
    );
}

#[test]
fn test_deeply_nested_page() {
    let depth = 100_000;
    let text = format!(
        "<page>{}deep{}<section>tail</section></page>",
        "<section>".repeat(depth),
        "</section>".repeat(depth)
    );
    let mut ctx = MarkupParseContext::new();
    let tree = parse(&text, &TagSet::from_list("page|section").unwrap(), &mut ctx);

    assert!(!ctx.has_diagnostics());
    assert_eq!(tree.len(), depth + 4);
    assert_eq!(tree.root().child_count(), 2);

    let nodes: Vec<_> = tree.traverse().collect();
    assert_eq!(nodes.len(), tree.len());
    let leaf = nodes[depth + 1];
    assert_eq!(leaf.text(), Some("deep"));
    assert_eq!(leaf.depth(), Some(depth + 1));
    assert!(nodes[1] < leaf);

    let tail = tree.root().child_at(1).unwrap();
    assert_eq!(tail.path(), Some(vec![1]));
    assert!(leaf < tail);
    assert_eq!(tail.prev(), Some(nodes[1]));

    let path = vec![0; depth + 1];
    assert_eq!(tree.root().child(&path), Some(leaf));

    let rendered = tree.to_string();
    assert!(rendered.ends_with("\n<section> \n<text> tail </text>\n</section>\n</page>"));
    assert_eq!(rendered.matches("<section>").count(), depth + 1);
}
