/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Tag-tree markup parsing for Quarto sites.
//!
//! Site sources describe pages as loosely XML-like markup:
//!
//! ```text
//! <page title="Home">
//!   <section>Intro</section>
//!   <section>More</section>
//! </page>
//! ```
//!
//! This crate turns such text into an ordered [`Tree`] of elements and text
//! leaves, then indexes it so every node knows its path from the root and its
//! parent and siblings. Indexed trees support pre-order traversal, lookup by
//! path and comparison in document order.
//!
//! Parsing is forgiving. It never fails; an element whose closing tag is
//! missing is built without children and a diagnostic is reported to the
//! caller's [`DiagnosticSink`].
//!
//! # Example
//!
//! ```rust
//! use quarto_markup::{parse, MarkupParseContext, TagSet};
//!
//! let tags = TagSet::from_list("page|section").unwrap();
//! let mut ctx = MarkupParseContext::new();
//! let tree = parse(
//!     r#"<page title="Home"><section>Intro</section><section>More</section></page>"#,
//!     &tags,
//!     &mut ctx,
//! );
//!
//! let page = tree.root();
//! assert_eq!(page.attribute("title"), Some("Home"));
//!
//! let first = page.first_of_type("section").unwrap();
//! let second = page.child(&[1]).unwrap();
//! assert_eq!(first.path(), Some(vec![0]));
//! assert!(first < second);
//! assert!(!ctx.has_diagnostics());
//! ```

pub mod attributes;
pub mod builder;
pub mod chop;
pub mod config;
pub mod context;
pub mod diagnostic;
mod display;
pub mod error;
mod index;
pub mod navigate;
pub mod node;
pub mod order;
pub mod tag;
pub mod tree;

// Re-export main types
pub use builder::TreeBuilder;
pub use config::MarkupConfig;
pub use context::{DiagnosticSink, IgnoreDiagnostics, MarkupParseContext, TracingSink};
pub use diagnostic::{DiagnosticKind, DiagnosticMessage, DiagnosticMessageBuilder};
pub use error::{Error, Result};
pub use navigate::Traverse;
pub use node::{Attributes, NodeId, NodeKind, TEXT_TYPE};
pub use order::document_order;
pub use tag::{TagMatch, TagMatcher, TagSet};
pub use tree::{NodeRef, Tree};

/// Build and index a tree from `text`.
pub fn parse<S>(text: &str, tags: &TagSet, sink: &mut S) -> Tree
where
    S: DiagnosticSink + ?Sized,
{
    let mut tree = TreeBuilder::new(tags).build(text, sink);
    tree.index();
    tree
}

/// Build a tree as described by `config`.
///
/// Fails only if the configured tag names are invalid.
pub fn parse_with_config<S>(text: &str, config: &MarkupConfig, sink: &mut S) -> Result<Tree>
where
    S: DiagnosticSink + ?Sized,
{
    let tags = config.tag_set()?;
    let mut tree = TreeBuilder::new(&tags).build(text, sink);
    if config.index {
        tree.index();
    }
    Ok(tree)
}
