/*
 * display.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Debug rendering of markup trees.
//!
//! The output is re-derived from the tree, not the source: attributes are
//! written as `name = value` without quotes and whitespace is normalized.
//!
//! ```text
//!
//! <page title = Home>
//! <section>
//! <text> Intro </text>
//! </section>
//! </page>
//! ```

use crate::node::{NodeKind, TEXT_TYPE};
use crate::tree::{NodeRef, Tree};
use std::fmt;

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `Exit` closes an element once all of its children are written
        enum Step<'a> {
            Enter(NodeRef<'a>),
            Exit(&'a str),
        }

        let mut steps = vec![Step::Enter(*self)];
        while let Some(step) = steps.pop() {
            let node = match step {
                Step::Enter(node) => node,
                Step::Exit(name) => {
                    write!(f, "\n</{name}>")?;
                    continue;
                }
            };
            match node.kind() {
                NodeKind::Text(text) => write!(f, "\n<{TEXT_TYPE}> {text} </{TEXT_TYPE}>")?,
                NodeKind::Element { name, attributes } => {
                    write!(f, "\n<{name}")?;
                    for (key, value) in attributes {
                        write!(f, " {key} = {value}")?;
                    }
                    f.write_str("> ")?;
                    steps.push(Step::Exit(name));
                    steps.extend(node.children().rev().map(Step::Enter));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root(), f)
    }
}
