/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for the outer surfaces of markup parsing.
//!
//! Tree construction itself never fails; problems found while building a tree
//! are reported as diagnostics (see [`crate::context`]). The errors here cover
//! tag-set validation, configuration loading, and attribute mutation.

use crate::diagnostic::{DiagnosticMessage, DiagnosticMessageBuilder};
use crate::node::NodeId;
use thiserror::Error;

/// Result type alias for quarto-markup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside of tree construction.
#[derive(Debug, Error)]
pub enum Error {
    /// A tag name that can never be matched was given to a tag set.
    #[error("Invalid tag name {name:?}: {reason}")]
    InvalidTagName { name: String, reason: &'static str },

    /// A node id that does not belong to the tree.
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    /// An element-only operation was applied to a text node.
    #[error("Node {0} is a text node and has no attributes")]
    NotAnElement(NodeId),

    /// TOML configuration could not be deserialized.
    #[error("Invalid markup configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML configuration could not be deserialized.
    #[error("Invalid markup configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Convert this error to a DiagnosticMessage with the appropriate Q-13-* code.
    pub fn to_diagnostic(&self) -> DiagnosticMessage {
        match self {
            Error::InvalidTagName { name, reason } => {
                DiagnosticMessageBuilder::error("Invalid Tag Name")
                    .with_code("Q-13-2")
                    .problem(format!("`{}` can't be used as a tag name", name))
                    .add_detail(*reason)
                    .add_hint("Tag names can't contain whitespace, `<`, `>` or `/`?")
                    .build()
            }
            Error::UnknownNode(id) => DiagnosticMessageBuilder::error("Unknown Node")
                .with_code("Q-13-3")
                .problem(format!("Node {} does not belong to this tree", id))
                .build(),
            Error::NotAnElement(id) => DiagnosticMessageBuilder::error("Not An Element")
                .with_code("Q-13-4")
                .problem(format!("Node {} is a text node", id))
                .add_detail("Only elements carry attributes")
                .build(),
            Error::Toml(err) => config_diagnostic(err.to_string()),
            Error::Yaml(err) => config_diagnostic(err.to_string()),
        }
    }
}

fn config_diagnostic(problem: String) -> DiagnosticMessage {
    DiagnosticMessageBuilder::error("Invalid Markup Configuration")
        .with_code("Q-13-5")
        .problem(problem)
        .build()
}
