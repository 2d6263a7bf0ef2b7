/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Parse configuration.
//!
//! Site projects declare which tag names are structural. The configuration
//! can be embedded in a project's TOML or YAML files:
//!
//! ```toml
//! tags = ["page", "section"]
//! ```

use crate::error::Result;
use crate::tag::TagSet;
use serde::{Deserialize, Serialize};

/// Options for one markup parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkupConfig {
    /// Structural tag names. Empty means any name is structural.
    pub tags: Vec<String>,

    /// Run the indexing pass right after building.
    pub index: bool,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            index: true,
        }
    }
}

impl MarkupConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// The validated tag set described by this configuration.
    pub fn tag_set(&self) -> Result<TagSet> {
        TagSet::new(self.tags.iter().cloned())
    }
}
