/*
 * chop.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Splitting content into top-level fragments.
//!
//! A fragment is either one balanced tagged block or one run of text between
//! such blocks. Tags are counted by depth only, so differently named tags
//! nest as long as the input is well formed.

use crate::tag::{TagMatch, TagMatcher};
use std::collections::HashMap;
use std::ops::Range;

/// Split `text` into its top-level fragments, in source order.
///
/// Text runs are trimmed and dropped when empty. Fragments borrow from
/// `text`.
///
/// Unbalanced input never loses text: a closing tag at depth zero is kept as
/// part of the surrounding text, and a block still open at the end of the
/// input is returned together with everything after it as a single fragment.
pub fn chop<'t>(text: &'t str, matcher: &TagMatcher<'_>) -> Vec<&'t str> {
    let scan = TagScan::new(text, matcher);
    scan.fragments(&scan.whole())
        .into_iter()
        .map(|fragment| &text[fragment.bytes])
        .collect()
}

/// A span of the input together with the scanned tags that lie inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Region {
    pub(crate) bytes: Range<usize>,
    pub(crate) tags: Range<usize>,
}

/// Every tag of one input, found in a single left-to-right pass.
///
/// Each opening tag is paired with the closing tag that brings the depth
/// back to where it was, so a block's extent is known without rescanning
/// its content.
#[derive(Debug)]
pub(crate) struct TagScan<'t> {
    text: &'t str,
    tags: Vec<TagMatch<'t>>,
    partners: Vec<Option<usize>>,
    closing: HashMap<&'t str, Vec<usize>>,
}

impl<'t> TagScan<'t> {
    pub(crate) fn new(text: &'t str, matcher: &TagMatcher<'_>) -> Self {
        let mut tags = Vec::new();
        let mut cursor = 0;
        while let Some(tag) = matcher.find(text, cursor) {
            cursor = tag.end;
            tags.push(tag);
        }

        let mut partners = vec![None; tags.len()];
        let mut closing: HashMap<&'t str, Vec<usize>> = HashMap::new();
        let mut open = Vec::new();
        for (i, tag) in tags.iter().enumerate() {
            if tag.closing {
                if let Some(j) = open.pop() {
                    partners[j] = Some(i);
                }
                closing.entry(tag.name).or_default().push(i);
            } else {
                open.push(i);
            }
        }

        tracing::trace!(tags = tags.len(), "scanned markup tags");
        Self {
            text,
            tags,
            partners,
            closing,
        }
    }

    pub(crate) fn text(&self) -> &'t str {
        self.text
    }

    pub(crate) fn tag(&self, index: usize) -> &TagMatch<'t> {
        &self.tags[index]
    }

    pub(crate) fn whole(&self) -> Region {
        Region {
            bytes: 0..self.text.len(),
            tags: 0..self.tags.len(),
        }
    }

    /// Drop surrounding whitespace. Tags never start or end with
    /// whitespace, so the tag range is unchanged.
    pub(crate) fn trim(&self, region: Region) -> Region {
        let slice = &self.text[region.bytes.clone()];
        let start = region.bytes.start + (slice.len() - slice.trim_ascii_start().len());
        let end = start + slice.trim_ascii().len();
        Region {
            bytes: start..end,
            tags: region.tags,
        }
    }

    /// The opening tag that starts `region`, if any.
    pub(crate) fn leading_open(&self, region: &Region) -> Option<usize> {
        let index = region.tags.start;
        let tag = self.tags.get(index).filter(|_| index < region.tags.end)?;
        (!tag.closing && tag.start == region.bytes.start).then_some(index)
    }

    /// The last closing tag named `name` among `tags`.
    pub(crate) fn last_closing(&self, name: &str, tags: Range<usize>) -> Option<usize> {
        let positions = self.closing.get(name)?;
        let below = positions.partition_point(|&i| i < tags.end);
        positions[..below]
            .last()
            .copied()
            .filter(|&i| i >= tags.start)
    }

    /// Top-level fragments of `region`, in source order.
    pub(crate) fn fragments(&self, region: &Region) -> Vec<Region> {
        let mut fragments = Vec::new();
        // start of text not yet assigned to any fragment
        let mut pending = region.bytes.start;
        let mut pending_tag = region.tags.start;
        let mut index = region.tags.start;

        while index < region.tags.end {
            let tag = &self.tags[index];
            if tag.closing {
                // stray close at depth zero stays in the text
                index += 1;
                continue;
            }

            self.push_trimmed(
                &mut fragments,
                Region {
                    bytes: pending..tag.start,
                    tags: pending_tag..index,
                },
            );
            match self.partners[index].filter(|&close| close < region.tags.end) {
                Some(close) => {
                    let end = self.tags[close].end;
                    fragments.push(Region {
                        bytes: tag.start..end,
                        tags: index..close + 1,
                    });
                    pending = end;
                    pending_tag = close + 1;
                    index = close + 1;
                }
                None => {
                    self.push_trimmed(
                        &mut fragments,
                        Region {
                            bytes: tag.start..region.bytes.end,
                            tags: index..region.tags.end,
                        },
                    );
                    return fragments;
                }
            }
        }

        self.push_trimmed(
            &mut fragments,
            Region {
                bytes: pending..region.bytes.end,
                tags: pending_tag..region.tags.end,
            },
        );
        fragments
    }

    fn push_trimmed(&self, fragments: &mut Vec<Region>, region: Region) {
        let region = self.trim(region);
        if !region.bytes.is_empty() {
            fragments.push(region);
        }
    }
}
