/*
 * tag.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Tag recognition.
//!
//! A [`TagMatcher`] finds opening tags `<name attrs>` and closing tags
//! `</name>` whose name belongs to a [`TagSet`]. Whitespace (including
//! newlines) is tolerated after `<`, around `/`, and before the `>` of a
//! closing tag. Matching is case-sensitive.

use crate::error::{Error, Result};
use memchr::{memchr, memchr_iter, memrchr_iter};
use std::collections::BTreeSet;
use std::ops::Range;

/// The tag names recognized as structure during one parse.
///
/// `Any` accepts every name token; `Names` accepts only the listed names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagSet {
    #[default]
    Any,
    Names(BTreeSet<String>),
}

impl TagSet {
    /// Build a tag set from names. An empty collection means any name.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for name in names {
            let name = name.into();
            validate_name(&name)?;
            set.insert(name);
        }
        if set.is_empty() {
            Ok(TagSet::Any)
        } else {
            Ok(TagSet::Names(set))
        }
    }

    /// Build a tag set from a `|`-separated list such as `"page|section"`.
    ///
    /// Empty segments are skipped; an empty list means any name.
    pub fn from_list(list: &str) -> Result<Self> {
        Self::new(
            list.split('|')
                .map(str::trim_ascii)
                .filter(|segment| !segment.is_empty()),
        )
    }

    pub fn is_any(&self) -> bool {
        matches!(self, TagSet::Any)
    }

    pub fn contains(&self, name: &str) -> bool {
        match self {
            TagSet::Any => !name.is_empty(),
            TagSet::Names(names) => names.contains(name),
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "tag names can't be empty"
    } else if name.bytes().any(|b| b.is_ascii_whitespace()) {
        "tag names can't contain whitespace"
    } else if name.bytes().any(is_delimiter) {
        "tag names can't contain `<`, `>` or `/`"
    } else {
        return Ok(());
    };
    Err(Error::InvalidTagName {
        name: name.to_string(),
        reason,
    })
}

fn is_delimiter(b: u8) -> bool {
    matches!(b, b'<' | b'>' | b'/')
}

fn is_name_byte(b: u8) -> bool {
    !b.is_ascii_whitespace() && !is_delimiter(b)
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(|b| b.is_ascii_whitespace()) {
        pos += 1;
    }
    pos
}

/// A recognized tag within some text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagMatch<'t> {
    /// Byte offset of the `<`.
    pub start: usize,
    /// Byte offset just past the `>`.
    pub end: usize,
    pub name: &'t str,
    pub closing: bool,
    /// Raw attribute text between the name and the `>` (empty for closing tags).
    pub attributes: &'t str,
}

impl TagMatch<'_> {
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Finds tags whose names belong to a [`TagSet`].
#[derive(Debug, Clone, Copy)]
pub struct TagMatcher<'s> {
    tags: &'s TagSet,
}

impl<'s> TagMatcher<'s> {
    pub fn new(tags: &'s TagSet) -> Self {
        Self { tags }
    }

    pub fn tags(&self) -> &'s TagSet {
        self.tags
    }

    /// Find the earliest opening or closing tag starting at or after `from`.
    pub fn find<'t>(&self, text: &'t str, from: usize) -> Option<TagMatch<'t>> {
        let bytes = text.as_bytes();
        let from = from.min(bytes.len());
        memchr_iter(b'<', &bytes[from..]).find_map(|offset| self.match_at(text, from + offset))
    }

    /// Match a tag that starts exactly at `pos`.
    pub fn match_at<'t>(&self, text: &'t str, pos: usize) -> Option<TagMatch<'t>> {
        tag_at(text, pos, |name| self.tags.contains(name))
    }

    /// Find the last closing tag for `name` in `text`.
    pub fn find_last_closing<'t>(&self, text: &'t str, name: &str) -> Option<TagMatch<'t>> {
        memrchr_iter(b'<', text.as_bytes())
            .filter_map(|pos| tag_at(text, pos, |candidate| candidate == name))
            .find(|tag| tag.closing)
    }
}

fn tag_at<'t>(text: &'t str, pos: usize, accept: impl Fn(&str) -> bool) -> Option<TagMatch<'t>> {
    let bytes = text.as_bytes();
    if bytes.get(pos) != Some(&b'<') {
        return None;
    }

    let mut i = skip_whitespace(bytes, pos + 1);
    let closing = bytes.get(i) == Some(&b'/');
    if closing {
        i = skip_whitespace(bytes, i + 1);
    }

    let name_start = i;
    while bytes.get(i).is_some_and(|&b| is_name_byte(b)) {
        i += 1;
    }
    let name = &text[name_start..i];
    if name.is_empty() || !accept(name) {
        return None;
    }

    if closing {
        let gt = skip_whitespace(bytes, i);
        return (bytes.get(gt) == Some(&b'>')).then_some(TagMatch {
            start: pos,
            end: gt + 1,
            name,
            closing: true,
            attributes: "",
        });
    }

    match bytes.get(i) {
        Some(b'>') => Some(TagMatch {
            start: pos,
            end: i + 1,
            name,
            closing: false,
            attributes: "",
        }),
        Some(b) if b.is_ascii_whitespace() => {
            let gt = i + memchr(b'>', &bytes[i..])?;
            Some(TagMatch {
                start: pos,
                end: gt + 1,
                name,
                closing: false,
                attributes: &text[i..gt],
            })
        }
        _ => None,
    }
}
