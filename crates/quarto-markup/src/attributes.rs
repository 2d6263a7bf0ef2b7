/*
 * attributes.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Attribute parsing for opening tags.
//!
//! Attribute text is a run of `name = value` tokens. Every `=` is a
//! delimiter: the token right before it is a name, and the text between two
//! delimiters (minus the next name) is a value. Values may span whitespace and
//! are taken verbatim up to the next delimiter, quoted or not.

use memchr::memchr_iter;
use std::ops::Range;

fn is_name_byte(b: u8) -> bool {
    b != b'=' && !b.is_ascii_whitespace()
}

struct Delimiter {
    name: Range<usize>,
    value_start: usize,
}

/// Parse raw attribute text into ordered `(name, value)` pairs.
///
/// Repeated names are all returned; the caller decides which one wins.
/// Nothing is rejected: stray `=` signs produce empty names or values.
pub fn parse_attributes(raw: &str) -> Vec<(String, String)> {
    let bytes = raw.as_bytes();

    let mut delimiters: Vec<Delimiter> = Vec::new();
    for eq in memchr_iter(b'=', bytes) {
        let lower = delimiters.last().map_or(0, |d| d.value_start);

        let mut name_end = eq;
        while name_end > lower && bytes[name_end - 1].is_ascii_whitespace() {
            name_end -= 1;
        }
        let mut name_start = name_end;
        while name_start > lower && is_name_byte(bytes[name_start - 1]) {
            name_start -= 1;
        }

        delimiters.push(Delimiter {
            name: name_start..name_end,
            value_start: eq + 1,
        });
    }

    delimiters
        .iter()
        .enumerate()
        .map(|(i, delimiter)| {
            // the end of the text acts as a final delimiter
            let value_end = delimiters
                .get(i + 1)
                .map_or(bytes.len(), |next| next.name.start);
            let name = &raw[delimiter.name.clone()];
            let value = unquote(raw[delimiter.value_start..value_end].trim_ascii());
            (name.to_string(), value.to_string())
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
