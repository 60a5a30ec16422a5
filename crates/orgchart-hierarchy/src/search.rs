//! Search and highlight: case-insensitive literal substring matching.
//!
//! Both sides are folded with `str::to_lowercase`, so context-dependent
//! and multi-char lowercasing (final sigma, dotted capital I) behaves the
//! same as lowercasing whole strings and testing containment. Highlight
//! spans are mapped back onto the original text and always land on its
//! character boundaries. The query is a literal; no character in it has
//! pattern meaning.

use std::ops::Range;

use orgchart_protocol::Employee;
use serde::Serialize;

/// One piece of a highlighted string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightSegment<'a> {
    pub text: &'a str,
    pub is_match: bool,
}

/// Filter employees whose name, designation or team contains `query`.
///
/// A blank query returns the input unchanged. Order is preserved.
pub fn search<'a, I>(employees: I, query: &str) -> Vec<&'a Employee>
where
    I: IntoIterator<Item = &'a Employee>,
{
    if query.trim().is_empty() {
        return employees.into_iter().collect();
    }

    let needle = query.to_lowercase();
    employees
        .into_iter()
        .filter(|e| {
            [&e.name, &e.designation, &e.team]
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str()))
        })
        .collect()
}

/// Split `text` into matching and non-matching segments.
///
/// Every case-insensitive, non-overlapping occurrence of `query` is a
/// matching segment, scanning left to right. A blank query yields the
/// whole text as one non-matching segment; empty text yields nothing.
pub fn highlight_spans<'a>(text: &'a str, query: &str) -> Vec<HighlightSegment<'a>> {
    if text.is_empty() {
        return Vec::new();
    }
    if query.trim().is_empty() {
        return vec![HighlightSegment {
            text,
            is_match: false,
        }];
    }

    let mut segments = Vec::new();
    let mut cursor = 0;
    for range in find_matches(text, query) {
        if range.start > cursor {
            segments.push(HighlightSegment {
                text: &text[cursor..range.start],
                is_match: false,
            });
        }
        segments.push(HighlightSegment {
            text: &text[range.clone()],
            is_match: true,
        });
        cursor = range.end;
    }
    if cursor < text.len() {
        segments.push(HighlightSegment {
            text: &text[cursor..],
            is_match: false,
        });
    }

    segments
}

/// Byte ranges of every non-overlapping case-insensitive occurrence of
/// `query` in `text`, leftmost first.
///
/// A match that covers only part of a character's lowercase expansion
/// widens to the whole original character. Matches that then touch the
/// same character are merged.
pub fn find_matches(text: &str, query: &str) -> Vec<Range<usize>> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let folded = FoldedText::new(text);
    let mut ranges: Vec<Range<usize>> = Vec::new();
    for (at, matched) in folded.text.match_indices(needle.as_str()) {
        let start = folded.origin[at].start;
        let end = folded.origin[at + matched.len() - 1].end;
        match ranges.last_mut() {
            Some(previous) if start < previous.end => previous.end = previous.end.max(end),
            _ => ranges.push(start..end),
        }
    }

    ranges
}

/// Lowercased text plus, for each of its bytes, the byte range of the
/// original character it came from.
struct FoldedText {
    text: String,
    origin: Vec<Range<usize>>,
}

impl FoldedText {
    fn new(original: &str) -> Self {
        let text = original.to_lowercase();
        // Only capital sigma lowercases by context, and both of its forms
        // are two bytes, so per-char widths line up with the whole fold.
        let mut origin = Vec::with_capacity(text.len());
        for (start, c) in original.char_indices() {
            let width: usize = c.to_lowercase().map(char::len_utf8).sum();
            let span = start..start + c.len_utf8();
            origin.extend(std::iter::repeat(span).take(width));
        }
        debug_assert_eq!(origin.len(), text.len());
        Self { text, origin }
    }
}
