//! Paragraph view of section text and locked-paragraph reconciliation
//!
//! Paragraphs are never stored. They are derived on demand by splitting text
//! on blank lines (`"\n\n"`), trimming each piece and dropping empty ones, so
//! a paragraph index is a position in that derived sequence.
//!
//! Locks pin a frozen paragraph text to an index. When a section is
//! regenerated, [`merge_with_locks`] places each locked text back at its index
//! and fills the remaining positions from the new text. The merge is
//! positional: if the paragraph count shifts between lock and merge, a lock
//! still pins its index, whatever the new content at that index is about.

mod lock;

use std::collections::BTreeMap;
use std::ops::Range;

pub use lock::{lock_paragraphs, unlock_paragraphs, LockOutcome, LockedParagraph};

/// Blank-line boundary between paragraphs
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Split text into trimmed, non-empty paragraphs
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split(PARAGRAPH_SEPARATOR)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Count whitespace-separated words
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Merge regenerated text with locked paragraphs.
///
/// The output has `max(new paragraph count, highest lock index + 1)`
/// positions. A locked position takes the locked text; any other position
/// takes the new paragraph at that index, or is left out when the new text
/// has none. When an index appears more than once the last lock wins.
pub fn merge_with_locks<'a, I>(new_text: &str, locks: I) -> String
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let new_paragraphs = split_paragraphs(new_text);
    let locked: BTreeMap<usize, &str> = locks.into_iter().collect();

    let span = locked
        .keys()
        .next_back()
        .map_or(new_paragraphs.len(), |&max| {
            new_paragraphs.len().max(max + 1)
        });

    let merged: Vec<&str> = (0..span)
        .filter_map(|i| {
            locked
                .get(&i)
                .copied()
                .or_else(|| new_paragraphs.get(i).copied())
        })
        .collect();

    merged.join(PARAGRAPH_SEPARATOR)
}

/// Byte ranges of each paragraph's trimmed text within `text`
fn paragraph_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut offset = 0;

    for piece in text.split(PARAGRAPH_SEPARATOR) {
        let leading = piece.len() - piece.trim_start().len();
        let trimmed = piece.trim();
        if !trimmed.is_empty() {
            let start = offset + leading;
            spans.push(start..start + trimmed.len());
        }
        offset += piece.len() + PARAGRAPH_SEPARATOR.len();
    }
    spans
}

/// Byte range of paragraph `index` within `text`, or `None` when out of range
pub fn paragraph_bounds(text: &str, index: usize) -> Option<Range<usize>> {
    paragraph_spans(text).into_iter().nth(index)
}

/// Find the paragraph containing an editor cursor at `char_offset`.
///
/// The offset counts characters, not bytes. Both ends of a paragraph count as
/// inside it, so a cursor placed just after the last character still selects
/// that paragraph. Offsets between paragraphs or past the end yield `None`.
pub fn paragraph_at_position(text: &str, char_offset: usize) -> Option<(usize, &str)> {
    let byte_offset = match text.char_indices().nth(char_offset) {
        Some((byte, _)) => byte,
        None if char_offset == text.chars().count() => text.len(),
        None => return None,
    };
    paragraph_spans(text)
        .into_iter()
        .enumerate()
        .find(|(_, span)| span.start <= byte_offset && byte_offset <= span.end)
        .map(|(index, span)| (index, &text[span]))
}
