//! Inline citation marker extraction

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::warn;

/// `[<title>, p.<page>]`; whitespace around `p.` is allowed
const MARKER_PATTERN: &str = r"\[([^\]]+),\s*p\.\s*(\d+)\]";

static MARKER_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn marker_regex() -> Option<&'static Regex> {
    MARKER_RE
        .get_or_init(|| match Regex::new(MARKER_PATTERN) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(error = %e, "Failed to compile citation marker regex");
                None
            }
        })
        .as_ref()
}

/// A citation marker found in generated text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationMarker {
    /// The marker exactly as written, brackets included
    pub raw: String,
    /// Cited title, surrounding whitespace removed
    pub title: String,
    pub page: u32,
    /// Byte offsets of the marker in the text
    pub start: usize,
    pub end: usize,
}

/// Extract markers left to right.
///
/// Malformed markers (no page digits, unterminated bracket, page number out of
/// range, blank title) are skipped.
pub fn extract_markers(text: &str) -> Vec<CitationMarker> {
    let Some(re) = marker_regex() else {
        return Vec::new();
    };

    re.captures_iter(text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let title = cap[1].trim();
            let page = cap[2].parse::<u32>().ok()?;
            if title.is_empty() {
                return None;
            }
            Some(CitationMarker {
                raw: whole.as_str().to_string(),
                title: title.to_string(),
                page,
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}
