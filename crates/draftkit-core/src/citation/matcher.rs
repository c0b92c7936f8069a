//! Resolution of citation markers against retrieved citations

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::marker::{extract_markers, CitationMarker};
use super::Citation;

/// How a marker was matched. Ordering is precedence: exact beats fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Same title (case-insensitive) and same page
    Exact,
    /// Same title, different page
    TitleFallback,
}

/// The citation a marker resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Position in the `available` list
    pub index: usize,
    pub kind: MatchKind,
}

/// Outcome for one marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerResolution {
    pub marker: CitationMarker,
    /// `None` when the marker names a source that was never retrieved
    pub resolution: Option<Resolution>,
}

/// Attribution result for one piece of generated text
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CitationReport {
    /// Citations the text references, first occurrence first, no duplicates
    pub used: Vec<Citation>,
    /// Every marker found, in text order
    pub markers: Vec<MarkerResolution>,
}

impl CitationReport {
    /// Markers that matched nothing retrieved
    pub fn unresolved(&self) -> impl Iterator<Item = &CitationMarker> {
        self.markers
            .iter()
            .filter(|m| m.resolution.is_none())
            .map(|m| &m.marker)
    }

    /// Number of markers resolved by title only
    pub fn fallback_count(&self) -> usize {
        self.markers
            .iter()
            .filter(|m| matches!(m.resolution, Some(r) if r.kind == MatchKind::TitleFallback))
            .count()
    }
}

/// Pick the citation a marker refers to.
///
/// Candidates are citations whose title equals the marker title ignoring
/// case. They are ranked by (match kind, position in `available`) and the
/// lowest wins: the first exact title+page match, otherwise the first
/// title-only match.
pub fn rank_candidates(marker: &CitationMarker, available: &[Citation]) -> Option<Resolution> {
    let title = marker.title.to_lowercase();

    available
        .iter()
        .enumerate()
        .filter(|(_, citation)| citation.document_title.trim().to_lowercase() == title)
        .map(|(index, citation)| Resolution {
            index,
            kind: if citation.page_number == marker.page {
                MatchKind::Exact
            } else {
                MatchKind::TitleFallback
            },
        })
        .min_by_key(|resolution| (resolution.kind, resolution.index))
}

/// Resolve every marker in `text` and collect the citations it uses.
///
/// Pure: the same inputs always give the same report.
pub fn attribute_citations(text: &str, available: &[Citation]) -> CitationReport {
    let mut report = CitationReport::default();
    let mut seen: HashSet<(String, u32)> = HashSet::new();

    for marker in extract_markers(text) {
        let resolution = rank_candidates(&marker, available);

        match resolution {
            Some(resolution) => {
                let citation = &available[resolution.index];
                debug!(
                    marker = %marker.raw,
                    kind = ?resolution.kind,
                    page = citation.page_number,
                    "citation marker resolved"
                );
                let (title, page) = citation.identity();
                if seen.insert((title.to_string(), page)) {
                    report.used.push(citation.clone());
                }
            }
            None => {
                debug!(marker = %marker.raw, "citation marker matches no retrieved source");
            }
        }

        report.markers.push(MarkerResolution { marker, resolution });
    }

    debug!(
        markers = report.markers.len(),
        used = report.used.len(),
        fallback = report.fallback_count(),
        unresolved = report.unresolved().count(),
        "citations attributed"
    );
    report
}

/// The subset of `available` that `text` references, first occurrence first
pub fn extract_used_citations(text: &str, available: &[Citation]) -> Vec<Citation> {
    attribute_citations(text, available).used
}
