//! Citations and attribution of inline citation markers
//!
//! Generated text cites sources inline as `[Title, p.N]`. Attribution resolves
//! every marker against the citations that retrieval actually supplied and
//! returns the ones the text uses, in first-occurrence order.

mod marker;
mod matcher;

use serde::{Deserialize, Serialize};

pub use marker::{extract_markers, CitationMarker};
pub use matcher::{
    attribute_citations, extract_used_citations, rank_candidates, CitationReport, MarkerResolution,
    MatchKind, Resolution,
};

/// A link between generated text and a retrieved source chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub document_id: String,
    /// Human-readable document name (usually the file name)
    pub document_title: String,
    /// 1-indexed page in the source document
    pub page_number: u32,
    /// Text of the chunk that was retrieved
    pub chunk_text: String,
    /// Id of the chunk in the vector index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_id: Option<String>,
    /// Relevance in [0, 1] derived from the search distance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
}

impl Citation {
    pub fn new(
        document_id: impl Into<String>,
        document_title: impl Into<String>,
        page_number: u32,
        chunk_text: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            document_title: document_title.into(),
            page_number,
            chunk_text: chunk_text.into(),
            chunk_id: None,
            relevance_score: None,
        }
    }

    pub fn with_relevance(mut self, score: f64) -> Self {
        self.relevance_score = Some(score);
        self
    }

    /// Identity used for de-duplication: a section lists each (title, page) once
    pub fn identity(&self) -> (&str, u32) {
        (self.document_title.as_str(), self.page_number)
    }

    /// Inline marker form, e.g. `[Annual Report 2023, p.12]`
    pub fn to_inline_format(&self) -> String {
        format!("[{}, p.{}]", self.document_title, self.page_number)
    }

    /// Document-only form, e.g. `[Annual Report 2023]`
    pub fn to_short_format(&self) -> String {
        format!("[{}]", self.document_title)
    }

    /// Chunk text truncated to `max_chars` characters, with an ellipsis when cut
    pub fn snippet(&self, max_chars: usize) -> String {
        match self.chunk_text.char_indices().nth(max_chars) {
            None => self.chunk_text.clone(),
            Some((cut, _)) => format!("{}...", &self.chunk_text[..cut]),
        }
    }
}

#[cfg(test)]
mod tests;
