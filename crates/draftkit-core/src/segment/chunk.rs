//! Chunk and page types

use serde::{Deserialize, Serialize};

use crate::retrieval::HitMetadata;

/// Raw text of one page as yielded by the document parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// 1-indexed page number
    pub page_number: u32,
    pub text: String,
}

impl PageText {
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }

    /// Split parser output on form feeds, numbering pages from 1
    pub fn from_form_feeds(text: &str) -> Vec<PageText> {
        text.split('\u{c}')
            .enumerate()
            .map(|(i, page)| PageText::new(i as u32 + 1, page))
            .collect()
    }
}

/// A token-bounded unit of source text with its provenance.
///
/// Produced once per document at index time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub document_id: String,
    pub document_title: String,
    /// 1-indexed page the chunk came from
    pub page_number: u32,
    /// Position of the chunk within the whole document (diagnostic only)
    pub chunk_index: usize,
    pub text: String,
    pub token_count: usize,
}

impl Chunk {
    /// Metadata stored alongside the chunk in the vector index
    pub fn metadata(&self) -> HitMetadata {
        HitMetadata {
            document_id: self.document_id.clone(),
            document_title: self.document_title.clone(),
            page_number: self.page_number,
            chunk_index: Some(self.chunk_index),
        }
    }
}
