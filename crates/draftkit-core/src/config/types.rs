//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Name of the only sub-word encoding currently supported
pub const CL100K_BASE: &str = "cl100k_base";

/// Engine configuration, passed explicitly to each component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Chunking parameters for the text segmenter
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Relevance filtering applied to vector-search hits
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Section word-limit and display settings
    #[serde(default)]
    pub sections: SectionConfig,
}

/// Token budget for chunks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum tokens per chunk (default 600)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Tokens repeated at the head of the following chunk (default 90)
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Sub-word encoding used for counting (default "cl100k_base")
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

/// Filtering of ranked search hits before they become citations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Maximum number of citations kept per query (default 5)
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Minimum relevance score in [0, 1] (default 0.25)
    #[serde(default = "default_min_relevance_score")]
    pub min_relevance_score: f64,
}

/// Section presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    /// Percentage below the word limit at which a warning is raised (default 10.0)
    #[serde(default = "default_word_limit_warning_percent")]
    pub word_limit_warning_percent: f64,

    /// Characters shown for citation snippets (default 150)
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            encoding: default_encoding(),
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            min_relevance_score: default_min_relevance_score(),
        }
    }
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            word_limit_warning_percent: default_word_limit_warning_percent(),
            snippet_chars: default_snippet_chars(),
        }
    }
}

fn default_chunk_size() -> usize {
    600
}

fn default_chunk_overlap() -> usize {
    90
}

fn default_encoding() -> String {
    CL100K_BASE.to_string()
}

fn default_top_k() -> usize {
    5
}

fn default_min_relevance_score() -> f64 {
    0.25
}

fn default_word_limit_warning_percent() -> f64 {
    10.0
}

fn default_snippet_chars() -> usize {
    150
}
