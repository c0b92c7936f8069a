//! Token-bounded recursive text segmentation
//!
//! Text is split on the most structural separator present (paragraph break,
//! line break, sentence end, space) and the pieces are greedily packed into
//! chunks of at most `chunk_size` tokens. A piece that is too large on its own
//! is re-split with the next weaker separator; text with no separator at all
//! is cut into fixed token windows.

mod chunk;

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::config::ChunkingConfig;
use crate::error::Result;
use crate::tokens::{tokenizer_for, TokenCounter};
use crate::trace_time;

pub use chunk::{Chunk, PageText};

/// Separator tiers, most structural first. The tier after the last one is the
/// raw token-window split.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Splits page text into overlapping, token-bounded chunks
#[derive(Clone)]
pub struct TextSegmenter {
    chunk_size: usize,
    chunk_overlap: usize,
    tokenizer: Arc<dyn TokenCounter>,
}

impl std::fmt::Debug for TextSegmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextSegmenter")
            .field("chunk_size", &self.chunk_size)
            .field("chunk_overlap", &self.chunk_overlap)
            .finish_non_exhaustive()
    }
}

impl TextSegmenter {
    /// Create a segmenter with an explicit token counter.
    ///
    /// Fails when `chunk_overlap >= chunk_size`; such a configuration could
    /// never advance through the token stream.
    pub fn new(config: &ChunkingConfig, tokenizer: Arc<dyn TokenCounter>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
            tokenizer,
        })
    }

    /// Create a segmenter using the encoding named in the configuration
    pub fn from_config(config: &ChunkingConfig) -> Result<Self> {
        config.validate()?;
        let tokenizer = tokenizer_for(&config.encoding)?;
        Self::new(config, tokenizer)
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Count tokens with the segmenter's encoding
    pub fn count_tokens(&self, text: &str) -> usize {
        self.tokenizer.count(text)
    }

    /// Split text into trimmed, non-empty chunks.
    ///
    /// Empty or whitespace-only input yields no chunks.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        let start = Instant::now();
        let chunks = self.split_from_tier(text, 0);
        trace_time!(start, "split_text", chunks = chunks.len());
        chunks
    }

    /// Chunk every page of a document, numbering chunks across the whole document
    #[tracing::instrument(skip_all, fields(document_id = %document_id, pages = pages.len()))]
    pub fn chunk_document(
        &self,
        document_id: &str,
        document_title: &str,
        pages: &[PageText],
    ) -> Vec<Chunk> {
        let start = Instant::now();
        let mut chunks = Vec::new();

        for page in pages {
            for text in self.split_text(&page.text) {
                let token_count = self.count_tokens(&text);
                chunks.push(Chunk {
                    document_id: document_id.to_string(),
                    document_title: document_title.to_string(),
                    page_number: page.page_number,
                    chunk_index: chunks.len(),
                    text,
                    token_count,
                });
            }
        }

        if chunks.is_empty() {
            debug!(document_id, "document produced no chunks");
        } else {
            debug!(document_id, chunks = chunks.len(), "document chunked");
        }
        trace_time!(start, "chunk_document", document_id = document_id);
        chunks
    }

    /// Split using separator tiers starting at `tier`.
    ///
    /// Every recursive call goes to a strictly higher tier, so the depth is
    /// bounded by the number of tiers.
    fn split_from_tier(&self, text: &str, tier: usize) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        if self.count_tokens(text) <= self.chunk_size {
            return vec![text.to_string()];
        }

        for (offset, separator) in SEPARATORS.iter().enumerate().skip(tier) {
            if text.contains(separator) {
                return self.merge_segments(text.split_inclusive(separator), separator, offset);
            }
        }

        self.hard_split(text)
    }

    /// Greedily pack segments into chunks.
    ///
    /// Segments keep their trailing separator, so re-joining is plain
    /// concatenation and the separator's tokens count against the budget.
    fn merge_segments<'a>(
        &self,
        segments: impl Iterator<Item = &'a str>,
        separator: &str,
        tier: usize,
    ) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for segment in segments {
            if segment.trim().is_empty() {
                continue;
            }

            if self.count_tokens(segment) > self.chunk_size {
                push_chunk(&mut chunks, &current);
                current.clear();
                chunks.extend(self.split_from_tier(segment, tier + 1));
                continue;
            }

            if current.is_empty() {
                current.push_str(segment);
                continue;
            }

            let candidate = format!("{current}{segment}");
            if self.count_tokens(&candidate) <= self.chunk_size {
                current = candidate;
                continue;
            }

            push_chunk(&mut chunks, &current);
            current = match self.overlap_seed(&current, separator, segment) {
                Some(seed) => seed,
                None => segment.to_string(),
            };
        }

        push_chunk(&mut chunks, &current);
        chunks
    }

    /// Start of the next chunk: the trailing overlap tokens of the finished
    /// chunk, the separator, then `segment`.
    ///
    /// The overlap is cut from `previous` at a character boundary and shrinks
    /// to whatever fits beside `segment`; `None` when nothing fits.
    fn overlap_seed(&self, previous: &str, separator: &str, segment: &str) -> Option<String> {
        if self.chunk_overlap == 0 {
            return None;
        }

        // Re-insert the separator only where the source had it
        let (body, joiner) = match previous.strip_suffix(separator) {
            Some(body) => (body, separator),
            None => (previous, ""),
        };

        let used = self.count_tokens(joiner) + self.count_tokens(segment);
        let take = self.chunk_overlap.min(self.chunk_size.saturating_sub(used));
        if take == 0 {
            return None;
        }

        let offsets = self.token_offsets(body);
        let last = offsets.len() - 1;
        let from = (last.saturating_sub(take)..last).find(|&i| body.is_char_boundary(offsets[i]))?;
        let overlap = &body[offsets[from]..];
        if overlap.trim().is_empty() {
            return None;
        }

        let seeded = format!("{overlap}{joiner}{segment}");
        (self.count_tokens(&seeded) <= self.chunk_size).then_some(seeded)
    }

    /// Cut the token stream into `chunk_size` windows advancing by
    /// `chunk_size - chunk_overlap`.
    ///
    /// Windows only start and end where a token boundary is also a character
    /// boundary, so a character split across tokens stays whole in one
    /// window. Always terminates: every window starts past the previous one.
    fn hard_split(&self, text: &str) -> Vec<String> {
        let offsets = self.token_offsets(text);
        let total = offsets.len() - 1;
        let is_boundary = |i: usize| text.is_char_boundary(offsets[i]);
        let mut chunks = Vec::new();

        let mut start = 0;
        while start < total {
            let end = self.window_end(text, &offsets, start);
            push_chunk(&mut chunks, &text[offsets[start]..offsets[end]]);
            if end == total {
                break;
            }
            let back = end.saturating_sub(self.chunk_overlap);
            start = (start + 1..=back)
                .rev()
                .find(|&i| is_boundary(i))
                .unwrap_or(end);
        }

        debug!(
            tokens = total,
            windows = chunks.len(),
            "no separator left, split on token windows"
        );
        chunks
    }

    /// Furthest usable window end from `start`: a character boundary within
    /// `chunk_size` tokens whose text fits the budget. When a single
    /// character needs more tokens than the budget, the window ends after it.
    fn window_end(&self, text: &str, offsets: &[usize], start: usize) -> usize {
        let total = offsets.len() - 1;
        let limit = (start + self.chunk_size).min(total);
        let is_boundary = |i: usize| text.is_char_boundary(offsets[i]);

        (start + 1..=limit)
            .rev()
            .filter(|&i| is_boundary(i))
            .find(|&i| self.count_tokens(&text[offsets[start]..offsets[i]]) <= self.chunk_size)
            .or_else(|| (start + 1..=total).find(|&i| is_boundary(i)))
            .unwrap_or(total)
    }

    /// Byte offset of every token start in `text`, plus `text.len()` last
    fn token_offsets(&self, text: &str) -> Vec<usize> {
        let tokens = self.tokenizer.encode(text);
        let mut offsets = Vec::with_capacity(tokens.len() + 1);
        let mut position = 0;
        for &token in &tokens {
            offsets.push(position);
            position += self.tokenizer.token_bytes(token).len();
        }
        offsets.push(text.len());
        offsets
    }
}

fn push_chunk(chunks: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        chunks.push(text.to_string());
    }
}
