//! Sub-word token counting
//!
//! Chunk budgets are expressed in the tokens the downstream language model
//! consumes, not characters or whitespace words. The counter is a trait so the
//! segmenter can be driven by any encoding (and by simple encodings in tests).

use std::sync::{Arc, OnceLock};

use tiktoken_rs::CoreBPE;

use crate::bail_unsupported;
use crate::config::CL100K_BASE;
use crate::error::{DraftError, Result};

/// Encodes text to token ids and back
pub trait TokenCounter: Send + Sync {
    /// Encode text into token ids
    fn encode(&self, text: &str) -> Vec<u32>;

    /// Raw bytes of one token. `token` must come from [`TokenCounter::encode`].
    ///
    /// A token may hold only part of a multi-byte character.
    fn token_bytes(&self, token: u32) -> Vec<u8>;

    /// Decode token ids back to text.
    ///
    /// A window that starts or ends inside a multi-byte character loses only
    /// that partial character; everything between the edges is kept.
    fn decode(&self, tokens: &[u32]) -> String {
        let bytes: Vec<u8> = tokens
            .iter()
            .flat_map(|&token| self.token_bytes(token))
            .collect();
        utf8_window(&bytes)
    }

    /// Number of tokens in `text`
    fn count(&self, text: &str) -> usize {
        self.encode(text).len()
    }
}

/// Longest UTF-8 text in `bytes` after cutting a partial character at each edge
pub(crate) fn utf8_window(bytes: &[u8]) -> String {
    // At most three continuation bytes can precede the next character start
    let lead = bytes
        .iter()
        .take(3)
        .take_while(|&&b| b & 0xC0 == 0x80)
        .count();
    let bytes = &bytes[lead..];

    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        // Incomplete sequence at the end: keep everything before it
        Err(e) if e.error_len().is_none() => {
            String::from_utf8_lossy(&bytes[..e.valid_up_to()]).into_owned()
        }
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// The `cl100k_base` BPE encoding used by GPT-4 class models
#[derive(Clone, Copy)]
pub struct Cl100kTokenizer {
    bpe: &'static CoreBPE,
}

impl Cl100kTokenizer {
    /// Load the encoding; the BPE tables are built once per process
    pub fn new() -> Result<Self> {
        Ok(Self {
            bpe: cl100k_bpe()?,
        })
    }
}

impl std::fmt::Debug for Cl100kTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cl100kTokenizer").finish_non_exhaustive()
    }
}

impl TokenCounter for Cl100kTokenizer {
    fn encode(&self, text: &str) -> Vec<u32> {
        self.bpe
            .encode_ordinary(text)
            .into_iter()
            .map(|token| token as u32)
            .collect()
    }

    fn token_bytes(&self, token: u32) -> Vec<u8> {
        self.bpe
            ._decode_native_and_split(vec![token as _])
            .flatten()
            .collect()
    }

    fn decode(&self, tokens: &[u32]) -> String {
        let ranks = tokens.iter().map(|&token| token as _).collect();
        match self.bpe.decode(ranks) {
            Ok(text) => text,
            Err(_) => {
                let bytes: Vec<u8> = self
                    .bpe
                    ._decode_native_and_split(tokens.iter().map(|&token| token as _).collect())
                    .flatten()
                    .collect();
                utf8_window(&bytes)
            }
        }
    }
}

fn cl100k_bpe() -> Result<&'static CoreBPE> {
    static BPE: OnceLock<std::result::Result<CoreBPE, String>> = OnceLock::new();
    let bpe = BPE.get_or_init(|| tiktoken_rs::cl100k_base().map_err(|e| e.to_string()));

    match bpe {
        Ok(bpe) => Ok(bpe),
        Err(e) => Err(DraftError::Tokenizer(e.clone())),
    }
}

/// Resolve a configured encoding name to a shared token counter
pub fn tokenizer_for(encoding: &str) -> Result<Arc<dyn TokenCounter>> {
    match encoding {
        CL100K_BASE => Ok(Arc::new(Cl100kTokenizer::new()?)),
        other => bail_unsupported!("encoding", other, CL100K_BASE),
    }
}

/// One token per Unicode scalar value. Token arithmetic in tests stays obvious.
#[cfg(test)]
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct CharTokenizer;

#[cfg(test)]
impl TokenCounter for CharTokenizer {
    fn encode(&self, text: &str) -> Vec<u32> {
        text.chars().map(|c| c as u32).collect()
    }

    fn token_bytes(&self, token: u32) -> Vec<u8> {
        char::from_u32(token)
            .map(|c| c.to_string().into_bytes())
            .unwrap_or_default()
    }
}
