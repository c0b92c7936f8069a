//! `draftkit chunk` command - split a document into token-bounded chunks
//!
//! Input pages are separated by form feeds, as emitted by `pdftotext`.

use std::path::Path;

use draftkit_core::bail_usage;
use draftkit_core::config::EngineConfig;
use draftkit_core::error::Result;
use draftkit_core::segment::{PageText, TextSegmenter};

use super::helpers::{document_names, print_json, read_text};
use crate::cli::{Cli, OutputFormat};

/// Arguments for the chunk command
pub struct ChunkOptions<'a> {
    pub file: &'a Path,
    pub document_id: Option<&'a str>,
    pub title: Option<&'a str>,
    pub chunk_size: Option<usize>,
    pub overlap: Option<usize>,
}

/// Execute the chunk command
pub fn execute(cli: &Cli, config: &EngineConfig, opts: ChunkOptions<'_>) -> Result<()> {
    let mut chunking = config.chunking.clone();
    if let Some(size) = opts.chunk_size {
        chunking.chunk_size = size;
    }
    if let Some(overlap) = opts.overlap {
        chunking.chunk_overlap = overlap;
    }
    let segmenter = TextSegmenter::from_config(&chunking)?;

    let (stem, name) = document_names(opts.file);
    let document_id = opts.document_id.unwrap_or(&stem);
    let title = opts.title.unwrap_or(&name);
    if document_id.trim().is_empty() {
        bail_usage!("--document-id must not be empty");
    }

    let text = read_text(opts.file)?;
    let pages = PageText::from_form_feeds(&text);
    let chunks = segmenter.chunk_document(document_id, title, &pages);

    match cli.format {
        OutputFormat::Json => print_json(&chunks)?,
        OutputFormat::Human => {
            for chunk in &chunks {
                println!(
                    "--- chunk {} (p.{}, {} tokens)",
                    chunk.chunk_index, chunk.page_number, chunk.token_count
                );
                println!("{}", chunk.text);
            }
            if !cli.quiet {
                eprintln!(
                    "{} chunks from {} pages of {}",
                    chunks.len(),
                    pages.len(),
                    title
                );
            }
        }
    }
    Ok(())
}
