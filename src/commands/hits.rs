//! `draftkit hits` command - turn ranked search hits into citations

use std::path::Path;

use draftkit_core::config::EngineConfig;
use draftkit_core::error::Result;
use draftkit_core::retrieval::{citations_from_hits, SearchHit};

use super::helpers::{print_json, read_json};
use crate::cli::{Cli, OutputFormat};

/// Execute the hits command
pub fn execute(
    cli: &Cli,
    config: &EngineConfig,
    path: &Path,
    top_k: Option<usize>,
    min_score: Option<f64>,
) -> Result<()> {
    let mut retrieval = config.retrieval.clone();
    if let Some(k) = top_k {
        retrieval.top_k = k;
    }
    if let Some(score) = min_score {
        retrieval.min_relevance_score = score;
    }
    retrieval.validate()?;

    let hits: Vec<SearchHit> = read_json(path)?;
    let citations = citations_from_hits(&hits, &retrieval);

    match cli.format {
        OutputFormat::Json => print_json(&citations)?,
        OutputFormat::Human => {
            for citation in &citations {
                let score = citation.relevance_score.unwrap_or_default();
                println!("{:.3}  {}", score, citation.to_inline_format());
            }
            if !cli.quiet && citations.len() < hits.len() {
                eprintln!("kept {} of {} hits", citations.len(), hits.len());
            }
        }
    }
    Ok(())
}
