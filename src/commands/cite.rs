//! `draftkit cite` command - attribute inline markers to retrieved citations

use std::path::Path;

use draftkit_core::citation::{attribute_citations, Citation};
use draftkit_core::config::EngineConfig;
use draftkit_core::error::Result;

use super::helpers::{print_json, read_json, read_text};
use crate::cli::{Cli, OutputFormat};

/// Execute the cite command
pub fn execute(
    cli: &Cli,
    config: &EngineConfig,
    text_path: &Path,
    citations_path: &Path,
) -> Result<()> {
    let text = read_text(text_path)?;
    let available: Vec<Citation> = read_json(citations_path)?;
    let report = attribute_citations(&text, &available);

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "unresolved": report.unresolved().count(),
                "fallbacks": report.fallback_count(),
                "used": report.used,
                "markers": report.markers,
            });
            print_json(&output)?;
        }
        OutputFormat::Human => {
            for citation in &report.used {
                println!("{}", citation.to_inline_format());
                if !cli.quiet {
                    println!("  {}", citation.snippet(config.sections.snippet_chars));
                }
            }
            if !cli.quiet {
                for marker in report.unresolved() {
                    eprintln!("warning: no retrieved source for {}", marker.raw);
                }
            }
        }
    }
    Ok(())
}
