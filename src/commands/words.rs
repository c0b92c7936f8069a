//! `draftkit words` command - word count and word-limit status

use std::path::Path;

use chrono::Utc;

use draftkit_core::config::EngineConfig;
use draftkit_core::error::Result;
use draftkit_core::section::Section;

use super::helpers::{document_names, print_json, read_text};
use crate::cli::{Cli, OutputFormat};

/// Execute the words command
pub fn execute(cli: &Cli, config: &EngineConfig, path: &Path, limit: Option<usize>) -> Result<()> {
    let text = read_text(path)?;
    let (_, name) = document_names(path);
    let section = Section::generated(name, text, Vec::new(), Utc::now());

    let warning_percent = config.sections.word_limit_warning_percent;
    let status = section.limit_status(limit, warning_percent);
    let warning = section.limit_warning(limit, warning_percent);

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "word_count": section.word_count,
                "paragraphs": section.paragraphs().len(),
                "limit": limit,
                "status": status,
                "warning": warning,
            });
            print_json(&output)?;
        }
        OutputFormat::Human => {
            match limit {
                Some(limit) => println!("{} / {} words ({})", section.word_count, limit, status),
                None => println!("{} words", section.word_count),
            }
            if !cli.quiet {
                println!("{} paragraphs", section.paragraphs().len());
                if let Some(warning) = warning {
                    eprintln!("warning: {}", warning);
                }
            }
        }
    }
    Ok(())
}
