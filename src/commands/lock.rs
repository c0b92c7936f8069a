//! `draftkit lock` command - freeze paragraphs by index

use std::path::Path;

use chrono::Utc;

use draftkit_core::error::Result;
use draftkit_core::paragraph::{lock_paragraphs, split_paragraphs, LockedParagraph};

use super::helpers::{print_json, read_json, read_text};
use crate::cli::{Cli, OutputFormat};

/// Execute the lock command
pub fn execute(
    cli: &Cli,
    text_path: &Path,
    indices: &[usize],
    locks_path: Option<&Path>,
) -> Result<()> {
    let text = read_text(text_path)?;
    let existing: Vec<LockedParagraph> = match locks_path {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let paragraphs = split_paragraphs(&text);
    let outcome = lock_paragraphs(&paragraphs, indices, &existing, Utc::now());

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "locked": outcome.locked,
                "rejected": outcome.rejected,
                "paragraphs": paragraphs.len(),
            });
            print_json(&output)?;
        }
        OutputFormat::Human => {
            for lock in &outcome.locked {
                println!("[{}] {}", lock.index, lock.text);
            }
            if !outcome.rejected.is_empty() && !cli.quiet {
                let rejected: Vec<String> =
                    outcome.rejected.iter().map(|i| i.to_string()).collect();
                eprintln!(
                    "warning: ignored invalid paragraph indices {} (text has {} paragraphs)",
                    rejected.join(", "),
                    paragraphs.len()
                );
            }
        }
    }
    Ok(())
}
