//! `draftkit merge` command - reinsert locked paragraphs into regenerated text

use std::path::Path;

use draftkit_core::error::Result;
use draftkit_core::paragraph::{count_words, merge_with_locks, split_paragraphs, LockedParagraph};

use super::helpers::{print_json, read_json, read_text};
use crate::cli::{Cli, OutputFormat};

/// Execute the merge command
pub fn execute(cli: &Cli, new_text_path: &Path, locks_path: &Path) -> Result<()> {
    let new_text = read_text(new_text_path)?;
    let locks: Vec<LockedParagraph> = read_json(locks_path)?;

    let merged = merge_with_locks(&new_text, locks.iter().map(LockedParagraph::as_pair));

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "text": merged,
                "paragraphs": split_paragraphs(&merged).len(),
                "word_count": count_words(&merged),
                "locks_applied": locks.len(),
            });
            print_json(&output)?;
        }
        OutputFormat::Human => println!("{}", merged),
    }
    Ok(())
}
