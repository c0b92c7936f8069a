//! Command dispatch logic for draftkit

use std::time::Instant;

use tracing::debug;

use draftkit_core::error::Result;

use crate::cli::{Cli, Commands};
use crate::commands;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config = commands::helpers::load_config(cli)?;
    debug!(elapsed = ?start.elapsed(), "load_config");

    let result = match &cli.command {
        Commands::Chunk {
            file,
            document_id,
            title,
            chunk_size,
            overlap,
        } => commands::chunk::execute(
            cli,
            &config,
            commands::chunk::ChunkOptions {
                file,
                document_id: document_id.as_deref(),
                title: title.as_deref(),
                chunk_size: *chunk_size,
                overlap: *overlap,
            },
        ),

        Commands::Cite { text, citations } => {
            commands::cite::execute(cli, &config, text, citations)
        }

        Commands::Hits {
            file,
            top_k,
            min_score,
        } => commands::hits::execute(cli, &config, file, *top_k, *min_score),

        Commands::Lock {
            text,
            indices,
            locks,
        } => commands::lock::execute(cli, text, indices, locks.as_deref()),

        Commands::Merge { new_text, locks } => commands::merge::execute(cli, new_text, locks),

        Commands::Words { file, limit } => commands::words::execute(cli, &config, file, *limit),
    };

    debug!(elapsed = ?start.elapsed(), "execute_command");
    result
}
