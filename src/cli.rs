//! CLI argument parsing for draftkit
//!
//! Global flags: --config, --format, --quiet, --verbose, --log-level, --log-json

pub mod parse;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use draftkit_core::format::OutputFormat;
use parse::parse_output_format;

/// Draftkit - chunking, citation attribution and paragraph locking
#[derive(Parser, Debug)]
#[command(name = "draftkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Engine configuration file (defaults to ./draftkit.toml when present)
    #[arg(long, global = true, env = "DRAFTKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (human or json)
    #[arg(long, global = true, default_value = "human", value_parser = parse_output_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (overrides --verbose)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a document into token-bounded chunks
    ///
    /// Pages in the input are separated by form feeds.
    Chunk {
        /// Text file, or `-` for stdin
        file: PathBuf,

        /// Document id stored with each chunk (defaults to the file stem)
        #[arg(long)]
        document_id: Option<String>,

        /// Document title stored with each chunk (defaults to the file name)
        #[arg(long)]
        title: Option<String>,

        /// Maximum tokens per chunk
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Tokens shared between consecutive chunks
        #[arg(long)]
        overlap: Option<usize>,
    },

    /// Attribute inline [Title, p.N] markers to retrieved citations
    Cite {
        /// Generated text file, or `-` for stdin
        text: PathBuf,

        /// JSON file holding the retrieved citations
        #[arg(long)]
        citations: PathBuf,
    },

    /// Convert vector-search hits into citations
    Hits {
        /// JSON file holding the ranked hits
        file: PathBuf,

        /// Maximum citations to keep
        #[arg(long)]
        top_k: Option<usize>,

        /// Minimum relevance score in [0, 1]
        #[arg(long)]
        min_score: Option<f64>,
    },

    /// Lock paragraphs of a text by index
    Lock {
        /// Section text file, or `-` for stdin
        text: PathBuf,

        /// Paragraph indices to lock (0-based)
        #[arg(long = "index", short = 'i', required = true, num_args = 1..)]
        indices: Vec<usize>,

        /// JSON file with existing locks to update
        #[arg(long)]
        locks: Option<PathBuf>,
    },

    /// Merge regenerated text with locked paragraphs
    Merge {
        /// Regenerated text file, or `-` for stdin
        new_text: PathBuf,

        /// JSON file with the locked paragraphs
        #[arg(long)]
        locks: PathBuf,
    },

    /// Count words and paragraphs, optionally against a word limit
    Words {
        /// Text file, or `-` for stdin
        file: PathBuf,

        /// Word limit for the section
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_lock_indices() {
        let cli =
            Cli::try_parse_from(["draftkit", "lock", "s.txt", "--index", "0", "2"]).unwrap();
        match cli.command {
            Commands::Lock { indices, locks, .. } => {
                assert_eq!(indices, vec![0, 2]);
                assert!(locks.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_format_flag_is_global() {
        let cli = Cli::try_parse_from(["draftkit", "words", "a.txt", "--format", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["draftkit", "--format", "xml", "words", "a.txt"]).is_err());
    }
}
