//! Input loading shared by commands

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use draftkit_core::config::{EngineConfig, CONFIG_FILE_NAME};
use draftkit_core::error::{DraftError, Result};

use crate::cli::Cli;

/// Read a text input; `-` reads stdin
pub fn read_text(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .map_err(|e| DraftError::invalid_input(path.display(), format!("cannot read: {}", e)))
}

/// Read and deserialize a JSON input file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = read_text(path)?;
    serde_json::from_str(&content).map_err(|e| DraftError::invalid_input(path.display(), e))
}

/// Resolve the engine configuration.
///
/// An explicit `--config` must exist. Otherwise `draftkit.toml` in the current
/// directory is used when present, and defaults apply when it is not.
pub fn load_config(cli: &Cli) -> Result<EngineConfig> {
    if let Some(path) = &cli.config {
        debug!(path = %path.display(), "loading config");
        return EngineConfig::load(path);
    }

    let local = Path::new(CONFIG_FILE_NAME);
    if local.is_file() {
        debug!(path = %local.display(), "loading config");
        return EngineConfig::load(local);
    }
    Ok(EngineConfig::default())
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// File stem and file name of an input, used as document id and title
pub fn document_names(path: &Path) -> (String, String) {
    if path == Path::new("-") {
        return ("stdin".to_string(), "stdin".to_string());
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "stdin".to_string());
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| stem.clone());
    (stem, name)
}
