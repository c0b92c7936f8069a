//! Engine configuration for draftkit
//!
//! Configuration is read from a TOML file (conventionally `draftkit.toml`).
//! Every field has a default, so an empty file is a valid configuration.

pub mod types;

use std::fs;
use std::path::Path;

use crate::bail_config;
use crate::error::{DraftError, Result};

pub use types::{ChunkingConfig, EngineConfig, RetrievalConfig, SectionConfig, CL100K_BASE};

/// Conventional configuration file name
pub const CONFIG_FILE_NAME: &str = "draftkit.toml";

impl ChunkingConfig {
    /// Check the forward-progress guard: `0 <= overlap < chunk_size`
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            bail_config!("chunking.chunk_size", "must be greater than 0");
        }
        if self.chunk_overlap >= self.chunk_size {
            bail_config!(
                "chunking.chunk_overlap",
                format!(
                    "{} must be less than chunk_size ({})",
                    self.chunk_overlap, self.chunk_size
                )
            );
        }
        Ok(())
    }
}

impl RetrievalConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_relevance_score) {
            bail_config!(
                "retrieval.min_relevance_score",
                format!("{} is outside [0, 1]", self.min_relevance_score)
            );
        }
        Ok(())
    }
}

impl SectionConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.word_limit_warning_percent) {
            bail_config!(
                "sections.word_limit_warning_percent",
                format!("{} is outside [0, 100]", self.word_limit_warning_percent)
            );
        }
        Ok(())
    }
}

impl EngineConfig {
    /// Validate every section of the configuration
    pub fn validate(&self) -> Result<()> {
        self.chunking.validate()?;
        self.retrieval.validate()?;
        self.sections.validate()
    }

    /// Load and validate configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DraftError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}
