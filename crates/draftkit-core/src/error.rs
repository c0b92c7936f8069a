//! Error types and exit codes for draftkit
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid configuration)
//! - 3: Data error (unreadable or malformed input)

mod macros;

use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args or configuration (2)
    Usage = 2,
    /// Data error - malformed input files (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during draftkit operations
#[derive(Error, Debug)]
pub enum DraftError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid configuration: {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("unsupported {context}: {value} (supported: {supported})")]
    Unsupported {
        context: String,
        value: String,
        supported: String,
    },

    // Data errors (exit code 3)
    #[error("invalid input in {path}: {reason}")]
    InvalidInput { path: String, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to load tokenizer: {0}")]
    Tokenizer(String),

    #[error("{0}")]
    Other(String),
}

impl DraftError {
    /// Create an error for an invalid configuration field
    pub fn invalid_config(field: &str, reason: impl std::fmt::Display) -> Self {
        DraftError::InvalidConfig {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an error for an unsupported value
    pub fn unsupported(
        context: &str,
        value: impl std::fmt::Display,
        supported: impl std::fmt::Display,
    ) -> Self {
        DraftError::Unsupported {
            context: context.to_string(),
            value: value.to_string(),
            supported: supported.to_string(),
        }
    }

    /// Create an error for an input file that could not be interpreted
    pub fn invalid_input(path: impl std::fmt::Display, reason: impl std::fmt::Display) -> Self {
        DraftError::InvalidInput {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            DraftError::UnknownFormat(_)
            | DraftError::UsageError(_)
            | DraftError::InvalidConfig { .. }
            | DraftError::Unsupported { .. } => ExitCode::Usage,

            DraftError::InvalidInput { .. } | DraftError::Json(_) | DraftError::Toml(_) => {
                ExitCode::Data
            }

            DraftError::Io(_) | DraftError::Tokenizer(_) | DraftError::Other(_) => {
                ExitCode::Failure
            }
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            DraftError::UnknownFormat(_) => "unknown_format",
            DraftError::UsageError(_) => "usage_error",
            DraftError::InvalidConfig { .. } => "invalid_config",
            DraftError::Unsupported { .. } => "unsupported",
            DraftError::InvalidInput { .. } => "invalid_input",
            DraftError::Io(_) => "io_error",
            DraftError::Json(_) => "json_error",
            DraftError::Toml(_) => "toml_error",
            DraftError::Tokenizer(_) => "tokenizer_error",
            DraftError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for draftkit operations
pub type Result<T> = std::result::Result<T, DraftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_is_usage_error() {
        let err = DraftError::invalid_config("chunking.chunk_overlap", "must be less than 10");
        assert_eq!(err.exit_code(), ExitCode::Usage);
        assert_eq!(
            err.to_string(),
            "invalid configuration: chunking.chunk_overlap: must be less than 10"
        );
    }

    #[test]
    fn test_json_error_envelope() {
        let err = DraftError::invalid_input("locks.json", "expected an array");
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "invalid_input");
        assert_eq!(
            json["error"]["message"],
            "invalid input in locks.json: expected an array"
        );
    }

    #[test]
    fn test_unsupported_encoding_is_usage_error() {
        let err = DraftError::unsupported("encoding", "p50k_base", "cl100k_base");
        assert_eq!(err.exit_code(), ExitCode::Usage);
        assert_eq!(err.to_json()["error"]["type"], "unsupported");
        assert_eq!(
            err.to_string(),
            "unsupported encoding: p50k_base (supported: cl100k_base)"
        );
    }

    #[test]
    fn test_io_error_is_generic_failure() {
        let err: DraftError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.exit_code(), ExitCode::Failure);
        assert_eq!(i32::from(err.exit_code()), 1);
    }
}
