//! Error type for catalogue loading and validation.

/// Errors that can occur while loading an alert catalogue.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse/deserialization error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Document parsed but failed validation.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result alias for rule operations.
pub type Result<T> = std::result::Result<T, RuleError>;
