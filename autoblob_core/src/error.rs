use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoblobError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Specified config file: {} does not exist", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid include path {path:?}: {reason}")]
    InvalidIncludePath { path: String, reason: String },

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, AutoblobError>;

impl AutoblobError {
    pub fn config(message: impl Into<String>) -> Self {
        AutoblobError::Config(message.into())
    }

    pub fn invalid_include_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        AutoblobError::InvalidIncludePath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        AutoblobError::Usage(message.into())
    }

    /// Whether this error comes from a malformed invocation rather than
    /// from loading or writing files.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            AutoblobError::Usage(_) | AutoblobError::ConfigNotFound { .. }
        )
    }
}
