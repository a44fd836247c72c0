use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Missing or invalid settings
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Database could not be opened or queried
    #[error("Database error: {0}")]
    Database(String),

    /// The import stopped part-way
    #[error("Import failed: {0}")]
    Import(String),

    /// Logger setup failed
    #[error("Logging error: {0}")]
    Logging(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn import(msg: impl Into<String>) -> Self {
        Self::Import(msg.into())
    }

    pub(crate) fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }
}
