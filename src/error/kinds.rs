use std::path::PathBuf;
use std::{fmt, io};

use crate::error::mongo::format_mongodb_error;

/// Crate-wide `Result` type using [`ExportError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Top-level error type for export operations.
#[derive(Debug)]
pub enum ExportError {
    /// Connection-related errors.
    Connection(ConnectionError),

    /// Configuration errors.
    Config(ConfigError),

    /// Output file errors.
    Output(OutputError),

    /// MongoDB driver errors.
    MongoDb(mongodb::error::Error),

    /// JSON serialization errors.
    Serialization(serde_json::Error),
}

/// Connection-specific errors.
#[derive(Debug)]
pub enum ConnectionError {
    /// Invalid connection URI.
    InvalidUri(String),

    /// Not currently connected to MongoDB.
    NotConnected,

    /// Ping command failed.
    PingFailed(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Missing required field.
    MissingField(String),
}

/// Errors raised while producing the output file.
#[derive(Debug)]
pub enum OutputError {
    /// Parent directory of the output file does not exist.
    DirectoryNotFound(PathBuf),

    /// Creating or truncating the output file failed.
    Create { path: PathBuf, source: io::Error },

    /// Writing or flushing the output file failed.
    Write { path: PathBuf, source: io::Error },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Connection(e) => write!(f, "Connection error: {e}"),
            ExportError::Config(e) => write!(f, "Configuration error: {e}"),
            ExportError::Output(e) => write!(f, "Output error: {e}"),
            ExportError::MongoDb(e) => format_mongodb_error(f, e),
            ExportError::Serialization(e) => write!(f, "Serialization error: {e}"),
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::InvalidUri(uri) => write!(f, "Invalid connection URI: {uri}"),
            ConnectionError::NotConnected => write!(f, "Not connected to MongoDB"),
            ConnectionError::PingFailed(msg) => write!(f, "Ping failed: {msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingField(field) => write!(f, "Missing required field: {field}"),
        }
    }
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::DirectoryNotFound(dir) => {
                write!(f, "Directory does not exist: {}", dir.display())
            }
            OutputError::Create { path, source } => {
                write!(f, "Failed to create {}: {source}", path.display())
            }
            OutputError::Write { path, source } => {
                write!(f, "Failed to write {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::MongoDb(e) => Some(e),
            ExportError::Serialization(e) => Some(e),
            ExportError::Output(e) => e.source(),
            _ => None,
        }
    }
}

impl std::error::Error for ConnectionError {}
impl std::error::Error for ConfigError {}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Create { source, .. } | OutputError::Write { source, .. } => Some(source),
            OutputError::DirectoryNotFound(_) => None,
        }
    }
}

/* ========================= Conversions to ExportError ========================= */

impl From<mongodb::error::Error> for ExportError {
    fn from(err: mongodb::error::Error) -> Self {
        ExportError::MongoDb(err)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialization(err)
    }
}

impl From<ConnectionError> for ExportError {
    fn from(err: ConnectionError) -> Self {
        ExportError::Connection(err)
    }
}

impl From<ConfigError> for ExportError {
    fn from(err: ConfigError) -> Self {
        ExportError::Config(err)
    }
}

impl From<OutputError> for ExportError {
    fn from(err: OutputError) -> Self {
        ExportError::Output(err)
    }
}
