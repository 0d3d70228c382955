//! Configuration for the exporter
//!
//! All settings live in memory: defaults come from the `default_*` functions
//! below and command-line arguments override them. There is no config file.

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Number of documents read from each collection.
pub const SAMPLE_LIMIT: i64 = 10;

/// Indentation width of the output file.
pub const OUTPUT_INDENT: usize = 2;

/// Main configuration structure
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Export configuration
    pub export: ExportConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Export-related configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// MongoDB connection URI
    pub uri: String,

    /// Directory the `<database>.json` file is written into
    ///
    /// Empty means the current directory, so the file is named bare.
    pub output_dir: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: LogLevel,
}

/// Log level options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_uri() -> String {
    "mongodb://localhost:27017/".to_string()
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            output_dir: PathBuf::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.export.validate()
    }
}

impl ExportConfig {
    /// Reject values the exporter cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.uri.trim().is_empty() {
            return Err(ConfigError::MissingField("uri".to_string()).into());
        }

        Ok(())
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}
