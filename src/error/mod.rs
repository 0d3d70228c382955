//! Error handling for the exporter.
//!
//! This module provides:
//! - A single crate-wide error enum with connection, configuration and output kinds
//! - Structured extraction of MongoDB driver errors for readable diagnostics
//!
//! # Example
//!
//! ```rust,no_run
//! use mongo_sample_export::error::ExportError;
//!
//! fn report(err: mongodb::error::Error) {
//!     // Driver errors render as an `{"error": {...}}` JSON object
//!     eprintln!("Error: {}", ExportError::from(err));
//! }
//! ```

pub mod kinds;
pub mod mongo;

pub use kinds::{ConfigError, ConnectionError, ExportError, OutputError, Result};
pub use mongo::ErrorInfo;
