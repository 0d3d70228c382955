//! MongoDB sample exporter
//!
//! Reads the first documents of every collection in a MongoDB database and
//! writes them to a single `<database>.json` file as Extended JSON.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Export and logging settings
//! - `connection`: MongoDB connection management
//! - `error`: Error types and handling
//! - `export`: The export routine, collection sources and the file writer
//! - `formatter`: Extended JSON conversion and indented output
//!
//! # Example
//!
//! ```no_run
//! use mongo_sample_export::{ConnectionManager, ExportRequest, Exporter, MongoSource};
//! use mongo_sample_export::config::ExportConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request = ExportRequest::new("sample_airbnb", ExportConfig::default());
//!     let mut manager = ConnectionManager::new(request.config.clone());
//!     manager.connect(&request.database).await?;
//!
//!     let source = MongoSource::new(manager.get_database(&request.database)?);
//!     let summary = Exporter::new(source, true).run(&request).await?;
//!     println!("Wrote {}", summary.output_path.display());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod export;
pub mod formatter;

// Re-export commonly used types
pub use config::Config;
pub use connection::ConnectionManager;
pub use error::{ExportError, Result};
pub use export::{ExportRequest, ExportResult, ExportSummary, Exporter, MongoSource};
