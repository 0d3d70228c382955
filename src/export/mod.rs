//! Sample export of a MongoDB database
//!
//! The routine is a single forward pass:
//!
//! 1. List the collections of the database
//! 2. Read up to [`SAMPLE_LIMIT`] documents from each, in natural order
//! 3. Serialize the collection-to-documents mapping as indented Extended JSON
//! 4. Write it to `<database>.json`, replacing any previous file
//!
//! The output file is only opened once every read has succeeded, so a
//! connection or query failure leaves the filesystem untouched.
//!
//! # Example
//!
//! ```no_run
//! use mongo_sample_export::config::ExportConfig;
//! use mongo_sample_export::connection::ConnectionManager;
//! use mongo_sample_export::export::{ExportRequest, Exporter, MongoSource};
//!
//! # async fn run() -> mongo_sample_export::Result<()> {
//! let request = ExportRequest::new("sample_airbnb", ExportConfig::default());
//! let mut manager = ConnectionManager::new(request.config.clone());
//! manager.connect(&request.database).await?;
//!
//! let source = MongoSource::new(manager.get_database(&request.database)?);
//! let summary = Exporter::new(source, true).run(&request).await?;
//! println!("{} documents", summary.documents_exported);
//! # Ok(())
//! # }
//! ```

pub mod progress;
pub mod source;
pub mod writer;

pub use progress::ProgressReporter;
pub use source::{CollectionSource, MongoSource};
pub use writer::JsonFileWriter;

use std::path::PathBuf;
use std::time::Instant;

use mongodb::bson::Document;
use tracing::{debug, info, warn};

use crate::config::{ExportConfig, SAMPLE_LIMIT};
use crate::error::Result;
use crate::formatter::JsonFormatter;

/// What to export and how
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Database to sample
    pub database: String,
    /// Connection and output settings
    pub config: ExportConfig,
}

impl ExportRequest {
    pub fn new(database: impl Into<String>, config: ExportConfig) -> Self {
        Self {
            database: database.into(),
            config,
        }
    }

    /// `<output_dir>/<database>.json`
    ///
    /// The database name is used verbatim; names containing path separators
    /// resolve to nested paths.
    pub fn output_path(&self) -> PathBuf {
        self.config.output_dir.join(output_file_name(&self.database))
    }
}

/// File name the export of `database` is written to
pub fn output_file_name(database: &str) -> String {
    format!("{}.json", database)
}

/// Documents sampled from one collection
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSample {
    pub name: String,
    pub documents: Vec<Document>,
}

impl CollectionSample {
    pub fn new(name: impl Into<String>, documents: Vec<Document>) -> Self {
        Self {
            name: name.into(),
            documents,
        }
    }
}

/// Collection-to-documents mapping, in enumeration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportResult {
    collections: Vec<CollectionSample>,
}

impl ExportResult {
    pub fn push(&mut self, sample: CollectionSample) {
        self.collections.push(sample);
    }

    pub fn collections(&self) -> &[CollectionSample] {
        &self.collections
    }

    #[cfg(test)]
    fn get(&self, name: &str) -> Option<&[Document]> {
        self.collections
            .iter()
            .find(|sample| sample.name == name)
            .map(|sample| sample.documents.as_slice())
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn document_count(&self) -> usize {
        self.collections.iter().map(|s| s.documents.len()).sum()
    }
}

/// Statistics of a finished export
#[derive(Debug)]
pub struct ExportSummary {
    /// Number of collections exported
    pub collections_exported: usize,
    /// Number of documents exported
    pub documents_exported: usize,
    /// File size in bytes
    pub file_size_bytes: u64,
    /// Time taken for export
    pub elapsed_ms: u64,
    /// Path of the written file
    pub output_path: PathBuf,
}

/// Runs the export against a [`CollectionSource`]
pub struct Exporter<S: CollectionSource> {
    source: S,
    formatter: JsonFormatter,
    progress: ProgressReporter,
}

impl<S: CollectionSource> Exporter<S> {
    /// Create a new exporter
    ///
    /// # Arguments
    /// * `source` - Where collections and documents are read from
    /// * `show_progress` - Print per-collection progress lines
    pub fn new(source: S, show_progress: bool) -> Self {
        Self {
            source,
            formatter: JsonFormatter::default(),
            progress: ProgressReporter::new(show_progress),
        }
    }

    /// Read the sample of every collection
    pub async fn collect(&self) -> Result<ExportResult> {
        let names = self.source.list_collection_names().await?;
        info!(
            "Sampling {} collections from '{}'",
            names.len(),
            self.source.database_name()
        );

        let mut result = ExportResult::default();
        for name in names {
            self.progress.collection_started(&name, SAMPLE_LIMIT);

            let mut documents = self.source.sample(&name, SAMPLE_LIMIT).await?;
            if documents.len() > SAMPLE_LIMIT as usize {
                warn!(
                    "Source returned {} documents for '{}', keeping {}",
                    documents.len(),
                    name,
                    SAMPLE_LIMIT
                );
                documents.truncate(SAMPLE_LIMIT as usize);
            }

            debug!("Collected {} documents from '{}'", documents.len(), name);
            result.push(CollectionSample::new(name, documents));
        }

        Ok(result)
    }

    /// Collect, serialize and write the export
    pub async fn run(&self, request: &ExportRequest) -> Result<ExportSummary> {
        let start_time = Instant::now();

        let result = self.collect().await?;
        let json = self.formatter.format_export(&result)?;

        let output_path = request.output_path();
        let mut writer = JsonFileWriter::create(&output_path).await?;
        writer.write(&json).await?;
        let file_size_bytes = writer.finalize().await?;

        self.progress.finished(&output_path);

        let summary = ExportSummary {
            collections_exported: result.len(),
            documents_exported: result.document_count(),
            file_size_bytes,
            elapsed_ms: start_time.elapsed().as_millis() as u64,
            output_path,
        };

        info!(
            "Export completed: {} collections, {} documents, {} bytes, {} ms",
            summary.collections_exported,
            summary.documents_exported,
            summary.file_size_bytes,
            summary.elapsed_ms
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mongodb::bson::{doc, oid::ObjectId};
    use std::collections::HashSet;
    use tokio::fs;

    use crate::error::{ConnectionError, ExportError};

    // In-memory source for testing
    struct MockSource {
        collections: Vec<(String, Vec<Document>)>,
        honor_limit: bool,
    }

    impl MockSource {
        fn new(collections: Vec<(&str, Vec<Document>)>) -> Self {
            Self {
                collections: collections
                    .into_iter()
                    .map(|(name, docs)| (name.to_string(), docs))
                    .collect(),
                honor_limit: true,
            }
        }

        fn ignoring_limit(mut self) -> Self {
            self.honor_limit = false;
            self
        }
    }

    #[async_trait]
    impl CollectionSource for MockSource {
        fn database_name(&self) -> &str {
            "mock"
        }

        async fn list_collection_names(&self) -> Result<Vec<String>> {
            Ok(self.collections.iter().map(|(name, _)| name.clone()).collect())
        }

        async fn sample(&self, collection: &str, limit: i64) -> Result<Vec<Document>> {
            let docs = self
                .collections
                .iter()
                .find(|(name, _)| name == collection)
                .map(|(_, docs)| docs.clone())
                .unwrap_or_default();

            if self.honor_limit {
                Ok(docs.into_iter().take(limit as usize).collect())
            } else {
                Ok(docs)
            }
        }
    }

    // Source whose server is unreachable
    struct UnreachableSource;

    #[async_trait]
    impl CollectionSource for UnreachableSource {
        fn database_name(&self) -> &str {
            "unreachable"
        }

        async fn list_collection_names(&self) -> Result<Vec<String>> {
            Err(ConnectionError::PingFailed("connection refused".to_string()).into())
        }

        async fn sample(&self, _collection: &str, _limit: i64) -> Result<Vec<Document>> {
            unreachable!("no collections can be listed")
        }
    }

    fn numbered_docs(count: usize) -> Vec<Document> {
        (0..count)
            .map(|i| doc! { "_id": ObjectId::new(), "n": i as i32 })
            .collect()
    }

    fn temp_request(database: &str) -> ExportRequest {
        let dir = std::env::temp_dir().join(format!(
            "mongo-sample-export-{}-{}",
            std::process::id(),
            database
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let config = ExportConfig {
            output_dir: dir,
            ..Default::default()
        };
        ExportRequest::new(database, config)
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("sample_airbnb"), "sample_airbnb.json");
        assert_eq!(output_file_name("a.b"), "a.b.json");
    }

    #[test]
    fn test_output_path_joins_output_dir() {
        let config = ExportConfig {
            output_dir: PathBuf::from("/tmp/out"),
            ..Default::default()
        };
        let request = ExportRequest::new("inventory", config);
        assert_eq!(request.output_path(), PathBuf::from("/tmp/out/inventory.json"));
    }

    #[test]
    fn test_default_output_path_is_bare_file_name() {
        let request = ExportRequest::new("sample_airbnb", ExportConfig::default());
        assert_eq!(request.output_path(), PathBuf::from("sample_airbnb.json"));
        assert_eq!(request.output_path().display().to_string(), "sample_airbnb.json");
    }

    #[test]
    fn test_output_path_does_not_sanitize_separators() {
        let request = ExportRequest::new("nested/name", ExportConfig::default());
        assert_eq!(request.output_path(), PathBuf::from("nested/name.json"));
    }

    #[tokio::test]
    async fn test_collect_no_collections() {
        let exporter = Exporter::new(MockSource::new(vec![]), false);
        let result = exporter.collect().await.unwrap();
        assert!(result.is_empty());
        assert_eq!(result.document_count(), 0);
    }

    #[tokio::test]
    async fn test_collect_small_collection_is_complete() {
        let docs = numbered_docs(3);
        let source = MockSource::new(vec![("users", docs.clone())]);
        let exporter = Exporter::new(source, false);

        let result = exporter.collect().await.unwrap();
        assert_eq!(result.get("users").unwrap(), docs.as_slice());
    }

    #[tokio::test]
    async fn test_collect_large_collection_is_capped() {
        let docs = numbered_docs(25);
        let source = MockSource::new(vec![("events", docs.clone())]);
        let exporter = Exporter::new(source, false);

        let result = exporter.collect().await.unwrap();
        let sampled = result.get("events").unwrap();
        assert_eq!(sampled.len(), 10);

        let ids: HashSet<_> = sampled.iter().map(|d| d.get_object_id("_id").unwrap()).collect();
        assert_eq!(ids.len(), 10);
        assert!(sampled.iter().all(|d| docs.contains(d)));
    }

    #[tokio::test]
    async fn test_collect_caps_source_ignoring_limit() {
        let source = MockSource::new(vec![("logs", numbered_docs(15))]).ignoring_limit();
        let exporter = Exporter::new(source, false);

        let result = exporter.collect().await.unwrap();
        assert_eq!(result.get("logs").unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_collect_keeps_enumeration_order() {
        let source = MockSource::new(vec![
            ("reviews", numbered_docs(1)),
            ("hosts", numbered_docs(2)),
            ("empty", Vec::new()),
        ]);
        let exporter = Exporter::new(source, false);

        let result = exporter.collect().await.unwrap();
        let names: Vec<&str> = result.collections().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["reviews", "hosts", "empty"]);
        assert_eq!(result.document_count(), 3);
    }

    #[tokio::test]
    async fn test_run_empty_database_writes_empty_object() {
        let request = temp_request("empty_db");
        let exporter = Exporter::new(MockSource::new(vec![]), false);

        let summary = exporter.run(&request).await.unwrap();
        assert_eq!(summary.collections_exported, 0);
        assert_eq!(summary.output_path, request.output_path());

        let content = fs::read_to_string(request.output_path()).await.unwrap();
        assert_eq!(content, "{}");

        fs::remove_dir_all(&request.config.output_dir).await.ok();
    }

    #[tokio::test]
    async fn test_run_is_idempotent() {
        let request = temp_request("idempotent_db");
        let collections = vec![
            ("listings", numbered_docs(12)),
            ("reviews", numbered_docs(4)),
        ];
        let exporter = Exporter::new(MockSource::new(collections), false);

        exporter.run(&request).await.unwrap();
        let first = fs::read(request.output_path()).await.unwrap();
        let summary = exporter.run(&request).await.unwrap();
        let second = fs::read(request.output_path()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(summary.documents_exported, 14);
        assert_eq!(summary.file_size_bytes, second.len() as u64);

        fs::remove_dir_all(&request.config.output_dir).await.ok();
    }

    #[tokio::test]
    async fn test_run_output_is_extended_json() {
        let request = temp_request("extjson_db");
        let oid = ObjectId::parse_str("65705d84dfc3f3b5094e1f72").unwrap();
        let source = MockSource::new(vec![("users", vec![doc! { "_id": oid, "name": "ada" }])]);
        let exporter = Exporter::new(source, false);

        exporter.run(&request).await.unwrap();
        let content = fs::read_to_string(request.output_path()).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!({
                "users": [{ "_id": { "$oid": "65705d84dfc3f3b5094e1f72" }, "name": "ada" }]
            })
        );

        fs::remove_dir_all(&request.config.output_dir).await.ok();
    }

    #[tokio::test]
    async fn test_run_connection_failure_creates_no_file() {
        let request = temp_request("unreachable_db");
        let exporter = Exporter::new(UnreachableSource, false);

        let err = exporter.run(&request).await.unwrap_err();
        assert!(matches!(err, ExportError::Connection(_)));
        assert!(!request.output_path().exists());

        fs::remove_dir_all(&request.config.output_dir).await.ok();
    }

    #[tokio::test]
    async fn test_run_missing_output_dir_fails() {
        let config = ExportConfig {
            output_dir: PathBuf::from("/nonexistent/mongo-sample-export"),
            ..Default::default()
        };
        let request = ExportRequest::new("db", config);
        let exporter = Exporter::new(MockSource::new(vec![]), false);

        assert!(exporter.run(&request).await.is_err());
    }
}
