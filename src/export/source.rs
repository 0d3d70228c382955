//! Collection sources for export operations
//!
//! The export routine reads through [`CollectionSource`] so it does not care
//! whether documents come from a live server or from memory.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Document, doc};
use tracing::debug;

use crate::error::Result;

/// Trait for enumerating collections and sampling their documents
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Name of the database being read
    fn database_name(&self) -> &str;

    /// List collection names in the order the source reports them
    async fn list_collection_names(&self) -> Result<Vec<String>>;

    /// Fetch at most `limit` documents from a collection, in natural order
    async fn sample(&self, collection: &str, limit: i64) -> Result<Vec<Document>>;
}

/// MongoDB-backed collection source
pub struct MongoSource {
    db: Database,
}

impl MongoSource {
    /// Wrap a database handle
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CollectionSource for MongoSource {
    fn database_name(&self) -> &str {
        self.db.name()
    }

    async fn list_collection_names(&self) -> Result<Vec<String>> {
        let names = self.db.list_collection_names().await?;
        debug!("Database '{}' has {} collections", self.db.name(), names.len());
        Ok(names)
    }

    async fn sample(&self, collection: &str, limit: i64) -> Result<Vec<Document>> {
        let cursor = self
            .db
            .collection::<Document>(collection)
            .find(doc! {})
            .limit(limit)
            .await?;

        let docs: Vec<Document> = cursor.try_collect().await?;
        debug!("Fetched {} documents from '{}'", docs.len(), collection);
        Ok(docs)
    }
}

