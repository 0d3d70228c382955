//! Connection management for MongoDB
//!
//! Builds a driver client from the connection URI and verifies the
//! server is reachable before any collection is read.

use mongodb::bson::doc;
use mongodb::{Client, Database, options::ClientOptions};
use tracing::{debug, info};

use crate::config::ExportConfig;
use crate::error::{ConnectionError, Result};

/// Application name reported to the server in the handshake.
const APP_NAME: &str = "mongo-sample-export";

/// MongoDB connection manager
pub struct ConnectionManager {
    /// MongoDB client instance
    client: Option<Client>,

    /// Export configuration
    config: ExportConfig,
}

impl ConnectionManager {
    /// Create a new, not yet connected, manager
    pub fn new(config: ExportConfig) -> Self {
        Self {
            client: None,
            config,
        }
    }

    /// Establish the client and ping the target database
    ///
    /// Connectivity and authentication failures surface here rather than on
    /// the first read.
    pub async fn connect(&mut self, database: &str) -> Result<()> {
        info!("Connecting to {}", sanitize_uri(&self.config.uri));

        let options = self.client_options().await?;
        let client = Client::with_options(options)?;

        ping(&client.database(database)).await?;
        debug!("Ping to database '{}' succeeded", database);

        self.client = Some(client);
        Ok(())
    }

    /// Get a database handle
    pub fn get_database(&self, name: &str) -> Result<Database> {
        Ok(self.get_client()?.database(name))
    }

    /// Get the MongoDB client
    pub fn get_client(&self) -> Result<&Client> {
        self.client
            .as_ref()
            .ok_or_else(|| ConnectionError::NotConnected.into())
    }

    /// Parse the URI and name the application
    async fn client_options(&self) -> Result<ClientOptions> {
        let mut options = ClientOptions::parse(&self.config.uri).await.map_err(|e| {
            ConnectionError::InvalidUri(format!("{}: {}", sanitize_uri(&self.config.uri), e))
        })?;

        if options.app_name.is_none() {
            options.app_name = Some(APP_NAME.to_string());
        }

        Ok(options)
    }
}

/// Verify the connection is alive by sending a ping
async fn ping(db: &Database) -> Result<()> {
    match db.run_command(doc! { "ping": 1 }).await {
        Ok(_) => Ok(()),
        Err(e) => match e.kind.as_ref() {
            mongodb::error::ErrorKind::Command(cmd) => {
                Err(ConnectionError::PingFailed(cmd.message.clone()).into())
            }
            _ => Err(e.into()),
        },
    }
}

/// Hide credentials in a connection URI before it is logged
pub fn sanitize_uri(uri: &str) -> String {
    if let Some(proto_end) = uri.find("://") {
        if let Some(host_start) = uri.rfind('@') {
            if host_start > proto_end {
                let proto = &uri[..proto_end + 3];
                let host = &uri[host_start..];
                return format!("{}***{}", proto, host);
            }
        }
    }

    if uri.contains('@') {
        "mongodb://***".to_string()
    } else {
        uri.to_string()
    }
}
