//! JSON file writer for export operations

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::error::{OutputError, Result};

/// Writer for the single `<database>.json` output file
///
/// The file is created (or truncated) only when [`JsonFileWriter::create`] is
/// called, so nothing touches the filesystem before the data is ready.
pub struct JsonFileWriter {
    /// Buffered file writer
    writer: BufWriter<File>,
    /// Path to the output file
    path: PathBuf,
    /// Number of bytes written
    written: u64,
}

impl JsonFileWriter {
    /// Create or truncate the output file
    pub async fn create(path: &Path) -> Result<Self> {
        validate_path(path)?;

        let file = File::create(path).await.map_err(|source| OutputError::Create {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Created JSON writer for: {}", path.display());

        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
            written: 0,
        })
    }

    /// Write the serialized export
    pub async fn write(&mut self, json: &[u8]) -> Result<()> {
        self.writer
            .write_all(json)
            .await
            .map_err(|source| OutputError::Write {
                path: self.path.clone(),
                source,
            })?;
        self.written += json.len() as u64;
        Ok(())
    }

    /// Flush buffered bytes to disk and return the byte count
    pub async fn finalize(mut self) -> Result<u64> {
        self.writer
            .flush()
            .await
            .map_err(|source| OutputError::Write {
                path: self.path.clone(),
                source,
            })?;

        debug!("Finalized {} ({} bytes)", self.path.display(), self.written);
        Ok(self.written)
    }
}

/// Check that the parent directory of `path` exists
pub(crate) fn validate_path(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(OutputError::DirectoryNotFound(parent.to_path_buf()).into());
        }
    }

    Ok(())
}
