//! Progress reporting for export operations
//!
//! Prints one line per collection and a completion line to standard output.

use std::path::Path;

/// Progress reporter for export operations
pub struct ProgressReporter {
    /// Whether lines are printed at all
    enabled: bool,
}

impl ProgressReporter {
    /// Create a new reporter
    ///
    /// # Arguments
    /// * `enabled` - Print progress lines when true
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Announce that a collection is about to be read
    pub fn collection_started(&self, name: &str, limit: i64) {
        if self.enabled {
            println!("{}", collection_line(name, limit));
        }
    }

    /// Announce where the export was written
    pub fn finished(&self, path: &Path) {
        if self.enabled {
            println!("{}", completion_line(path));
        }
    }
}

fn collection_line(name: &str, limit: i64) -> String {
    format!("Extracting {} (first {} documents)", name, limit)
}

fn completion_line(path: &Path) -> String {
    format!("Export complete. Data serialized to {}.", path.display())
}
