//! Configuration for RelDB
//!
//! Where the catalog and the table blobs live on disk.

use std::path::{Path, PathBuf};

/// Default data directory
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default catalog file name inside the data directory
pub const DEFAULT_CATALOG_FILE: &str = "catalog.json";

/// Extension of per-table row blob files
pub const TABLE_FILE_EXTENSION: &str = "tbl";

/// Storage configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the catalog file and table blobs
    pub data_dir: PathBuf,
    /// Catalog file name, relative to `data_dir`
    pub catalog_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_file: DEFAULT_CATALOG_FILE.to_string(),
        }
    }
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the data directory
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the catalog file name
    pub fn catalog_file(mut self, name: impl Into<String>) -> Self {
        self.catalog_file = name.into();
        self
    }

    /// Full path of the catalog file
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(&self.catalog_file)
    }

    /// Full path of a table's row blob
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.data_dir
            .join(Path::new(table).with_extension(TABLE_FILE_EXTENSION))
    }
}
