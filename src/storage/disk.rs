//! File backend for RelDB
//!
//! One JSON catalog file plus one binary `<table>.tbl` blob per table, all
//! inside the data directory. Every save rewrites the whole file in place:
//! there is no write-ahead log, no temp-file rename and no fsync, so a crash
//! mid-write can leave a file truncated.

use super::backend::{decode_blob, CatalogFile, StorageBackend};
use super::blob::{self, RowBlob};
use super::value::Row;
use crate::config::Config;
use crate::error::Result;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;
use tracing::debug;

/// File-per-table backend
#[derive(Debug)]
pub struct FileBackend {
    config: Config,
}

impl FileBackend {
    /// Open the backend, creating the data directory if needed
    pub fn open(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;
        debug!(data_dir = %config.data_dir.display(), "opened file backend");
        Ok(Self { config })
    }

    /// Get the backend configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
        // the handle is dropped, and so closed, on every return path
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(contents)?;
        writer.flush()?;
        Ok(())
    }

    fn read_file(path: &Path) -> Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl StorageBackend for FileBackend {
    fn load_catalog(&self) -> Result<Option<CatalogFile>> {
        match Self::read_file(&self.config.catalog_path())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn save_catalog(&mut self, catalog: &CatalogFile) -> Result<()> {
        let json = serde_json::to_vec_pretty(catalog)?;
        Self::write_file(&self.config.catalog_path(), &json)?;
        debug!(tables = catalog.len(), "catalog written");
        Ok(())
    }

    fn load_table(&self, table: &str) -> Result<Option<RowBlob>> {
        match Self::read_file(&self.config.table_path(table))? {
            Some(bytes) => decode_blob(table, &bytes).map(Some),
            None => Ok(None),
        }
    }

    fn save_table(&mut self, table: &str, rows: &[Row], next_id: i64) -> Result<()> {
        let bytes = blob::encode(rows, next_id);
        Self::write_file(&self.config.table_path(table), &bytes)?;
        debug!(table, rows = rows.len(), next_id, "row blob written");
        Ok(())
    }

    fn delete_table(&mut self, table: &str) -> Result<()> {
        match fs::remove_file(self.config.table_path(table)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
