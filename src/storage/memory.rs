//! In-memory storage backend
//!
//! Keeps the same encoded catalog and blob bytes a file backend would
//! write, but in maps. Nothing survives the process.

use super::backend::{decode_blob, CatalogFile, StorageBackend};
use super::blob::{self, RowBlob};
use super::value::Row;
use crate::error::Result;
use std::collections::BTreeMap;

/// In-memory backend
#[derive(Debug, Default)]
pub struct MemoryBackend {
    catalog: Option<Vec<u8>>,
    blobs: BTreeMap<String, Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of tables that currently have a blob
    pub fn blob_names(&self) -> Vec<String> {
        self.blobs.keys().cloned().collect()
    }
}

impl StorageBackend for MemoryBackend {
    fn load_catalog(&self) -> Result<Option<CatalogFile>> {
        match &self.catalog {
            Some(bytes) => Ok(Some(serde_json::from_slice(bytes)?)),
            None => Ok(None),
        }
    }

    fn save_catalog(&mut self, catalog: &CatalogFile) -> Result<()> {
        self.catalog = Some(serde_json::to_vec(catalog)?);
        Ok(())
    }

    fn load_table(&self, table: &str) -> Result<Option<RowBlob>> {
        self.blobs
            .get(table)
            .map(|bytes| decode_blob(table, bytes))
            .transpose()
    }

    fn save_table(&mut self, table: &str, rows: &[Row], next_id: i64) -> Result<()> {
        self.blobs
            .insert(table.to_string(), blob::encode(rows, next_id));
        Ok(())
    }

    fn delete_table(&mut self, table: &str) -> Result<()> {
        self.blobs.remove(table);
        Ok(())
    }
}
