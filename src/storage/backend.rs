//! Storage backend interface
//!
//! The catalog persists through this trait: one catalog document holding
//! every table's record, and one row blob per table. Implementations decide
//! where those bytes live.

use super::blob::{self, RowBlob};
use super::value::Row;
use crate::catalog::TableMeta;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Catalog document: table name to its record
pub type CatalogFile = BTreeMap<String, TableMeta>;

/// Durable home for the catalog and the row blobs
pub trait StorageBackend: Debug {
    /// Read the catalog document, `None` if nothing was ever written
    fn load_catalog(&self) -> Result<Option<CatalogFile>>;

    /// Replace the catalog document
    fn save_catalog(&mut self, catalog: &CatalogFile) -> Result<()>;

    /// Read a table's row blob, `None` if it does not exist
    fn load_table(&self, table: &str) -> Result<Option<RowBlob>>;

    /// Replace a table's row blob
    fn save_table(&mut self, table: &str, rows: &[Row], next_id: i64) -> Result<()>;

    /// Remove a table's row blob; missing blobs are ignored
    fn delete_table(&mut self, table: &str) -> Result<()>;
}

/// Decode a blob read from a backend, naming the table on failure
pub(crate) fn decode_blob(table: &str, bytes: &[u8]) -> Result<RowBlob> {
    blob::decode(bytes).map_err(|e| Error::CorruptedBlob {
        table: table.to_string(),
        reason: e.to_string(),
    })
}
