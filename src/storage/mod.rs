//! Storage engine module
//!
//! This module contains the storage engine components:
//! - Values and rows
//! - Tables with constraint indexes
//! - Equality index
//! - Row blob codec
//! - File and in-memory backends

pub mod backend;
pub mod blob;
pub mod disk;
pub mod index;
pub mod memory;
pub mod table;
pub mod value;

pub use backend::{CatalogFile, StorageBackend};
pub use blob::RowBlob;
pub use disk::FileBackend;
pub use index::EqualityIndex;
pub use memory::MemoryBackend;
pub use table::{Join, JoinKind, OrderBy, Table};
pub use value::{Predicate, Row, Value};
