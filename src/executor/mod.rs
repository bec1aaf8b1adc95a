//! Query execution module
//!
//! This module contains the executor that runs query descriptors against
//! the catalog.

pub mod executor;

pub use executor::{Executor, QueryResult};
