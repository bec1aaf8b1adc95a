//! RelDB - A minimal relational data engine written in Rust
//!
//! This library provides the core components:
//! - Statement parsing (lexer, parser, query descriptors)
//! - Table storage (rows, constraints, equality indexes, joins)
//! - Persistence (JSON catalog, binary row blobs)
//! - Query execution
//!
//! ```no_run
//! use reldb::{parse, Catalog, Config, Executor};
//!
//! # fn main() -> reldb::Result<()> {
//! let mut executor = Executor::new(Catalog::open(&Config::new().data_dir("data"))?);
//! executor.execute(parse("CREATE TABLE users (id INT, name VARCHAR, PRIMARY KEY (id))")?)?;
//! executor.execute(parse("INSERT INTO users (name) VALUES ('Ann')")?)?;
//! let result = executor.execute(parse("SELECT * FROM users")?)?;
//! println!("{}", result);
//! executor.into_catalog().close()?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod executor;
pub mod sql;
pub mod storage;

pub use catalog::Catalog;
pub use config::Config;
pub use error::{Error, Result};
pub use executor::{Executor, QueryResult};
pub use sql::{parse, QueryDescriptor};
pub use storage::{Row, Value};
