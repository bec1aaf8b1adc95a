//! SQL front end
//!
//! Statement text goes through the lexer, then the parser, and comes out as
//! a [`QueryDescriptor`].

pub mod ast;
pub mod lexer;
pub mod literal;
pub mod parser;
pub mod token;

pub use ast::{
    CreateTableQuery, DeleteQuery, DropTableQuery, InsertQuery, QueryDescriptor, SelectQuery,
    UpdateQuery,
};
pub use literal::{parse_literal, parse_loose_literal};
pub use parser::{parse, Parser};
