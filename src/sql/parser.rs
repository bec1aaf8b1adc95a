//! SQL Parser
//!
//! This module parses statement tokens into query descriptors: recursive
//! descent with one routine per statement kind.

use super::ast::*;
use super::lexer::Lexer;
use super::literal::{parse_literal, parse_loose_literal};
use super::token::{render, Token};
use crate::catalog::{Column, DataType};
use crate::error::{Error, Result};
use crate::storage::{Join, JoinKind, OrderBy, Predicate, Row};
use std::fmt::Display;
use tracing::warn;

/// Parse a single statement.
///
/// Whitespace runs collapse to one space first, quoted spans included.
pub fn parse(input: &str) -> Result<QueryDescriptor> {
    let statement = input.split_whitespace().collect::<Vec<_>>().join(" ");

    if statement.is_empty() {
        return Err(Error::EmptyQuery);
    }
    if statement.starts_with("--") {
        return Err(Error::UnsupportedQuery(format!(
            "comments are not supported: {}",
            statement
        )));
    }

    Parser::new(&statement)?.parse()
}

/// SQL Parser
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    /// Statement text, for error messages
    statement: String,
    /// Statement kind being parsed, for error messages
    kind: &'static str,
}

impl Parser {
    /// Create a new parser from a statement
    pub fn new(sql: &str) -> Result<Self> {
        let mut lexer = Lexer::new(sql);
        let mut tokens = lexer.tokenize()?;

        // one trailing semicolon is allowed
        let last = tokens.len() - 1;
        if last > 0 && tokens[last - 1] == Token::Semicolon {
            tokens.remove(last - 1);
        }

        Ok(Self {
            tokens,
            position: 0,
            statement: sql.trim().to_string(),
            kind: "statement",
        })
    }

    /// Parse the statement. The whole input must be consumed.
    pub fn parse(&mut self) -> Result<QueryDescriptor> {
        let query = if self.check_keywords(&["CREATE", "TABLE"]) {
            self.kind = "CREATE TABLE";
            QueryDescriptor::CreateTable(self.parse_create_table()?)
        } else if self.check_keywords(&["INSERT", "INTO"]) {
            self.kind = "INSERT";
            QueryDescriptor::Insert(self.parse_insert()?)
        } else if self.check_keyword("SELECT") {
            self.kind = "SELECT";
            QueryDescriptor::Select(self.parse_select()?)
        } else if self.check_keyword("UPDATE") {
            self.kind = "UPDATE";
            QueryDescriptor::Update(self.parse_update()?)
        } else if self.check_keywords(&["DELETE", "FROM"]) {
            self.kind = "DELETE";
            QueryDescriptor::Delete(self.parse_delete()?)
        } else if self.check_keywords(&["DROP", "TABLE"]) {
            self.kind = "DROP TABLE";
            QueryDescriptor::DropTable(self.parse_drop_table()?)
        } else {
            return Err(Error::UnsupportedQuery(self.statement.clone()));
        };

        if !self.is_at_end() {
            return Err(self.error(format!(
                "unexpected '{}' at end of statement",
                render(self.remaining())
            )));
        }

        Ok(query)
    }

    // ========== CREATE TABLE Statement ==========

    fn parse_create_table(&mut self) -> Result<CreateTableQuery> {
        self.expect_keyword("CREATE")?;
        self.expect_keyword("TABLE")?;
        let table_name = self.expect_identifier("table name")?;

        if !self.check(&Token::LParen) {
            return Err(self.error("expected column definitions"));
        }
        let definitions = split_list(&self.parenthesized()?);
        if definitions.is_empty() {
            return Err(self.error("no column definitions"));
        }

        let mut query = CreateTableQuery {
            table_name,
            columns: Vec::new(),
            primary_key: None,
            unique_keys: Vec::new(),
        };

        for definition in &definitions {
            match definition.as_slice() {
                [first, second, rest @ ..]
                    if first.is_keyword("PRIMARY") && second.is_keyword("KEY") =>
                {
                    query.primary_key = Some(self.constraint_column(rest, "PRIMARY KEY")?);
                }
                [first, rest @ ..] if first.is_keyword("UNIQUE") => {
                    let column = self.constraint_column(rest, "UNIQUE")?;
                    query.unique_keys.push(column);
                }
                // trailing modifiers are ignored
                [Token::Word(name), Token::Word(type_name), ..] => {
                    if !is_identifier(name) {
                        return Err(self.error(format!("invalid column name '{}'", name)));
                    }
                    query
                        .columns
                        .push(Column::new(name.clone(), DataType::from_keyword(type_name)));
                }
                [Token::Word(name)] => {
                    return Err(self.error(format!("column '{}' has no type", name)));
                }
                _ => {
                    return Err(self.error(format!(
                        "invalid column definition '{}'",
                        render(definition)
                    )));
                }
            }
        }

        Ok(query)
    }

    /// `( col )` after PRIMARY KEY or UNIQUE
    fn constraint_column(&self, tokens: &[Token], constraint: &str) -> Result<String> {
        match tokens {
            [Token::LParen, Token::Word(column), Token::RParen] if is_identifier(column) => {
                Ok(column.clone())
            }
            _ => Err(self.error(format!(
                "expected {} (column), found '{} {}'",
                constraint,
                constraint,
                render(tokens)
            ))),
        }
    }

    // ========== INSERT Statement ==========

    fn parse_insert(&mut self) -> Result<InsertQuery> {
        self.expect_keyword("INSERT")?;
        self.expect_keyword("INTO")?;
        let table_name = self.expect_identifier("table name")?;

        let columns = if self.check(&Token::LParen) {
            let items = split_list(&self.parenthesized()?);
            let mut columns = Vec::with_capacity(items.len());
            for item in &items {
                match item.as_slice() {
                    [Token::Word(column)] if is_identifier(column) => columns.push(column.clone()),
                    _ => {
                        return Err(self.error(format!("invalid column '{}'", render(item))));
                    }
                }
            }
            Some(columns)
        } else {
            None
        };

        self.expect_keyword("VALUES")?;
        if !self.check(&Token::LParen) {
            return Err(self.error("expected '(' after VALUES"));
        }
        let items = split_list(&self.parenthesized()?);
        if items.is_empty() {
            return Err(self.error("empty VALUES list"));
        }

        let mut values = Vec::with_capacity(items.len());
        for item in &items {
            if item.is_empty() {
                return Err(self.error("empty value in VALUES list"));
            }
            values.push(parse_literal(&render(item)));
        }

        let data: Row = match columns {
            Some(columns) => {
                if columns.len() != values.len() {
                    warn!(
                        table = %table_name,
                        columns = columns.len(),
                        values = values.len(),
                        "column and value counts differ, extras dropped"
                    );
                }
                columns.into_iter().zip(values).collect()
            }
            None => values
                .into_iter()
                .enumerate()
                .map(|(i, value)| (format!("col_{}", i), value))
                .collect(),
        };

        Ok(InsertQuery { table_name, data })
    }

    // ========== SELECT Statement ==========

    fn parse_select(&mut self) -> Result<SelectQuery> {
        self.expect_keyword("SELECT")?;

        let projection = self.take_until(|t| t.is_keyword("FROM"));
        if projection.is_empty() {
            return Err(self.error("empty column list"));
        }
        self.expect_keyword("FROM")?;

        let mut query = SelectQuery {
            table_name: self.expect_identifier("table name")?,
            columns: self.parse_projection(&projection)?,
            ..SelectQuery::default()
        };

        if self.check_keyword("JOIN") || self.check_keyword("INNER") || self.check_keyword("LEFT")
        {
            query.join = Some(self.parse_join(&query.table_name)?);
        }

        if self.check_keyword("WHERE") {
            self.advance();
            let clause = self.take_until(|t| t.is_keyword("ORDER") || t.is_keyword("LIMIT"));
            query.conditions = self.parse_conditions(&clause)?;
        }

        if self.check_keywords(&["ORDER", "BY"]) {
            self.advance();
            self.advance();
            let (_, column) = self.expect_column_ref()?;
            let ascending = if self.check_keyword("DESC") {
                self.advance();
                false
            } else {
                if self.check_keyword("ASC") {
                    self.advance();
                }
                true
            };
            query.order_by = Some(OrderBy { column, ascending });
        }

        if self.check_keyword("LIMIT") {
            self.advance();
            let limit = self
                .current()
                .as_word()
                .and_then(|w| w.parse::<usize>().ok())
                .ok_or_else(|| self.error(format!("invalid LIMIT '{}'", self.current())))?;
            self.advance();
            query.limit = Some(limit);
        }

        Ok(query)
    }

    /// `*` alone means every column; qualified names keep only the column part
    fn parse_projection(&self, tokens: &[Token]) -> Result<Option<Vec<String>>> {
        if let [Token::Word(star)] = tokens {
            if star == "*" {
                return Ok(None);
            }
        }

        let mut columns = Vec::new();
        for item in split_list(tokens) {
            match item.as_slice() {
                [Token::Word(star)] if star == "*" => columns.push(star.clone()),
                [Token::Word(word)] => match column_ref(word) {
                    Some((_, column)) => columns.push(column.to_string()),
                    None => return Err(self.error(format!("invalid column '{}'", word))),
                },
                _ => {
                    return Err(self.error(format!("invalid column '{}'", render(&item))));
                }
            }
        }
        Ok(Some(columns))
    }

    /// `[INNER|LEFT] [OUTER] JOIN <table> ON <a> = <b>`
    fn parse_join(&mut self, from_table: &str) -> Result<Join> {
        let kind = if self.check_keyword("LEFT") {
            self.advance();
            JoinKind::Left
        } else {
            if self.check_keyword("INNER") {
                self.advance();
            }
            JoinKind::Inner
        };
        if self.check_keyword("OUTER") {
            self.advance();
        }
        self.expect_keyword("JOIN")?;

        let table_name = self.expect_identifier("table name")?;
        self.expect_keyword("ON")?;
        let first = self.expect_column_ref()?;
        self.expect(&Token::Eq)?;
        let second = self.expect_column_ref()?;

        for (qualifier, column) in [&first, &second] {
            if let Some(qualifier) = qualifier {
                if qualifier != from_table && *qualifier != table_name {
                    return Err(self.error(format!(
                        "unknown table '{}' in '{}.{}'",
                        qualifier, qualifier, column
                    )));
                }
            }
        }

        // ON joined.col = from.col
        let swapped = first.0.as_deref() == Some(table_name.as_str())
            && second.0.as_deref() != Some(table_name.as_str());
        let (left, right) = if swapped { (second, first) } else { (first, second) };

        Ok(Join {
            kind,
            table_name,
            left_column: left.1,
            right_column: right.1,
        })
    }

    /// Zero or more `col = value` items with optional AND between them
    fn parse_conditions(&self, clause: &[Token]) -> Result<Option<Predicate>> {
        let mut conditions = Predicate::new();
        let mut rest = clause;

        while !rest.is_empty() {
            match rest {
                [Token::Word(column), Token::Eq, value @ (Token::Word(_) | Token::Quoted { .. }), tail @ ..] =>
                {
                    let (_, column) = column_ref(column).ok_or_else(|| {
                        self.error(format!("unsupported WHERE clause '{}'", render(clause)))
                    })?;
                    conditions.insert(column.to_string(), parse_literal(&value.to_string()));

                    rest = match tail {
                        [and, more @ ..] if and.is_keyword("AND") && !more.is_empty() => more,
                        _ => tail,
                    };
                }
                _ => {
                    return Err(
                        self.error(format!("unsupported WHERE clause '{}'", render(clause)))
                    );
                }
            }
        }

        Ok(if conditions.is_empty() {
            None
        } else {
            Some(conditions)
        })
    }

    // ========== UPDATE / DELETE Statements ==========

    fn parse_update(&mut self) -> Result<UpdateQuery> {
        self.expect_keyword("UPDATE")?;
        let table_name = self.expect_identifier("table name")?;
        self.expect_keyword("SET")?;

        let assignments = split_list(&self.take_until(|t| t.is_keyword("WHERE")));
        if assignments.is_empty() {
            return Err(self.error("empty SET list"));
        }

        let mut updates = Row::new();
        for item in &assignments {
            match item.as_slice() {
                [Token::Word(column), Token::Eq, value @ ..]
                    if is_identifier(column) && !value.is_empty() =>
                {
                    updates.insert(column.clone(), parse_loose_literal(&render(value)));
                }
                _ => {
                    return Err(self.error(format!("invalid assignment '{}'", render(item))));
                }
            }
        }

        let conditions = self.parse_single_condition()?;

        Ok(UpdateQuery {
            table_name,
            updates,
            conditions,
        })
    }

    fn parse_delete(&mut self) -> Result<DeleteQuery> {
        self.expect_keyword("DELETE")?;
        self.expect_keyword("FROM")?;
        let table_name = self.expect_identifier("table name")?;
        let conditions = self.parse_single_condition()?;

        Ok(DeleteQuery {
            table_name,
            conditions,
        })
    }

    /// `WHERE col = <rest>`: the first `col =` found, compared with the whole
    /// remainder of the clause as one loose literal. `WHERE a = 1 AND b = 2`
    /// therefore compares `a` with the text `1 AND b = 2`.
    fn parse_single_condition(&mut self) -> Result<Option<Predicate>> {
        if !self.check_keyword("WHERE") {
            return Ok(None);
        }
        self.advance();

        let clause = self.take_until(|_| false);
        let found = clause.windows(2).position(|pair| {
            matches!(&pair[0], Token::Word(w) if column_ref(w).is_some()) && pair[1] == Token::Eq
        });

        let (column, value) = match found {
            Some(i) if i + 2 < clause.len() => (&clause[i], &clause[i + 2..]),
            _ => {
                return Err(self.error(format!("unsupported WHERE clause '{}'", render(&clause))));
            }
        };
        let column = column
            .as_word()
            .and_then(column_ref)
            .map(|(_, c)| c.to_string())
            .unwrap_or_default();

        let mut predicate = Predicate::new();
        predicate.insert(column, parse_loose_literal(&render(value)));
        Ok(Some(predicate))
    }

    // ========== DROP TABLE Statement ==========

    fn parse_drop_table(&mut self) -> Result<DropTableQuery> {
        self.expect_keyword("DROP")?;
        self.expect_keyword("TABLE")?;
        if self.check_keywords(&["IF", "EXISTS"]) {
            self.advance();
            self.advance();
        }
        let table_name = self.expect_identifier("table name")?;

        Ok(DropTableQuery { table_name })
    }

    // ========== Helpers ==========

    fn current(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.position += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current(), Token::Eof)
    }

    /// Tokens from the current one up to, not including, `Eof`
    fn remaining(&self) -> &[Token] {
        let end = self.tokens.len().saturating_sub(1);
        &self.tokens[self.position.min(end)..end]
    }

    fn check(&self, token: &Token) -> bool {
        self.current() == token
    }

    fn check_keyword(&self, keyword: &str) -> bool {
        self.current().is_keyword(keyword)
    }

    /// Check for a run of keywords starting at the current token
    fn check_keywords(&self, keywords: &[&str]) -> bool {
        let rest = self.remaining();
        rest.len() >= keywords.len()
            && keywords
                .iter()
                .zip(rest)
                .all(|(keyword, token)| token.is_keyword(keyword))
    }

    fn expect(&mut self, token: &Token) -> Result<()> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!("expected '{}', found '{}'", token, self.current())))
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        if self.check_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!("expected {}, found '{}'", keyword, self.current())))
        }
    }

    fn expect_identifier(&mut self, what: &str) -> Result<String> {
        match self.current() {
            Token::Word(name) if is_identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            other => Err(self.error(format!("expected {}, found '{}'", what, other))),
        }
    }

    /// `col` or `table.col`
    fn expect_column_ref(&mut self) -> Result<(Option<String>, String)> {
        let parsed = self
            .current()
            .as_word()
            .and_then(column_ref)
            .map(|(table, column)| (table.map(str::to_string), column.to_string()));

        match parsed {
            Some(column) => {
                self.advance();
                Ok(column)
            }
            None => Err(self.error(format!("expected column, found '{}'", self.current()))),
        }
    }

    /// Consume `( ... )` and return the tokens inside
    fn parenthesized(&mut self) -> Result<Vec<Token>> {
        self.expect(&Token::LParen)?;

        let mut inner = Vec::new();
        let mut depth = 1;
        loop {
            match self.current() {
                Token::Eof => return Err(self.error("missing ')'")),
                Token::LParen => depth += 1,
                Token::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        self.advance();
                        return Ok(inner);
                    }
                }
                _ => {}
            }
            inner.push(self.current().clone());
            self.advance();
        }
    }

    /// Consume tokens until `stop` matches one outside parentheses, or the end
    fn take_until(&mut self, stop: impl Fn(&Token) -> bool) -> Vec<Token> {
        let mut taken = Vec::new();
        let mut depth = 0usize;

        while !self.is_at_end() {
            let token = self.current();
            match token {
                Token::LParen => depth += 1,
                Token::RParen => depth = depth.saturating_sub(1),
                _ if depth == 0 && stop(token) => break,
                _ => {}
            }
            taken.push(token.clone());
            self.advance();
        }

        taken
    }

    fn error(&self, detail: impl Display) -> Error {
        Error::Syntax(format!(
            "invalid {} syntax, {}: {}",
            self.kind, detail, self.statement
        ))
    }
}

/// Split a token run on commas outside parentheses.
///
/// Quoted spans are single tokens, so commas inside quotes never split.
/// An empty run yields no items.
pub fn split_list(tokens: &[Token]) -> Vec<Vec<Token>> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut items = Vec::new();
    let mut current = Vec::new();
    let mut depth = 0usize;

    for token in tokens {
        match token {
            Token::Comma if depth == 0 => {
                items.push(std::mem::take(&mut current));
                continue;
            }
            Token::LParen => depth += 1,
            Token::RParen => depth = depth.saturating_sub(1),
            _ => {}
        }
        current.push(token.clone());
    }
    items.push(current);

    items
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Split `table.column` or `column`
fn column_ref(word: &str) -> Option<(Option<&str>, &str)> {
    match word.split_once('.') {
        Some((table, column)) if is_identifier(table) && is_identifier(column) => {
            Some((Some(table), column))
        }
        None if is_identifier(word) => Some((None, word)),
        _ => None,
    }
}
