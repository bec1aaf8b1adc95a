//! Literal grammar
//!
//! Two flavours of value parsing are used by the statement grammar:
//!
//! * [`parse_literal`] for VALUES lists and SELECT predicates: quoted text,
//!   `NULL`, `TRUE`/`FALSE`, integers, floats (only when a `.` is present),
//!   and anything else as bare text.
//! * [`parse_loose_literal`] for UPDATE assignments and UPDATE/DELETE
//!   predicates: one pair of surrounding quotes is stripped, then a number
//!   is attempted. `NULL`, `TRUE` and `FALSE` stay text.

use crate::storage::Value;
use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_till},
    character::complete::{char, i64 as integer},
    combinator::{all_consuming, map, value},
    number::complete::double,
    sequence::delimited,
    IResult,
};

/// Parse a literal. Never fails: unrecognized text is returned as text.
pub fn parse_literal(text: &str) -> Value {
    let text = text.trim();

    let parsed: IResult<&str, Value> = alt((
        all_consuming(quoted),
        all_consuming(keyword),
        all_consuming(map(integer, Value::Integer)),
    ))(text);
    if let Ok((_, literal)) = parsed {
        return literal;
    }

    parse_number(text, true).unwrap_or_else(|| Value::Text(text.to_string()))
}

/// Parse a literal the lenient way.
///
/// `'Ann'` and `"Ann"` lose their quotes, `42` and `4.2` become numbers,
/// everything else (including `NULL`) is text.
pub fn parse_loose_literal(text: &str) -> Value {
    let text = strip_quotes(text.trim());
    parse_number(text, false)
        .or_else(|| parse_number(text, true))
        .unwrap_or_else(|| Value::Text(text.to_string()))
}

/// Integer when `float` is false, float when it is true and the text has a `.`
fn parse_number(text: &str, float: bool) -> Option<Value> {
    if float {
        if !text.contains('.') {
            return None;
        }
        all_consuming(double::<&str, nom::error::Error<&str>>)(text)
            .ok()
            .map(|(_, f)| Value::Float(f))
    } else {
        if text.contains('.') {
            return None;
        }
        all_consuming(integer::<&str, nom::error::Error<&str>>)(text)
            .ok()
            .map(|(_, i)| Value::Integer(i))
    }
}

fn quoted(input: &str) -> IResult<&str, Value> {
    map(
        alt((
            delimited(char('\''), take_till(|c| c == '\''), char('\'')),
            delimited(char('"'), take_till(|c| c == '"'), char('"')),
        )),
        |text: &str| Value::Text(text.to_string()),
    )(input)
}

fn keyword(input: &str) -> IResult<&str, Value> {
    alt((
        value(Value::Null, tag_no_case("null")),
        value(Value::Boolean(true), tag_no_case("true")),
        value(Value::Boolean(false), tag_no_case("false")),
    ))(input)
}

fn strip_quotes(text: &str) -> &str {
    for quote in ['\'', '"'] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}
