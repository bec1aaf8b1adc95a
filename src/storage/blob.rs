//! Row blob codec
//!
//! A row blob holds a table's whole row sequence plus its surrogate id
//! counter. Layout (little endian):
//!
//! ```text
//! magic "RLDB" | version u8 | next_id i64 | row count u32
//! per row:   field count u32
//! per field: name len u32 | name utf8 | tag u8 | payload
//! ```
//!
//! Tags: 0 null, 1 bool (u8), 2 integer (i64), 3 float (f64), 4 text (len u32 + utf8).

use super::value::{Row, Value};
use byteorder::{LittleEndian, ReadBytesExt};
use bytes::{BufMut, BytesMut};
use std::io::{self, Read};

const MAGIC: &[u8; 4] = b"RLDB";
const FORMAT_VERSION: u8 = 1;

const TAG_NULL: u8 = 0;
const TAG_BOOLEAN: u8 = 1;
const TAG_INTEGER: u8 = 2;
const TAG_FLOAT: u8 = 3;
const TAG_TEXT: u8 = 4;

/// Decoded contents of a table's row blob
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowBlob {
    pub rows: Vec<Row>,
    pub next_id: i64,
}

/// Serialize a row sequence and id counter
pub fn encode(rows: &[Row], next_id: i64) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(64 + rows.len() * 32);
    buf.put_slice(MAGIC);
    buf.put_u8(FORMAT_VERSION);
    buf.put_i64_le(next_id);
    buf.put_u32_le(rows.len() as u32);

    for row in rows {
        buf.put_u32_le(row.len() as u32);
        for (name, value) in row {
            put_str(&mut buf, name);
            match value {
                Value::Null => buf.put_u8(TAG_NULL),
                Value::Boolean(b) => {
                    buf.put_u8(TAG_BOOLEAN);
                    buf.put_u8(u8::from(*b));
                }
                Value::Integer(i) => {
                    buf.put_u8(TAG_INTEGER);
                    buf.put_i64_le(*i);
                }
                Value::Float(f) => {
                    buf.put_u8(TAG_FLOAT);
                    buf.put_f64_le(*f);
                }
                Value::Text(s) => {
                    buf.put_u8(TAG_TEXT);
                    put_str(&mut buf, s);
                }
            }
        }
    }

    buf.to_vec()
}

fn put_str(buf: &mut BytesMut, s: &str) {
    buf.put_u32_le(s.len() as u32);
    buf.put_slice(s.as_bytes());
}

/// Deserialize a row blob. Errors describe what was malformed.
pub fn decode(bytes: &[u8]) -> io::Result<RowBlob> {
    let mut reader = bytes;

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(invalid("bad magic number"));
    }
    let version = reader.read_u8()?;
    if version != FORMAT_VERSION {
        return Err(invalid(&format!("unsupported format version {}", version)));
    }

    let next_id = reader.read_i64::<LittleEndian>()?;
    let row_count = reader.read_u32::<LittleEndian>()? as usize;

    // never trust the header for the allocation size
    let mut rows = Vec::with_capacity(row_count.min(1024));
    for _ in 0..row_count {
        let field_count = reader.read_u32::<LittleEndian>()? as usize;
        let mut row = Row::with_capacity(field_count.min(256));
        for _ in 0..field_count {
            let name = read_str(&mut reader)?;
            let value = match reader.read_u8()? {
                TAG_NULL => Value::Null,
                TAG_BOOLEAN => Value::Boolean(reader.read_u8()? != 0),
                TAG_INTEGER => Value::Integer(reader.read_i64::<LittleEndian>()?),
                TAG_FLOAT => Value::Float(reader.read_f64::<LittleEndian>()?),
                TAG_TEXT => Value::Text(read_str(&mut reader)?),
                tag => return Err(invalid(&format!("unknown value tag {}", tag))),
            };
            row.insert(name, value);
        }
        rows.push(row);
    }

    if !reader.is_empty() {
        return Err(invalid("trailing bytes after last row"));
    }

    Ok(RowBlob { rows, next_id })
}

fn read_str(reader: &mut &[u8]) -> io::Result<String> {
    let len = reader.read_u32::<LittleEndian>()? as usize;
    let remaining: &[u8] = *reader;
    if len > remaining.len() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "string runs past end of blob",
        ));
    }
    let (head, tail) = remaining.split_at(len);
    let s = String::from_utf8(head.to_vec()).map_err(|e| invalid(&e.to_string()))?;
    *reader = tail;
    Ok(s)
}

fn invalid(reason: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, reason.to_string())
}
