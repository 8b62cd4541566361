//! Conversions between [`Pet`] and the plain column values stored in SQLite.
//!
//! Booleans are stored as `0`/`1` integers.

use petshop_core::pet::Pet;
use rusqlite::Row;

/// Column list matching [`read_pet`].
pub const PET_COLUMNS: &str =
  "id, name, breed, price, available, details, image_uri";

pub fn encode_available(available: bool) -> i64 { i64::from(available) }

pub fn decode_available(v: i64) -> bool { v != 0 }

pub fn read_pet(row: &Row<'_>) -> rusqlite::Result<Pet> {
  Ok(Pet {
    id:        row.get(0)?,
    name:      row.get(1)?,
    breed:     row.get(2)?,
    price:     row.get(3)?,
    available: decode_available(row.get(4)?),
    details:   row.get(5)?,
    image_uri: row.get(6)?,
  })
}

/// Build a `LIKE` pattern matching `query` as a literal substring.
///
/// `%`, `_` and the escape character itself are escaped with `\`; the
/// statement must declare `ESCAPE '\'`.
pub fn like_pattern(query: &str) -> String {
  let mut pattern = String::with_capacity(query.len() + 2);
  pattern.push('%');
  for ch in query.chars() {
    if matches!(ch, '%' | '_' | '\\') {
      pattern.push('\\');
    }
    pattern.push(ch);
  }
  pattern.push('%');
  pattern
}

/// Convert a non-negative SQLite count.
pub fn count(n: i64) -> u64 { u64::try_from(n).unwrap_or(0) }
