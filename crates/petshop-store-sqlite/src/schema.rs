//! SQL schema and migrations for the pet store.
//!
//! The schema version lives in `PRAGMA user_version`. A fresh file (version
//! 0) gets the current table directly; older files are brought forward by the
//! additive steps in [`MIGRATIONS`], all inside one transaction.

use rusqlite::Connection;

/// Version written by this build.
pub const SCHEMA_VERSION: i64 = 2;

/// Connection settings applied before any migration.
pub const PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
";

/// Current DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const CREATE_PETS: &str = "
CREATE TABLE IF NOT EXISTS pets (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT    NOT NULL,
    breed      TEXT    NOT NULL,
    price      REAL    NOT NULL,
    available  INTEGER NOT NULL,   -- 1 = in stock, 0 = sold
    details    TEXT,
    image_uri  TEXT                -- opaque; never interpreted
);
";

/// Steps from older versions, keyed by the version each one produces.
pub const MIGRATIONS: &[(i64, &str)] = &[
  // v1 predates image support and allowed NULLs everywhere.
  (2, "
    ALTER TABLE pets ADD COLUMN image_uri TEXT;
    UPDATE pets SET
      name      = COALESCE(name, ''),
      breed     = COALESCE(breed, ''),
      price     = COALESCE(price, 0.0),
      available = COALESCE(available, 0);
  "),
];

/// The first released layout, kept for migration tests.
#[cfg(test)]
pub const SCHEMA_V1: &str = "
CREATE TABLE pets (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT,
    breed      TEXT,
    price      REAL,
    available  INTEGER,
    details    TEXT
);
PRAGMA user_version = 1;
";

/// Outcome of [`migrate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Migration {
  Created,
  UpToDate,
  Upgraded { from: i64 },
  /// Written by a newer build; left untouched.
  TooNew(i64),
}

pub fn migrate(conn: &mut Connection) -> rusqlite::Result<Migration> {
  conn.execute_batch(PRAGMAS)?;

  let found: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
  if found > SCHEMA_VERSION {
    return Ok(Migration::TooNew(found));
  }
  if found == SCHEMA_VERSION {
    return Ok(Migration::UpToDate);
  }

  let tx = conn.transaction()?;
  if found == 0 {
    tx.execute_batch(CREATE_PETS)?;
  } else {
    for (version, sql) in MIGRATIONS {
      if *version > found {
        tx.execute_batch(sql)?;
      }
    }
  }
  tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
  tx.commit()?;

  Ok(if found == 0 {
    Migration::Created
  } else {
    Migration::Upgraded { from: found }
  })
}
