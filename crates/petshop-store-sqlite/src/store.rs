//! [`SqliteStore`], the SQLite implementation of [`PetStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use tracing::{debug, info};

use petshop_core::{
  pet::{NewPet, Pet, PetId},
  store::{InventoryCounts, PetStore},
};

use crate::{
  Error, Result,
  encode::{PET_COLUMNS, count, encode_available, like_pattern, read_pet},
  schema::{Migration, SCHEMA_VERSION, migrate},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A pet inventory backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. All clones
/// share one database thread, so statements never run concurrently.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and bring its schema up to date.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::from_connection(conn).await
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::from_connection(conn).await
  }

  /// Wrap an already-open connection, migrating its schema first.
  pub async fn from_connection(conn: tokio_rusqlite::Connection) -> Result<Self> {
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    let outcome = self
      .conn
      .call(|conn| Ok(migrate(conn)?))
      .await?;

    match outcome {
      Migration::Created => info!(version = SCHEMA_VERSION, "created pet store schema"),
      Migration::Upgraded { from } => {
        info!(from, to = SCHEMA_VERSION, "migrated pet store schema")
      }
      Migration::UpToDate => debug!(version = SCHEMA_VERSION, "pet store schema up to date"),
      Migration::TooNew(found) => {
        return Err(Error::UnsupportedSchema { found, supported: SCHEMA_VERSION });
      }
    }
    Ok(())
  }

  async fn query_pets(&self, sql: String, pattern: Option<String>) -> Result<Vec<Pet>> {
    let pets = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = match pattern {
          Some(p) => stmt
            .query_map(rusqlite::params![p], read_pet)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
          None => stmt
            .query_map([], read_pet)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
      })
      .await?;
    Ok(pets)
  }

  async fn scalar_count(&self, sql: &'static str) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(move |conn| Ok(conn.query_row(sql, [], |r| r.get(0))?))
      .await?;
    Ok(count(n))
  }
}

// ─── PetStore impl ───────────────────────────────────────────────────────────

impl PetStore for SqliteStore {
  type Error = Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn insert(&self, pet: NewPet) -> Result<PetId> {
    let available = encode_available(pet.available);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO pets (name, breed, price, available, details, image_uri)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            pet.name,
            pet.breed,
            pet.price,
            available,
            pet.details,
            pet.image_uri,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    debug!(id, "inserted pet");
    Ok(id)
  }

  async fn update(&self, pet: Pet) -> Result<u64> {
    let id = pet.id;
    let available = encode_available(pet.available);

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE pets
             SET name = ?2, breed = ?3, price = ?4, available = ?5,
                 details = ?6, image_uri = ?7
           WHERE id = ?1",
          rusqlite::params![
            pet.id,
            pet.name,
            pet.breed,
            pet.price,
            available,
            pet.details,
            pet.image_uri,
          ],
        )?)
      })
      .await?;

    debug!(id, affected, "updated pet");
    Ok(affected as u64)
  }

  async fn delete(&self, id: PetId) -> Result<u64> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM pets WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    debug!(id, affected, "deleted pet");
    Ok(affected as u64)
  }

  async fn clear_all(&self) -> Result<()> {
    let removed = self
      .conn
      .call(|conn| Ok(conn.execute("DELETE FROM pets", [])?))
      .await?;

    info!(removed, "cleared all pets");
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get_all(&self) -> Result<Vec<Pet>> {
    self
      .query_pets(format!("SELECT {PET_COLUMNS} FROM pets ORDER BY id"), None)
      .await
  }

  async fn get(&self, id: PetId) -> Result<Option<Pet>> {
    let sql = format!("SELECT {PET_COLUMNS} FROM pets WHERE id = ?1");

    let pet = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&sql, rusqlite::params![id], read_pet).optional()?)
      })
      .await?;
    Ok(pet)
  }

  async fn search(&self, query: &str) -> Result<Vec<Pet>> {
    let sql = format!(
      "SELECT {PET_COLUMNS} FROM pets
       WHERE name LIKE ?1 ESCAPE '\\' OR breed LIKE ?1 ESCAPE '\\'
       ORDER BY id"
    );
    self.query_pets(sql, Some(like_pattern(query))).await
  }

  // ── Aggregates ────────────────────────────────────────────────────────────

  async fn count(&self) -> Result<u64> {
    self.scalar_count("SELECT COUNT(*) FROM pets").await
  }

  async fn count_available(&self) -> Result<u64> {
    self
      .scalar_count("SELECT COUNT(*) FROM pets WHERE available != 0")
      .await
  }

  async fn count_sold(&self) -> Result<u64> {
    self
      .scalar_count("SELECT COUNT(*) FROM pets WHERE available = 0")
      .await
  }

  async fn total_revenue(&self) -> Result<f64> {
    let revenue = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT COALESCE(SUM(price), 0.0) FROM pets WHERE available = 0",
          [],
          |r| r.get(0),
        )?)
      })
      .await?;
    Ok(revenue)
  }

  async fn counts(&self) -> Result<InventoryCounts> {
    let (total, available, revenue): (i64, i64, f64) = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*),
                  COALESCE(SUM(available != 0), 0),
                  COALESCE(SUM(CASE WHEN available = 0 THEN price END), 0.0)
           FROM pets",
          [],
          |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )?)
      })
      .await?;

    let (total, available) = (count(total), count(available));
    Ok(InventoryCounts {
      total,
      available,
      sold: total - available,
      revenue,
    })
  }
}
