//! The `PetStore` trait and supporting aggregate types.
//!
//! The trait is implemented by storage backends (e.g. `petshop-store-sqlite`).
//! Higher layers (`petshop-api`, `petshop-cli`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::pet::{NewPet, Pet, PetId};

// ─── Aggregates ──────────────────────────────────────────────────────────────

/// Raw aggregate figures read from the store in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InventoryCounts {
  pub total:     u64,
  pub available: u64,
  pub sold:      u64,
  /// Sum of prices over sold pets.
  pub revenue:   f64,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a pet inventory backend.
///
/// There is no caching layer: every call observes the latest committed state.
/// "Not found" on update or delete is reported as an affected count of 0,
/// never as an error.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PetStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist a new pet and return the id the store assigned to it.
  /// Field contents are not validated here.
  fn insert(
    &self,
    pet: NewPet,
  ) -> impl Future<Output = Result<PetId, Self::Error>> + Send + '_;

  /// Overwrite every mutable field of the row matching `pet.id`.
  /// Returns the number of rows affected (0 or 1); never inserts.
  fn update(
    &self,
    pet: Pet,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Remove the pet with `id`. Returns the number of rows affected (0 or 1).
  fn delete(
    &self,
    id: PetId,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Delete every pet, irreversibly.
  fn clear_all(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Every pet, in insertion order.
  fn get_all(&self) -> impl Future<Output = Result<Vec<Pet>, Self::Error>> + Send + '_;

  /// A single pet, or `None` if `id` does not exist.
  fn get(
    &self,
    id: PetId,
  ) -> impl Future<Output = Result<Option<Pet>, Self::Error>> + Send + '_;

  /// Pets whose name or breed contains `query`, ignoring case. `query` is
  /// matched literally; an empty query matches every pet.
  fn search<'a>(
    &'a self,
    query: &'a str,
  ) -> impl Future<Output = Result<Vec<Pet>, Self::Error>> + Send + 'a;

  // ── Aggregates ────────────────────────────────────────────────────────

  /// Total number of pets.
  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Number of pets still in stock.
  fn count_available(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Number of pets sold.
  fn count_sold(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Sum of prices over sold pets; `0.0` when nothing has been sold.
  fn total_revenue(&self) -> impl Future<Output = Result<f64, Self::Error>> + Send + '_;

  /// All aggregates in a single call.
  fn counts(
    &self,
  ) -> impl Future<Output = Result<InventoryCounts, Self::Error>> + Send + '_;
}
