//! Pet records, the single entity kept by the store.
//!
//! A [`Pet`] is one inventory row. Its `id` is assigned by the backend on
//! insert and never changes; every other field may be overwritten by an
//! update.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Storage-assigned row identifier.
pub type PetId = i64;

/// One inventory item as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
  pub id:        PetId,
  pub name:      String,
  pub breed:     String,
  /// Price in the base currency unit.
  pub price:     f64,
  /// `true` while in stock, `false` once sold.
  pub available: bool,
  pub details:   Option<String>,
  /// Opaque reference to an externally stored image.
  pub image_uri: Option<String>,
}

impl Pet {
  /// Human-readable stock status.
  pub fn status_label(&self) -> &'static str {
    if self.available { "Available" } else { "Sold" }
  }

  /// Strip the id, e.g. to re-validate the mutable fields.
  pub fn to_new(&self) -> NewPet {
    NewPet {
      name:      self.name.clone(),
      breed:     self.breed.clone(),
      price:     self.price,
      available: self.available,
      details:   self.details.clone(),
      image_uri: self.image_uri.clone(),
    }
  }
}

/// The fields of a pet before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPet {
  pub name:      String,
  pub breed:     String,
  pub price:     f64,
  #[serde(default = "default_available")]
  pub available: bool,
  #[serde(default)]
  pub details:   Option<String>,
  #[serde(default)]
  pub image_uri: Option<String>,
}

fn default_available() -> bool { true }

impl NewPet {
  pub fn new(name: impl Into<String>, breed: impl Into<String>, price: f64) -> Self {
    Self {
      name: name.into(),
      breed: breed.into(),
      price,
      available: true,
      details: None,
      image_uri: None,
    }
  }

  /// Attach the id the store assigned on insert.
  pub fn with_id(self, id: PetId) -> Pet {
    Pet {
      id,
      name:      self.name,
      breed:     self.breed,
      price:     self.price,
      available: self.available,
      details:   self.details,
      image_uri: self.image_uri,
    }
  }

  /// Check the rules the store itself does not enforce: non-blank name and
  /// breed, finite non-negative price.
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::MissingField("name"));
    }
    if self.breed.trim().is_empty() {
      return Err(Error::MissingField("breed"));
    }
    if !self.price.is_finite() || self.price < 0.0 {
      return Err(Error::InvalidPrice(self.price.to_string()));
    }
    Ok(())
  }
}
