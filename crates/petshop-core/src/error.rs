//! Error types for `petshop-core`.
//!
//! These cover caller-side input problems. Storage failures belong to the
//! backend's own error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing required field: {0}")]
  MissingField(&'static str),

  #[error("invalid price: {0:?}")]
  InvalidPrice(String),

  #[error("unknown preference key: {0:?}")]
  UnknownPreference(String),

  #[error("invalid value {value:?} for preference {key}")]
  InvalidPreferenceValue { key: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
