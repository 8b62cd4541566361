//! Error type for `petshop-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The database could not be opened, read or written.
  #[error("storage unavailable: {0}")]
  Storage(#[from] tokio_rusqlite::Error),

  /// The file was written by a newer schema than this build understands.
  #[error("unsupported schema version {found} (newest known is {supported})")]
  UnsupportedSchema { found: i64, supported: i64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
