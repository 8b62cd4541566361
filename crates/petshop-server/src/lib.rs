//! HTTP server wiring for the pet store.
//!
//! Loads [`ServerConfig`], nests the JSON API from `petshop-api` under
//! `/api`, and logs preference changes as they happen.

use std::path::{Path, PathBuf};

use axum::Router;
use petshop_api::{ApiState, api_router};
use petshop_core::{
  paths::{DEFAULT_STORE_PATH, expand_tilde},
  settings::{PreferenceChange, Preferences},
  store::PetStore,
};
use serde::Deserialize;
use tokio::{sync::broadcast, task::JoinHandle};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `PETSHOP_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:        String,
  pub port:        u16,
  pub store_path:  PathBuf,
  /// Initial preferences; changes made through the API are not written back.
  pub preferences: Preferences,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:        "127.0.0.1".to_string(),
      port:        8080,
      store_path:  PathBuf::from(DEFAULT_STORE_PATH),
      preferences: Preferences::default(),
    }
  }
}

impl ServerConfig {
  /// Read `path` (if it exists) and overlay `PETSHOP_*` environment variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("PETSHOP")
          .prefix_separator("_")
          .separator("__"),
      )
      .build()?
      .try_deserialize()
  }

  /// The configured store path with a leading `~` expanded.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the top-level router: the API under `/api`, with request tracing.
pub fn router<S>(state: ApiState<S>) -> Router
where
  S: PetStore + 'static,
{
  Router::new()
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
}

// ─── Preference listener ──────────────────────────────────────────────────────

/// Log every preference change until the channel closes.
pub fn spawn_preference_logger(
  mut changes: broadcast::Receiver<PreferenceChange>,
) -> JoinHandle<()> {
  tokio::spawn(async move {
    loop {
      match changes.recv().await {
        Ok(change) => match &change {
          PreferenceChange::DarkMode(on) => {
            tracing::info!(key = %change.key(), on, "theme will change on next launch")
          }
          PreferenceChange::Notifications(on) => {
            tracing::info!(key = %change.key(), on, "notifications toggled")
          }
          PreferenceChange::BusinessName(name) => {
            tracing::info!(key = %change.key(), %name, "business name updated")
          }
        },
        Err(broadcast::error::RecvError::Lagged(missed)) => {
          tracing::warn!(missed, "preference listener fell behind");
        }
        Err(broadcast::error::RecvError::Closed) => break,
      }
    }
  })
}
