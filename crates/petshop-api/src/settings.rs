//! Handlers for `/settings`, `/dashboard` and `/reset`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/dashboard` | Derived inventory metrics |
//! | `GET`  | `/settings` | Current preferences |
//! | `PUT`  | `/settings` | Body: partial preferences; returns the result |
//! | `POST` | `/reset` | Delete every pet and restore default preferences |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
};
use petshop_core::{
  dashboard::{self, DashboardMetrics},
  settings::{Preferences, PreferencesPatch},
  store::PetStore,
};

use crate::{ApiState, error::ApiError, extract::JsonBody};

/// `GET /dashboard`
pub async fn metrics<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<DashboardMetrics>, ApiError>
where
  S: PetStore,
{
  let metrics = dashboard::load(state.store.as_ref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(metrics))
}

/// `GET /settings`
pub async fn get<S>(State(state): State<ApiState<S>>) -> Json<Preferences>
where
  S: PetStore,
{
  Json(state.settings.current())
}

/// `PUT /settings`. Body: any subset of `dark_mode`, `notifications`,
/// `business_name`.
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  JsonBody(patch): JsonBody<PreferencesPatch>,
) -> Result<Json<Preferences>, ApiError>
where
  S: PetStore,
{
  if patch
    .business_name
    .as_deref()
    .is_some_and(|n| n.trim().is_empty())
  {
    return Err(ApiError::BadRequest("business_name must not be empty".into()));
  }
  for change in patch.into_changes() {
    state.settings.apply(change);
  }
  Ok(Json(state.settings.current()))
}

/// `POST /reset`
pub async fn reset<S>(State(state): State<ApiState<S>>) -> Result<StatusCode, ApiError>
where
  S: PetStore,
{
  state.store.clear_all().await.map_err(ApiError::store)?;
  let changes = state.settings.reset();
  tracing::info!(preferences_reset = changes.len(), "all data cleared via API");
  Ok(StatusCode::NO_CONTENT)
}
