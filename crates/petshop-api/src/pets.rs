//! Handlers for `/pets` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/pets` | Optional `?q=` substring search over name and breed |
//! | `POST`   | `/pets` | Body: [`NewPet`]; returns 201 + stored pet |
//! | `GET`    | `/pets/{id}` | 404 if not found |
//! | `PUT`    | `/pets/{id}` | Body: [`NewPet`]; 404 if not found |
//! | `DELETE` | `/pets/{id}` | 204; 404 if not found |
//! | `DELETE` | `/pets` | Remove every pet; 204 |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use petshop_core::{
  pet::{NewPet, Pet, PetId},
  store::PetStore,
};
use serde::Deserialize;

use crate::{
  ApiState,
  error::ApiError,
  extract::{JsonBody, PathParam},
};

// ─── List / search ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Case-insensitive substring matched against name and breed.
  pub q: Option<String>,
}

/// `GET /pets[?q=<text>]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Pet>>, ApiError>
where
  S: PetStore,
{
  let pets = match params.q.as_deref() {
    Some(q) => state.store.search(q).await,
    None => state.store.get_all().await,
  }
  .map_err(ApiError::store)?;
  Ok(Json(pets))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /pets`: returns 201 + the stored [`Pet`].
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  JsonBody(body): JsonBody<NewPet>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PetStore,
{
  body.validate()?;
  let id = state
    .store
    .insert(body.clone())
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(body.with_id(id))))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /pets/{id}`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  PathParam(id): PathParam<PetId>,
) -> Result<Json<Pet>, ApiError>
where
  S: PetStore,
{
  let pet = state
    .store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("pet {id} not found")))?;
  Ok(Json(pet))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /pets/{id}`: replaces every field of the pet.
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  PathParam(id): PathParam<PetId>,
  JsonBody(body): JsonBody<NewPet>,
) -> Result<Json<Pet>, ApiError>
where
  S: PetStore,
{
  body.validate()?;
  let pet = body.with_id(id);
  let affected = state
    .store
    .update(pet.clone())
    .await
    .map_err(ApiError::store)?;
  if affected == 0 {
    return Err(ApiError::NotFound(format!("pet {id} not found")));
  }
  Ok(Json(pet))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /pets/{id}`
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  PathParam(id): PathParam<PetId>,
) -> Result<StatusCode, ApiError>
where
  S: PetStore,
{
  let affected = state.store.delete(id).await.map_err(ApiError::store)?;
  if affected == 0 {
    return Err(ApiError::NotFound(format!("pet {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /pets`
pub async fn clear<S>(State(state): State<ApiState<S>>) -> Result<StatusCode, ApiError>
where
  S: PetStore,
{
  state.store.clear_all().await.map_err(ApiError::store)?;
  tracing::info!("all pets deleted via API");
  Ok(StatusCode::NO_CONTENT)
}
