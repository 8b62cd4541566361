//! JSON REST API for the pet store.
//!
//! Exposes an axum [`Router`] backed by any [`petshop_core::store::PetStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", petshop_api::api_router(state))
//! ```

pub mod error;
pub mod extract;
pub mod pets;
pub mod settings;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use petshop_core::{settings::Settings, store::PetStore};

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:    Arc<S>,
  pub settings: Arc<Settings>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      settings: Arc::clone(&self.settings),
    }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: PetStore + 'static,
{
  Router::new()
    // Pets
    .route(
      "/pets",
      get(pets::list::<S>)
        .post(pets::create::<S>)
        .delete(pets::clear::<S>),
    )
    .route(
      "/pets/{id}",
      get(pets::get_one::<S>)
        .put(pets::update::<S>)
        .delete(pets::delete_one::<S>),
    )
    // Dashboard and preferences
    .route("/dashboard", get(settings::metrics::<S>))
    .route(
      "/settings",
      get(settings::get::<S>).put(settings::update::<S>),
    )
    .route("/reset", post(settings::reset::<S>))
    .with_state(state)
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
  };
  use petshop_core::{
    pet::{NewPet, Pet, PetId},
    settings::{PreferenceChange, Preferences},
    store::InventoryCounts,
  };
  use petshop_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn make_state() -> ApiState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    ApiState {
      store:    Arc::new(store),
      settings: Arc::new(Settings::default()),
    }
  }

  async fn send<S: PetStore + 'static>(
    state:  ApiState<S>,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    api_router(state).oneshot(builder.body(body).unwrap()).await.unwrap()
  }

  async fn json_body<T: serde::de::DeserializeOwned>(resp: Response) -> T {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn rex() -> Value {
    json!({ "name": "Rex", "breed": "Labrador", "price": 150.0, "details": "friendly" })
  }

  // ── Pets ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_then_list() {
    let state = make_state().await;

    let resp = send(state.clone(), "POST", "/pets", Some(rex())).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Pet = json_body(resp).await;
    assert_eq!(created.id, 1);
    assert!(created.available);
    assert_eq!(created.details.as_deref(), Some("friendly"));

    let resp = send(state, "GET", "/pets", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let pets: Vec<Pet> = json_body(resp).await;
    assert_eq!(pets, vec![created]);
  }

  #[tokio::test]
  async fn create_rejects_invalid_input() {
    let state = make_state().await;

    let blank = json!({ "name": " ", "breed": "Lab", "price": 1.0 });
    let resp = send(state.clone(), "POST", "/pets", Some(blank)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = json_body(resp).await;
    assert!(err["error"].as_str().unwrap().contains("name"));

    let negative = json!({ "name": "Rex", "breed": "Lab", "price": -3.0 });
    let resp = send(state.clone(), "POST", "/pets", Some(negative)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert_eq!(state.store.count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn search_by_query_param() {
    let state = make_state().await;
    send(state.clone(), "POST", "/pets", Some(rex())).await;
    send(
      state.clone(),
      "POST",
      "/pets",
      Some(json!({ "name": "Tom", "breed": "Siamese", "price": 80.0 })),
    )
    .await;

    let resp = send(state.clone(), "GET", "/pets?q=siam", None).await;
    let pets: Vec<Pet> = json_body(resp).await;
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].name, "Tom");

    let resp = send(state, "GET", "/pets?q=", None).await;
    let pets: Vec<Pet> = json_body(resp).await;
    assert_eq!(pets.len(), 2);
  }

  #[tokio::test]
  async fn get_update_delete_lifecycle() {
    let state = make_state().await;
    let id = state
      .store
      .insert(NewPet::new("Rex", "Labrador", 150.0))
      .await
      .unwrap();

    let resp = send(state.clone(), "GET", &format!("/pets/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let sold = json!({ "name": "Rex", "breed": "Labrador", "price": 150.0, "available": false });
    let resp = send(state.clone(), "PUT", &format!("/pets/{id}"), Some(sold)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Pet = json_body(resp).await;
    assert!(!updated.available);
    assert_eq!(state.store.total_revenue().await.unwrap(), 150.0);

    let resp = send(state.clone(), "DELETE", &format!("/pets/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(state, "GET", &format!("/pets/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn missing_ids_return_404() {
    let state = make_state().await;

    let resp = send(state.clone(), "PUT", "/pets/42", Some(rex())).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(state.store.count().await.unwrap(), 0);

    let resp = send(state, "DELETE", "/pets/42", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn clear_removes_everything() {
    let state = make_state().await;
    send(state.clone(), "POST", "/pets", Some(rex())).await;

    let resp = send(state.clone(), "DELETE", "/pets", None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(state.store.count().await.unwrap(), 0);
  }

  // ── Error responses ─────────────────────────────────────────────────────────

  async fn error_message(resp: Response) -> String {
    let body: Value = json_body(resp).await;
    body["error"].as_str().unwrap().to_owned()
  }

  #[tokio::test]
  async fn malformed_bodies_are_json_bad_requests() {
    let state = make_state().await;

    let resp = send(state.clone(), "POST", "/pets", Some(json!({ "name": "Rex" }))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(error_message(resp).await.contains("breed"));

    let req = Request::builder()
      .method("POST")
      .uri("/pets")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = api_router(state.clone()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(!error_message(resp).await.is_empty());

    // No content type at all.
    let resp = send(state.clone(), "POST", "/pets", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    error_message(resp).await;

    assert_eq!(state.store.count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn non_numeric_ids_are_json_bad_requests() {
    let state = make_state().await;

    let resp = send(state.clone(), "GET", "/pets/abc", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(error_message(resp).await.contains("abc"));

    let resp = send(state.clone(), "PUT", "/pets/abc", Some(rex())).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    error_message(resp).await;

    let resp = send(state, "DELETE", "/pets/abc", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    error_message(resp).await;
  }

  #[derive(Debug, thiserror::Error)]
  #[error("database file is locked")]
  struct Locked;

  /// A backend whose every call fails.
  struct LockedStore;

  impl PetStore for LockedStore {
    type Error = Locked;

    async fn insert(&self, _pet: NewPet) -> Result<PetId, Locked> { Err(Locked) }

    async fn update(&self, _pet: Pet) -> Result<u64, Locked> { Err(Locked) }

    async fn delete(&self, _id: PetId) -> Result<u64, Locked> { Err(Locked) }

    async fn clear_all(&self) -> Result<(), Locked> { Err(Locked) }

    async fn get_all(&self) -> Result<Vec<Pet>, Locked> { Err(Locked) }

    async fn get(&self, _id: PetId) -> Result<Option<Pet>, Locked> { Err(Locked) }

    async fn search(&self, _query: &str) -> Result<Vec<Pet>, Locked> { Err(Locked) }

    async fn count(&self) -> Result<u64, Locked> { Err(Locked) }

    async fn count_available(&self) -> Result<u64, Locked> { Err(Locked) }

    async fn count_sold(&self) -> Result<u64, Locked> { Err(Locked) }

    async fn total_revenue(&self) -> Result<f64, Locked> { Err(Locked) }

    async fn counts(&self) -> Result<InventoryCounts, Locked> { Err(Locked) }
  }

  #[tokio::test]
  async fn store_failures_are_json_server_errors() {
    let state = ApiState {
      store:    Arc::new(LockedStore),
      settings: Arc::new(Settings::default()),
    };
    state
      .settings
      .apply(PreferenceChange::BusinessName("Paws".into()));

    let requests = [
      ("GET", "/pets", None),
      ("GET", "/pets?q=rex", None),
      ("POST", "/pets", Some(rex())),
      ("GET", "/pets/1", None),
      ("PUT", "/pets/1", Some(rex())),
      ("DELETE", "/pets/1", None),
      ("DELETE", "/pets", None),
      ("GET", "/dashboard", None),
      ("POST", "/reset", None),
    ];
    for (method, uri, body) in requests {
      let resp = send(state.clone(), method, uri, body).await;
      assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
      assert!(error_message(resp).await.contains("locked"), "{method} {uri}");
    }

    // A failed reset leaves preferences alone.
    assert_eq!(state.settings.current().business_name, "Paws");
  }

  // ── Dashboard ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn dashboard_reports_metrics() {
    let state = make_state().await;
    state.store.insert(NewPet::new("A", "x", 100.0)).await.unwrap();
    let mut sold = NewPet::new("B", "x", 300.0);
    sold.available = false;
    state.store.insert(sold).await.unwrap();

    let resp = send(state, "GET", "/dashboard", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let m: Value = json_body(resp).await;
    assert_eq!(m["total"], 2);
    assert_eq!(m["sold"], 1);
    assert_eq!(m["revenue"], 300.0);
    assert_eq!(m["percent_sold"], 50.0);
    assert_eq!(m["average_sold_price"], 300.0);
    assert_eq!(m["low_stock"], 1);
  }

  // ── Settings ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn settings_patch_notifies_listeners() {
    let state = make_state().await;
    let mut rx = state.settings.subscribe();

    let resp = send(
      state.clone(),
      "PUT",
      "/settings",
      Some(json!({ "dark_mode": true })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let prefs: Preferences = json_body(resp).await;
    assert!(prefs.dark_mode);
    assert_eq!(prefs.business_name, "Pet Store");

    assert_eq!(rx.recv().await.unwrap(), PreferenceChange::DarkMode(true));

    let resp = send(state, "GET", "/settings", None).await;
    let prefs: Preferences = json_body(resp).await;
    assert!(prefs.dark_mode);
  }

  #[tokio::test]
  async fn settings_reject_blank_business_name() {
    let state = make_state().await;
    let resp = send(
      state.clone(),
      "PUT",
      "/settings",
      Some(json!({ "business_name": "  " })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(state.settings.current(), Preferences::default());
  }

  #[tokio::test]
  async fn settings_trim_business_name() {
    let state = make_state().await;
    let resp = send(
      state.clone(),
      "PUT",
      "/settings",
      Some(json!({ "business_name": "  Paws  " })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let prefs: Preferences = json_body(resp).await;
    assert_eq!(prefs.business_name, "Paws");
    assert_eq!(state.settings.current().business_name, "Paws");
  }

  #[tokio::test]
  async fn settings_reject_unknown_keys() {
    let state = make_state().await;
    let resp = send(state.clone(), "PUT", "/settings", Some(json!({ "volume": 11 }))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(error_message(resp).await.contains("volume"));
    assert_eq!(state.settings.current(), Preferences::default());
  }

  #[tokio::test]
  async fn reset_clears_pets_and_preferences() {
    let state = make_state().await;
    send(state.clone(), "POST", "/pets", Some(rex())).await;
    state
      .settings
      .apply(PreferenceChange::BusinessName("Paws".into()));

    let resp = send(state.clone(), "POST", "/reset", None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(state.store.count().await.unwrap(), 0);
    assert_eq!(state.settings.current(), Preferences::default());
  }
}
