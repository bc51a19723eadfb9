//! JSON REST surface over the entity stores.
//!
//! Four verbs per entity collection, with the error semantics a real
//! backend substitution must preserve: NotFound maps to 404, form-schema
//! validation failures to 422 carrying the field→message map.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::errors::StoreError;
use crate::form::{self, FormDraft, ValidationErrors};
use crate::model::{Client, Process, Technician};
use crate::search::{Searchable, filter_records};
use crate::store::{Entity, EntityStore};

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub clients: EntityStore<Client>,
    pub processes: EntityStore<Process>,
    pub technicians: EntityStore<Technician>,
}

pub type SharedState = Arc<AppState>;

// ── Request payload types ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

// ── Error handling ────────────────────────────────────────────────────

pub enum ApiError {
    NotFound(String),
    Validation(ValidationErrors),
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"error": msg})),
            )
                .into_response(),
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({"errors": errors})),
            )
                .into_response(),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": msg})),
            )
                .into_response(),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": msg})),
            )
                .into_response(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::LockPoisoned => ApiError::Internal(err.to_string()),
        }
    }
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/api/clients", get(list_clients).post(create_client))
        .route(
            "/api/clients/{id}",
            get(get_client).put(update_client).delete(delete_client),
        )
        .route("/api/processes", get(list_processes).post(create_process))
        .route(
            "/api/processes/{id}",
            get(get_process).put(update_process).delete(delete_process),
        )
        .route(
            "/api/technicians",
            get(list_technicians).post(create_technician),
        )
        .route(
            "/api/technicians/{id}",
            get(get_technician)
                .put(update_technician)
                .delete(delete_technician),
        )
        .route("/health", get(health_check))
}

// ── Generic CRUD plumbing ─────────────────────────────────────────────
//
// One implementation of the list/get/create/update/delete lifecycle; the
// per-entity handlers below only pick the store.

async fn list_generic<E>(store: &EntityStore<E>, query: ListQuery) -> Result<Json<Vec<E>>, ApiError>
where
    E: Entity + Searchable + Serialize,
{
    let records = store.list().await?;
    let filtered = match query.search.as_deref() {
        Some(q) if !q.is_empty() => filter_records(&records, q).cloned().collect(),
        _ => records,
    };
    Ok(Json(filtered))
}

async fn get_generic<E>(store: &EntityStore<E>, id: u64) -> Result<Json<E>, ApiError>
where
    E: Entity + Serialize,
{
    let record = store
        .get(id)
        .await?
        .ok_or(StoreError::NotFound { kind: E::KIND, id })?;
    Ok(Json(record))
}

async fn create_generic<E>(
    store: &EntityStore<E>,
    draft: E::Draft,
) -> Result<(StatusCode, Json<E>), ApiError>
where
    E: Entity + Serialize,
    E::Draft: FormDraft,
{
    let errors = form::validate(&draft);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    let record = store.create(draft).await?;
    tracing::info!(kind = E::KIND, id = record.id(), "created");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_generic<E>(
    store: &EntityStore<E>,
    id: u64,
    patch: serde_json::Value,
) -> Result<Json<E>, ApiError>
where
    E: Entity + Serialize,
    E::Draft: FormDraft + Serialize + DeserializeOwned,
{
    let existing = store
        .get(id)
        .await?
        .ok_or(StoreError::NotFound { kind: E::KIND, id })?;
    let draft = merge_patch(existing.to_draft(), &patch)?;
    let errors = form::validate(&draft);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    let record = store.update(id, draft).await?;
    tracing::info!(kind = E::KIND, id, "updated");
    Ok(Json(record))
}

/// Overlay the fields present in a JSON patch onto the record's current
/// draft, so an update only replaces the fields the body actually sends.
fn merge_patch<D>(base: D, patch: &serde_json::Value) -> Result<D, ApiError>
where
    D: Serialize + DeserializeOwned,
{
    let patch = patch
        .as_object()
        .ok_or_else(|| ApiError::BadRequest("Expected a JSON object".to_string()))?;
    let mut merged =
        serde_json::to_value(base).map_err(|e| ApiError::Internal(e.to_string()))?;
    let fields = merged
        .as_object_mut()
        .ok_or_else(|| ApiError::Internal("Draft did not serialize to an object".to_string()))?;
    for (key, value) in patch {
        fields.insert(key.clone(), value.clone());
    }
    serde_json::from_value(merged).map_err(|e| ApiError::BadRequest(e.to_string()))
}

async fn delete_generic<E>(store: &EntityStore<E>, id: u64) -> Result<StatusCode, ApiError>
where
    E: Entity,
{
    store.delete(id).await?;
    tracing::info!(kind = E::KIND, id, "deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> &'static str {
    "ok"
}

async fn list_clients(
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    list_generic(&state.clients, query).await
}

async fn get_client(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    get_generic(&state.clients, id).await
}

async fn create_client(
    State(state): State<SharedState>,
    Json(draft): Json<<Client as Entity>::Draft>,
) -> Result<impl IntoResponse, ApiError> {
    create_generic(&state.clients, draft).await
}

async fn update_client(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Json(patch): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    update_generic::<Client>(&state.clients, id, patch).await
}

async fn delete_client(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    delete_generic(&state.clients, id).await
}

async fn list_processes(
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    list_generic(&state.processes, query).await
}

async fn get_process(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    get_generic(&state.processes, id).await
}

async fn create_process(
    State(state): State<SharedState>,
    Json(draft): Json<<Process as Entity>::Draft>,
) -> Result<impl IntoResponse, ApiError> {
    create_generic(&state.processes, draft).await
}

async fn update_process(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Json(patch): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    update_generic::<Process>(&state.processes, id, patch).await
}

async fn delete_process(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    delete_generic(&state.processes, id).await
}

async fn list_technicians(
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    list_generic(&state.technicians, query).await
}

async fn get_technician(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    get_generic(&state.technicians, id).await
}

async fn create_technician(
    State(state): State<SharedState>,
    Json(draft): Json<<Technician as Entity>::Draft>,
) -> Result<impl IntoResponse, ApiError> {
    create_generic(&state.technicians, draft).await
}

async fn update_technician(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Json(patch): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    update_generic::<Technician>(&state.technicians, id, patch).await
}

async fn delete_technician(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    delete_generic(&state.technicians, id).await
}
