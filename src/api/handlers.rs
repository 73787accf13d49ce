//! API Handlers
//!
//! HTTP request handlers for each store endpoint. Every handler is a thin
//! shell over one [`SharedStore`] operation.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::{SharedStore, TtlStore};
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{
    DeleteResponse, GetResponse, HasResponse, HealthResponse, KeysQuery, KeysResponse,
    MetaResponse, SetRequest, SetResponse, SizeResponse, StatsResponse,
};

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SharedStore>,
}

impl AppState {
    /// Wraps an existing store handle.
    pub fn new(store: SharedStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// State over a store with no background sweep.
    pub fn unswept(max_size: usize) -> Self {
        Self::new(SharedStore::without_sweeper(TtlStore::new(max_size)))
    }

    /// Creates a new AppState from configuration, starting the sweep.
    pub fn from_config(config: &Config) -> Self {
        Self::new(SharedStore::from_config(config))
    }
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> ApiResult<SetResponse> {
    let ttl = req.ttl();
    state.store.set(&req.key, req.value, ttl).await?;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Missing and expired keys both answer 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<GetResponse> {
    match state.store.get(&key).await? {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(ApiError::NotFound(key)),
    }
}

/// Handler for GET /has/:key
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<HasResponse> {
    let exists = state.store.has(&key).await?;
    Ok(Json(HasResponse::new(key, exists)))
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<DeleteResponse> {
    let deleted = state.store.delete(&key).await?;
    Ok(Json(DeleteResponse::new(key, deleted)))
}

/// Handler for GET /keys
pub async fn keys_handler(
    State(state): State<AppState>,
    Query(query): Query<KeysQuery>,
) -> Json<KeysResponse> {
    let keys = state.store.keys(query.pattern.as_deref()).await;
    Json(KeysResponse::new(query.pattern, keys))
}

/// Handler for GET /size
pub async fn size_handler(State(state): State<AppState>) -> Json<SizeResponse> {
    Json(SizeResponse {
        size: state.store.size().await,
        max_size: state.store.max_size().await,
    })
}

/// Handler for POST /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<SizeResponse> {
    state.store.clear().await;
    size_handler(State(state)).await
}

/// Handler for GET /meta/:key
pub async fn meta_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<MetaResponse> {
    match state.store.metadata(&key).await? {
        Some(metadata) => Ok(Json(MetaResponse { key, metadata })),
        None => Err(ApiError::NotFound(key)),
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.store.stats().await))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.store.is_sweeping()))
}
