//! Cache administration endpoints

use axum::{extract::State, routing::get, Json, Router};
use tracing::{debug, info};

use super::state::AppState;
use crate::api::types::{
    ApiError, CachedSessionsResponse, ClearCacheResponse, DiskCacheStatusResponse,
};

/// Routes under `/api/cache`
pub fn create_cache_router() -> Router<AppState> {
    Router::new()
        .route("/status", get(disk_cache_status))
        .route("/sessions", get(list_cached_sessions))
        .route("/sessions/clear", get(clear_cached_sessions))
}

/// GET /api/cache/status
pub async fn disk_cache_status(
    State(state): State<AppState>,
) -> Result<Json<DiskCacheStatusResponse>, ApiError> {
    let stats = state
        .session_service
        .disk_cache_status()
        .await
        .map_err(|e| ApiError::from(e).with_message("Failed to read cache status"))?;

    debug!(
        cache_dir = %stats.cache_dir.display(),
        files = stats.file_count,
        "Disk cache status"
    );

    Ok(Json(DiskCacheStatusResponse::from(stats)))
}

/// GET /api/cache/sessions
pub async fn list_cached_sessions(State(state): State<AppState>) -> Json<CachedSessionsResponse> {
    let overview = state.session_service.cache_overview().await;

    Json(CachedSessionsResponse::from(overview))
}

/// GET /api/cache/sessions/clear
pub async fn clear_cached_sessions(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let cleared = state.session_service.clear_cache().await;
    info!(cleared, "Session cache cleared via API");

    Json(ClearCacheResponse::new(cleared))
}
