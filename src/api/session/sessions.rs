//! Session, preload, driver and lap endpoint handlers

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, DriverLapInfoResponse, DriverLapResponse, DriverResponse, DriversResponse, Path,
    PreloadResponse, Query, SessionQuery, SessionResponse, TimingResponse,
};
use crate::domain::SessionKey;

/// `{year}/{event}/{session_type}` path segment
#[derive(Debug, Clone, Deserialize)]
pub struct SessionPath {
    pub year: i32,
    pub event: String,
    pub session_type: String,
}

impl SessionPath {
    pub fn key(&self, telemetry: bool) -> SessionKey {
        SessionKey::new(self.year, &self.event, &self.session_type, telemetry)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DriverPath {
    pub year: i32,
    pub event: String,
    pub session_type: String,
    pub driver_code: String,
}

impl DriverPath {
    pub fn key(&self, telemetry: bool) -> SessionKey {
        SessionKey::new(self.year, &self.event, &self.session_type, telemetry)
    }
}

/// GET /api/session/{year}/{event}/{session_type}
pub async fn get_session(
    State(state): State<AppState>,
    Path(path): Path<SessionPath>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<SessionResponse>, ApiError> {
    let key = path.key(query.telemetry);
    debug!(cache_key = %key, "Getting session");

    let lookup = state
        .session_service
        .load(&key)
        .await
        .map_err(|e| ApiError::from(e).with_message("Failed to load session data"))?;

    Ok(Json(SessionResponse::from(&lookup)))
}

/// GET /api/session/{year}/{event}/{session_type}/preload
pub async fn preload_session(
    State(state): State<AppState>,
    Path(path): Path<SessionPath>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<PreloadResponse>, ApiError> {
    let key = path.key(query.telemetry);

    let lookup = state
        .session_service
        .load(&key)
        .await
        .map_err(|e| ApiError::from(e).with_message("Failed to preload session"))?;

    info!(cache_key = %key, already_cached = lookup.hit, "Session preloaded");

    Ok(Json(PreloadResponse::from(&lookup)))
}

/// GET /api/session/{year}/{event}/{session_type}/drivers
pub async fn list_drivers(
    State(state): State<AppState>,
    Path(path): Path<SessionPath>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<DriversResponse>, ApiError> {
    let key = path.key(query.telemetry);
    debug!(cache_key = %key, "Listing drivers");

    let lookup = state
        .session_service
        .load(&key)
        .await
        .map_err(|e| ApiError::from(e).with_message("Failed to get drivers list"))?;

    let drivers = lookup
        .entry
        .session()
        .drivers()
        .iter()
        .map(DriverResponse::from)
        .collect();

    Ok(Json(DriversResponse {
        success: true,
        drivers,
    }))
}

/// GET /api/session/{year}/{event}/{session_type}/laps/{driver_code}
pub async fn driver_fastest_lap(
    State(state): State<AppState>,
    Path(path): Path<DriverPath>,
) -> Result<Json<DriverLapInfoResponse>, ApiError> {
    let key = path.key(true);
    debug!(cache_key = %key, driver = %path.driver_code, "Getting driver fastest lap");

    let report = state
        .session_service
        .driver_fastest_lap(&key, &path.driver_code)
        .await
        .map_err(|e| {
            ApiError::from(e).with_message(format!(
                "Failed to get lap info for driver {}",
                path.driver_code
            ))
        })?;

    Ok(Json(DriverLapInfoResponse {
        success: true,
        lap: DriverLapResponse::from(&report.lap),
        timing: TimingResponse::from_lookup(&report.lookup),
    }))
}
