//! Telemetry endpoint handler

use axum::{extract::State, Json};
use tracing::{debug, info};

use super::sessions::DriverPath;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Path, Query, TelemetryQuery, TelemetryResponse, TimingResponse};
use crate::domain::TelemetryOutcome;

/// GET /api/session/{year}/{event}/{session_type}/telemetry/{driver_code}?lap={n}
pub async fn get_telemetry(
    State(state): State<AppState>,
    Path(path): Path<DriverPath>,
    Query(query): Query<TelemetryQuery>,
) -> Result<Json<TelemetryResponse>, ApiError> {
    let key = path.key(true);
    debug!(cache_key = %key, driver = %path.driver_code, lap = ?query.lap, "Getting telemetry");

    let service = &state.session_service;
    let report = service
        .telemetry(&key, &path.driver_code, query.lap)
        .await
        .map_err(|e| {
            ApiError::from(e).with_message(format!(
                "Failed to get telemetry for driver {}",
                path.driver_code
            ))
        })?;

    let timing = TimingResponse::from_lookup(&report.lookup).with_processing(report.processing);

    match report.outcome {
        TelemetryOutcome::Found(telemetry) => {
            info!(
                cache_key = %key,
                driver = %telemetry.driver_code,
                lap = telemetry.lap_number,
                points = telemetry.sampled.points.len(),
                "Telemetry served"
            );

            Ok(Json(TelemetryResponse::new(
                telemetry,
                timing,
                service.sampler().target(),
            )))
        }
        missing @ TelemetryOutcome::LapNotFound { .. } => {
            let error = missing.message().unwrap_or_default();
            Err(ApiError::bad_request(error)
                .with_message("Requested lap not found")
                .with_empty_data_points())
        }
    }
}
