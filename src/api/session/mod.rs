//! Session data endpoints

pub mod sessions;
pub mod telemetry;

use axum::{routing::get, Router};

use super::state::AppState;

/// Routes under `/api/session`
pub fn create_session_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{year}/{event}/{session_type}",
            get(sessions::get_session),
        )
        .route(
            "/{year}/{event}/{session_type}/preload",
            get(sessions::preload_session),
        )
        .route(
            "/{year}/{event}/{session_type}/drivers",
            get(sessions::list_drivers),
        )
        .route(
            "/{year}/{event}/{session_type}/laps/{driver_code}",
            get(sessions::driver_fastest_lap),
        )
        .route(
            "/{year}/{event}/{session_type}/telemetry/{driver_code}",
            get(telemetry::get_telemetry),
        )
}
