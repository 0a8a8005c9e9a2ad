//! Health check and API help endpoints

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub message: String,
    pub version: String,
}

/// Health check status
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// API help listing every endpoint
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: String,
    pub version: String,
    pub endpoints: Vec<EndpointDoc>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// Every route served by the application
pub const ENDPOINTS: &[EndpointDoc] = &[
    EndpointDoc {
        method: "GET",
        path: "/",
        description: "This help message",
    },
    EndpointDoc {
        method: "GET",
        path: "/api/health",
        description: "Health check",
    },
    EndpointDoc {
        method: "GET",
        path: "/api/session/{year}/{event}/{session_type}",
        description: "Load (or reuse) a session and return its summary",
    },
    EndpointDoc {
        method: "GET",
        path: "/api/session/{year}/{event}/{session_type}/preload",
        description: "Load a session into the cache",
    },
    EndpointDoc {
        method: "GET",
        path: "/api/session/{year}/{event}/{session_type}/drivers",
        description: "Drivers of a session",
    },
    EndpointDoc {
        method: "GET",
        path: "/api/session/{year}/{event}/{session_type}/laps/{driver_code}",
        description: "Fastest lap of a driver",
    },
    EndpointDoc {
        method: "GET",
        path: "/api/session/{year}/{event}/{session_type}/telemetry/{driver_code}?lap={n}",
        description: "Sampled telemetry of the fastest or given lap",
    },
    EndpointDoc {
        method: "GET",
        path: "/api/cache/status",
        description: "On-disk response cache status",
    },
    EndpointDoc {
        method: "GET",
        path: "/api/cache/sessions",
        description: "Sessions held in memory",
    },
    EndpointDoc {
        method: "GET",
        path: "/api/cache/sessions/clear",
        description: "Drop every session held in memory",
    },
];

const RUNNING: &str = "F1 Telemetry API is running";

/// GET /api/health
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        message: RUNNING.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// GET /
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: RUNNING.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: ENDPOINTS.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            message: RUNNING.to_string(),
            version: "1.0.0".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"version\":\"1.0.0\""));
        assert!(json.contains("is running"));
    }

    #[test]
    fn test_endpoint_list_covers_api() {
        assert!(ENDPOINTS.iter().any(|e| e.path == "/api/health"));
        assert!(ENDPOINTS.iter().any(|e| e.path.contains("/telemetry/")));
        assert!(ENDPOINTS.iter().all(|e| e.method == "GET"));
    }
}
