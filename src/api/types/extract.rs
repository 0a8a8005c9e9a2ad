//! Path and query extractors that reject with the API error body

use axum::{
    extract::{rejection::PathRejection, rejection::QueryRejection, FromRequestParts},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Wrapper around `axum::extract::Path` returning `ApiError` on failure
#[derive(Debug, Clone, Copy, Default)]
pub struct Path<T>(pub T);

/// Wrapper around `axum::extract::Query` returning `ApiError` on failure
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<T>(pub T);

impl<S, T> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Path(value)),
            Err(rejection) => Err(path_error(&rejection)),
        }
    }
}

impl<S, T> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Query::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Query(value)) => Ok(Query(value)),
            Err(rejection) => Err(query_error(&rejection)),
        }
    }
}

fn path_error(rejection: &PathRejection) -> ApiError {
    ApiError::bad_request(rejection.body_text()).with_message("Invalid path parameters")
}

fn query_error(rejection: &QueryRejection) -> ApiError {
    ApiError::bad_request(rejection.body_text()).with_message("Invalid query parameters")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct LapQuery {
        lap: Option<u32>,
    }

    async fn query(uri: &str) -> Result<Query<LapQuery>, ApiError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        Query::<LapQuery>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_query_parses() {
        let Query(q) = query("/telemetry/NOR?lap=12").await.unwrap();
        assert_eq!(q.lap, Some(12));

        let Query(q) = query("/telemetry/NOR").await.unwrap();
        assert_eq!(q.lap, None);
    }

    #[tokio::test]
    async fn test_query_rejection_is_bad_request() {
        let err = query("/telemetry/NOR?lap=fast").await.unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(!err.response.success);
        assert_eq!(err.response.message, "Invalid query parameters");
    }
}
