//! HTTP client for the OpenF1 REST API

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::DomainError;
use crate::infrastructure::cache::DiskCache;

pub(super) const PROVIDER: &str = "openf1";

/// JSON client with an optional on-disk response cache
#[derive(Debug, Clone)]
pub struct OpenF1Client {
    http: reqwest::Client,
    base_url: String,
    disk_cache: Option<DiskCache>,
}

impl OpenF1Client {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            disk_cache: None,
        })
    }

    pub fn with_disk_cache(mut self, disk_cache: DiskCache) -> Self {
        self.disk_cache = Some(disk_cache);
        self
    }

    /// Build a request URL. Filters are `(field+operator, value)` pairs such
    /// as `("session_key=", "9523")` or `("date>=", "2024-05-25T14:00:00")`.
    pub fn url(&self, endpoint: &str, filters: &[(&str, String)]) -> String {
        let query = filters
            .iter()
            .map(|(field, value)| format!("{}{}", field, value))
            .collect::<Vec<_>>()
            .join("&");

        if query.is_empty() {
            format!("{}/{}", self.base_url, endpoint)
        } else {
            format!("{}/{}?{}", self.base_url, endpoint, query)
        }
    }

    /// Fetch a list endpoint; an upstream 404 means no rows matched
    pub async fn get_list<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, DomainError> {
        if let Some(cache) = &self.disk_cache {
            if let Some(body) = cache.read(url).await {
                match serde_json::from_str(&body) {
                    Ok(rows) => return Ok(rows),
                    Err(e) => warn!(url = %url, error = %e, "Discarding unreadable cache entry"),
                }
            }
        }

        debug!(url = %url, "Requesting OpenF1");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::provider(PROVIDER, format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let body = response.text().await.map_err(|e| {
            DomainError::provider(PROVIDER, format!("Failed to read response: {}", e))
        })?;

        if !status.is_success() {
            return Err(DomainError::provider(
                PROVIDER,
                format!("HTTP {}: {}", status, body),
            ));
        }

        let rows: Vec<T> = serde_json::from_str(&body).map_err(|e| {
            DomainError::provider(PROVIDER, format!("Failed to parse response: {}", e))
        })?;

        // Empty answers usually mean the data is not published yet
        if let Some(cache) = self.disk_cache.as_ref().filter(|_| !rows.is_empty()) {
            if let Err(e) = cache.write(url, &body).await {
                warn!(url = %url, error = %e, "Failed to cache OpenF1 response");
            }
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        value: u32,
    }

    fn client(server: &MockServer) -> OpenF1Client {
        OpenF1Client::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_url_building() {
        let client = OpenF1Client::new("https://api.openf1.org/v1/", Duration::from_secs(1)).unwrap();

        assert_eq!(client.url("meetings", &[]), "https://api.openf1.org/v1/meetings");
        assert_eq!(
            client.url(
                "car_data",
                &[
                    ("session_key=", "9523".to_string()),
                    ("date>=", "2024-05-25T14:00:00".to_string()),
                ]
            ),
            "https://api.openf1.org/v1/car_data?session_key=9523&date>=2024-05-25T14:00:00"
        );
    }

    #[tokio::test]
    async fn test_get_list_parses_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/meetings"))
            .and(query_param("year", "2024"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"value": 1}, {"value": 2}])),
            )
            .mount(&server)
            .await;

        let client = client(&server);
        let url = client.url("meetings", &[("year=", "2024".to_string())]);
        let rows: Vec<Row> = client.get_list(&url).await.unwrap();

        assert_eq!(rows, vec![Row { value: 1 }, Row { value: 2 }]);
    }

    #[tokio::test]
    async fn test_not_found_is_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"detail": "No results found."})),
            )
            .mount(&server)
            .await;

        let client = client(&server);
        let rows: Vec<Row> = client.get_list(&client.url("laps", &[])).await.unwrap();

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = client(&server);
        let result: Result<Vec<Row>, _> = client.get_list(&client.url("laps", &[])).await;

        match result {
            Err(DomainError::Provider { provider, message }) => {
                assert_eq!(provider, "openf1");
                assert!(message.contains("500"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_disk_cache_serves_repeat_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/drivers"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([{"value": 7}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = client(&server).with_disk_cache(DiskCache::new(dir.path()));
        let url = client.url("drivers", &[("session_key=", "1".to_string())]);

        let first: Vec<Row> = client.get_list(&url).await.unwrap();
        let second: Vec<Row> = client.get_list(&url).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_empty_response_is_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/laps"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/laps"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"value": 1}, {"value": 2}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = client(&server).with_disk_cache(DiskCache::new(dir.path()));
        let url = client.url("laps", &[("session_key=", "9523".to_string())]);

        let first: Vec<Row> = client.get_list(&url).await.unwrap();
        assert!(first.is_empty());
        assert!(!dir.path().exists() || std::fs::read_dir(dir.path()).unwrap().count() == 0);

        let second: Vec<Row> = client.get_list(&url).await.unwrap();
        let third: Vec<Row> = client.get_list(&url).await.unwrap();

        assert_eq!(second.len(), 2);
        assert_eq!(third, second);
    }

    #[tokio::test]
    async fn test_expired_cache_entry_is_refetched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/meetings"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([{"value": 1}])),
            )
            .expect(2)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = client(&server)
            .with_disk_cache(DiskCache::new(dir.path()).with_ttl(Duration::ZERO));
        let url = client.url("meetings", &[("year=", "2024".to_string())]);

        client.get_list::<Row>(&url).await.unwrap();
        client.get_list::<Row>(&url).await.unwrap();
    }
}
