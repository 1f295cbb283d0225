//! Seoul bus arrival HTTP client.
//!
//! Queries `getArrInfoByRouteAll`, which returns the next two buses at
//! every station of one route. Handles the service key, request limits
//! and conversion to domain types.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{ArrivalItem, RouteId};

use super::convert::decode_arrivals;
use super::error::ArrivalFeedError;

/// Default base URL for the arrival API.
const DEFAULT_BASE_URL: &str = "http://ws.bus.go.kr/api/rest/arrive";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the arrival client.
#[derive(Debug, Clone)]
pub struct SeoulBusConfig {
    /// Service key issued by the public data portal
    pub service_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SeoulBusConfig {
    /// Create a new config with the given service key.
    pub fn new(service_key: impl Into<String>) -> Self {
        Self {
            service_key: service_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Arrival API client.
///
/// Uses a semaphore to limit concurrent requests and avoid the
/// per-key request quota kicking in mid-run.
#[derive(Debug, Clone)]
pub struct SeoulBusClient {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
    semaphore: Arc<Semaphore>,
}

impl SeoulBusClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails with `NotConfigured` if the service key is blank, or the
    /// concurrency limit or timeout is zero.
    pub fn new(config: SeoulBusConfig) -> Result<Self, ArrivalFeedError> {
        let service_key = config.service_key.trim().to_string();
        if service_key.is_empty() {
            return Err(ArrivalFeedError::NotConfigured(
                "service key is empty".to_string(),
            ));
        }

        if config.max_concurrent == 0 {
            return Err(ArrivalFeedError::NotConfigured(
                "max_concurrent must be at least 1".to_string(),
            ));
        }

        if config.timeout_secs == 0 {
            return Err(ArrivalFeedError::NotConfigured(
                "timeout must be at least 1 second".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            service_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Get current arrivals at every station of a route.
    pub async fn get_route_arrivals(
        &self,
        route: &RouteId,
    ) -> Result<Vec<ArrivalItem>, ArrivalFeedError> {
        let body = self.get_route_arrivals_raw(route).await?;
        decode_arrivals(route, &body)
    }

    /// Get the raw response body for a route (for debugging/testing).
    pub async fn get_route_arrivals_raw(&self, route: &RouteId) -> Result<String, ArrivalFeedError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ArrivalFeedError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/getArrInfoByRouteAll", self.base_url);
        debug!(route = %route, "fetching route arrivals");

        // Keys issued pre-encoded must not be encoded a second time
        let request = if self.service_key.contains('%') {
            self.http
                .get(format!("{url}?serviceKey={}", self.service_key))
                .query(&[("busRouteId", route.as_str())])
        } else {
            self.http.get(&url).query(&[
                ("serviceKey", self.service_key.as_str()),
                ("busRouteId", route.as_str()),
            ])
        };

        let response = request.send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ArrivalFeedError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ArrivalFeedError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArrivalFeedError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = SeoulBusConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.service_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = SeoulBusConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn client_creation() {
        let client = SeoulBusClient::new(SeoulBusConfig::new("test-key"));
        assert!(client.is_ok());
    }

    #[test]
    fn blank_key_rejected_at_construction() {
        let err = SeoulBusClient::new(SeoulBusConfig::new("  ")).unwrap_err();
        assert!(matches!(err, ArrivalFeedError::NotConfigured(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn zero_concurrency_rejected() {
        let err = SeoulBusClient::new(SeoulBusConfig::new("k").with_max_concurrent(0)).unwrap_err();
        assert!(matches!(err, ArrivalFeedError::NotConfigured(_)));
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = SeoulBusClient::new(SeoulBusConfig::new("k").with_timeout(0)).unwrap_err();
        assert!(matches!(err, ArrivalFeedError::NotConfigured(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn trailing_slash_trimmed_from_base_url() {
        let client =
            SeoulBusClient::new(SeoulBusConfig::new("k").with_base_url("http://localhost:9/"))
                .unwrap();
        assert_eq!(client.base_url, "http://localhost:9");
    }
}
