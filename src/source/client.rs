//! HTTP accessor for the provider's read-only endpoints.
//!
//! Each call issues exactly one `GET` against a fixed path under the
//! configured base URL. There are no retries, no caching and no client-side
//! timeout: a hung request stays pending until the transport gives up.

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::RequestError;
use super::snapshot::{HealthReport, Status, UpstreamsResponse};

/// Path of the aggregated checkpoint status.
pub const STATUS_PATH: &str = "/status";
/// Path of the per-upstream table and consensus summary.
pub const UPSTREAMS_PATH: &str = "/api/upstreams";
/// Path of the liveness probe.
pub const HEALTH_PATH: &str = "/healthz";

/// Default provider address (the service's default listen port).
pub const DEFAULT_BASE_URL: &str = "http://localhost:5555";

/// Stateless client for the provider API.
///
/// Cloning is cheap; clones share the underlying connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use leanpoint_dash::ApiClient;
///
/// # tokio_test::block_on(async {
/// let client = ApiClient::builder().base_url("http://localhost:5555").build()?;
/// let status = client.fetch_status().await?;
/// println!("finalized slot {}", status.finalized_slot);
/// # Ok::<_, leanpoint_dash::RequestError>(())
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// The base URL all paths are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for one of the API paths.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the provider's aggregated status.
    pub async fn fetch_status(&self) -> Result<Status, RequestError> {
        self.get_json(STATUS_PATH).await
    }

    /// Fetch the upstream table and consensus summary.
    pub async fn fetch_upstreams(&self) -> Result<UpstreamsResponse, RequestError> {
        self.get_json(UPSTREAMS_PATH).await
    }

    /// Probe the provider's health endpoint.
    ///
    /// Any received response, success or not, maps to
    /// `HealthReport { healthy: status.is_success() }`. Only a request that
    /// never completes is returned as an error.
    pub async fn fetch_health(&self) -> Result<HealthReport, RequestError> {
        let url = self.url(HEALTH_PATH);
        debug!(%url, "probing health");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        Ok(HealthReport::from_response(response.status().is_success()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestError> {
        let url = self.url(path);
        debug!(%url, "fetching");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RequestError::from_status(response.status()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Builder for [`ApiClient`].
#[derive(Debug, Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
}

impl ApiClientBuilder {
    /// Set the provider base URL (default: `http://localhost:5555`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ApiClient, RequestError> {
        let client = Client::builder()
            .build()
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(ApiClient { client, base_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::test_server::{serve, status_json, unreachable_base_url, upstreams_json};
    use axum::{http::StatusCode, routing::get, Json, Router};

    #[test]
    fn test_builder_defaults() {
        let client = ApiClient::builder().build().unwrap();
        assert_eq!(client.base_url(), "http://localhost:5555");
        assert_eq!(client.url(STATUS_PATH), "http://localhost:5555/status");
    }

    #[test]
    fn test_builder_strips_trailing_slash() {
        let client = ApiClient::builder().base_url("http://node.local:9000/").build().unwrap();
        assert_eq!(client.url(UPSTREAMS_PATH), "http://node.local:9000/api/upstreams");
    }

    #[tokio::test]
    async fn test_fetch_status_ok() {
        let base = serve(Router::new().route("/status", get(|| async { Json(status_json()) }))).await;
        let client = ApiClient::builder().base_url(base).build().unwrap();

        let status = client.fetch_status().await.unwrap();
        assert_eq!(status.finalized_slot, 1200);
        assert_eq!(status.justified_slot, 1234);
    }

    #[tokio::test]
    async fn test_fetch_upstreams_ok() {
        let base =
            serve(Router::new().route("/api/upstreams", get(|| async { Json(upstreams_json()) })))
                .await;
        let client = ApiClient::builder().base_url(base).build().unwrap();

        let response = client.fetch_upstreams().await.unwrap();
        assert_eq!(response.upstreams.len(), 2);
        assert_eq!(response.upstreams[0].name, "zeam_0");
        assert!(response.consensus.unwrap().has_consensus);
    }

    #[tokio::test]
    async fn test_fetch_status_http_error() {
        let base = serve(
            Router::new().route("/status", get(|| async { StatusCode::SERVICE_UNAVAILABLE })),
        )
        .await;
        let client = ApiClient::builder().base_url(base).build().unwrap();

        let err = client.fetch_status().await.unwrap_err();
        assert_eq!(
            err,
            RequestError::Http {
                status: 503,
                reason: "Service Unavailable".to_string()
            }
        );
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    }

    #[tokio::test]
    async fn test_fetch_upstreams_missing_route_is_404() {
        let base = serve(Router::new()).await;
        let client = ApiClient::builder().base_url(base).build().unwrap();

        let err = client.fetch_upstreams().await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[tokio::test]
    async fn test_fetch_status_malformed_body() {
        let base = serve(Router::new().route("/status", get(|| async { "not json" }))).await;
        let client = ApiClient::builder().base_url(base).build().unwrap();

        let err = client.fetch_status().await.unwrap_err();
        assert!(matches!(err, RequestError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_status_wrong_shape() {
        let base = serve(
            Router::new().route("/status", get(|| async { Json(serde_json::json!({"slot": 1})) })),
        )
        .await;
        let client = ApiClient::builder().base_url(base).build().unwrap();

        let err = client.fetch_status().await.unwrap_err();
        assert!(matches!(err, RequestError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_status_unreachable() {
        let client = ApiClient::builder().base_url(unreachable_base_url().await).build().unwrap();

        let err = client.fetch_status().await.unwrap_err();
        assert!(matches!(err, RequestError::Transport(_)));
    }

    #[tokio::test]
    async fn test_fetch_health_maps_status_to_boolean() {
        let base = serve(
            Router::new().route("/healthz", get(|| async { StatusCode::OK })),
        )
        .await;
        let client = ApiClient::builder().base_url(base).build().unwrap();
        assert!(client.fetch_health().await.unwrap().healthy);

        let base = serve(
            Router::new().route("/healthz", get(|| async { StatusCode::INTERNAL_SERVER_ERROR })),
        )
        .await;
        let client = ApiClient::builder().base_url(base).build().unwrap();
        let report = client.fetch_health().await.unwrap();
        assert!(!report.healthy);
        assert!(report.reason.is_none());
    }

    #[tokio::test]
    async fn test_fetch_health_unreachable_is_error() {
        let client = ApiClient::builder().base_url(unreachable_base_url().await).build().unwrap();
        assert!(matches!(
            client.fetch_health().await,
            Err(RequestError::Transport(_))
        ));
    }
}
