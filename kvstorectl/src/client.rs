//! HTTP client for communicating with the kvstore gateway.

use anyhow::{Context, Result};
use async_trait::async_trait;
use kvstore_core::api::{
    self, DeleteRangeRequest, DeleteRangeResponse, RangeRequest, RangeResponse,
};
use kvstore_core::StoreError;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::store::KvStore;

/// Normalize a server URL by removing trailing slashes.
fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// HTTP client for the kvstore gateway's JSON API.
///
/// Every call is a single POST round trip. Failures are reported as
/// [`StoreError`] values and never retried; the command decides what a
/// failure means.
///
/// # Examples
///
/// ```no_run
/// use kvstorectl::client::KvClient;
/// use kvstorectl::store::KvStore;
/// use kvstore_core::api::DeleteRangeRequest;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = KvClient::new("http://localhost:2379", 5)?;
/// let resp = client.delete(DeleteRangeRequest::single("foo")).await?;
/// println!("deleted {}", resp.deleted);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct KvClient {
    client: Client,
    base_url: String,
}

impl KvClient {
    /// Create a client for the gateway at `endpoint`.
    ///
    /// No connection is made until the first call.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Base URL of the gateway (e.g., "http://localhost:2379")
    /// * `timeout_secs` - Per-request timeout in seconds
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("kvstorectl/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: normalize_url(endpoint),
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Map a failed send to a store error.
    fn transport_error(err: reqwest::Error, endpoint: &str) -> StoreError {
        if err.is_timeout() {
            StoreError::DeadlineExceeded
        } else if err.is_connect() {
            StoreError::Unavailable(format!("cannot reach {}: {}", endpoint, err))
        } else {
            StoreError::Transport(format!("{}: {}", endpoint, err))
        }
    }

    /// Process an HTTP response and extract the API data.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP status code indicates failure (4xx or 5xx)
    /// - The response body cannot be read or deserialized
    /// - The API returns an error envelope
    async fn handle_response<T: DeserializeOwned>(
        response: Response,
        endpoint: &str,
    ) -> Result<T, StoreError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Self::transport_error(e, endpoint))?;

        if !status.is_success() {
            let message = match status {
                StatusCode::NOT_FOUND => "endpoint not found".to_string(),
                StatusCode::UNAUTHORIZED => "unauthorized".to_string(),
                StatusCode::FORBIDDEN => "access forbidden".to_string(),
                StatusCode::SERVICE_UNAVAILABLE if text.is_empty() => {
                    "service unavailable".to_string()
                }
                _ => text,
            };
            return Err(StoreError::Status {
                code: status.as_u16(),
                endpoint: endpoint.to_string(),
                message,
            });
        }

        let api_response: api::ApiResponse<T> =
            serde_json::from_str(&text).map_err(|e| StoreError::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        match api_response {
            api::ApiResponse::Success { data } => Ok(data),
            api::ApiResponse::Error { error } => Err(StoreError::Server {
                endpoint: endpoint.to_string(),
                message: error,
            }),
        }
    }

    /// POST a JSON body to `path` and decode the enveloped reply.
    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, StoreError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let endpoint = path.trim_start_matches('/');
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Self::transport_error(e, endpoint))?;

        Self::handle_response(response, endpoint).await
    }
}

#[async_trait]
impl KvStore for KvClient {
    async fn get(&self, request: RangeRequest) -> Result<RangeResponse, StoreError> {
        self.post(api::RANGE_PATH, &request).await
    }

    async fn delete(
        &self,
        request: DeleteRangeRequest,
    ) -> Result<DeleteRangeResponse, StoreError> {
        self.post(api::DELETE_RANGE_PATH, &request).await
    }
}
