//! Transports: the seam between the request contract and an HTTP stack.

use crate::error::ClientError;
use crate::request::{ApiRequest, JSON_CONTENT_TYPE, Method, RawResponse};
use async_trait::async_trait;
use landwatch_core::BackendConfig;
use reqwest::{Client, header};
use std::time::Duration;

/// Sends one request and returns the raw response.
///
/// Implementations report only failures to obtain a response; status
/// classification happens in [`RawResponse::classify`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError>;
}

/// Reqwest-backed transport against one backend base URL.
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Build a transport with an explicit request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|e| ClientError::Transport(format!("invalid base URL '{base_url}': {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, ClientError> {
        Self::new(&config.base_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.base_url, request.path_and_query())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        let url = self.url_for(&request);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, &url)
            .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            let bytes = serde_json::to_vec(body).map_err(|e| ClientError::Encode(e.to_string()))?;
            builder = builder.body(bytes);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::debug!(url = %url, error = %e, "Transport failure");
            ClientError::Transport(e.to_string())
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.ok();

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalised() {
        let transport = ReqwestTransport::new("http://localhost:5000/", Duration::from_secs(5)).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:5000");

        let req = ApiRequest::new(Method::Get, "/api/reports")
            .with_query(vec![("ward".to_string(), "7".to_string())]);
        assert_eq!(transport.url_for(&req), "http://localhost:5000/api/reports?ward=7");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(ReqwestTransport::new("not a url", Duration::from_secs(5)).is_err());
    }
}
