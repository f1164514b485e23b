use crate::config::TtsConfig;
use crate::credential::ApiKey;
use crate::{Error, ErrorContext, Result};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Proxy;
use std::time::Duration;
use tracing::debug;

/// Header carrying the credential on every request.
pub const API_KEY_HEADER: &str = "xi-api-key";

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

/// A fully read response. The body is buffered because audio payloads are returned whole.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Turn a non-2xx response into [`Error::Remote`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::remote(self.status, self.text()))
        }
    }
}

impl HttpTransport {
    pub fn new(config: &TtsConfig, api_key: &ApiKey) -> Result<Self> {
        let mut key_value = HeaderValue::from_str(api_key.expose()).map_err(|_| {
            Error::configuration_with_context(
                "API key contains characters not allowed in an HTTP header",
                ErrorContext::new().with_field_path("api_key"),
            )
        })?;
        key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(8)
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid proxy URL: {}", e),
                    ErrorContext::new().with_field_path("proxy_url"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(client_build_error)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<RawResponse> {
        let url = self.url(path);
        debug!(method = "POST", %url, "sending request");
        let request = self.client.post(&url).json(body);
        Self::execute(request).await
    }

    pub async fn get(&self, path: &str) -> Result<RawResponse> {
        let url = self.url(path);
        debug!(method = "GET", %url, "sending request");
        Self::execute(self.client.get(&url)).await
    }

    async fn execute(request: reqwest::RequestBuilder) -> Result<RawResponse> {
        let response = request.send().await.map_err(TransportError::from)?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(TransportError::from)?;
        debug!(status, bytes = body.len(), "response received");
        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

fn client_build_error(e: reqwest::Error) -> Error {
    Error::configuration_with_context(
        format!("Failed to create HTTP client: {}", e),
        ErrorContext::new().with_source("transport"),
    )
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e.to_string())
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Http(e)
        }
    }
}
