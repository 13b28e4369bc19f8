//! HTTP transport seam
//!
//! [`Transport`] is the only place network I/O happens. [`HttpTransport`] is
//! the `reqwest` implementation; tests substitute their own.

use crate::config::Config;
use crate::error::TransportError;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};

const USER_AGENT_STRING: &str = concat!("star-fetch/", env!("CARGO_PKG_VERSION"));

/// HTTP GET operations used by the pipeline
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` and return the full response body
    ///
    /// Non-success status codes are reported as [`TransportError::Status`].
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError>;

    /// GET `url` and stream the response body into `sink`
    ///
    /// Returns the number of bytes written. Bytes already written stay in
    /// `sink` if the stream breaks off.
    async fn stream_to(
        &self,
        url: &str,
        sink: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> Result<u64, TransportError>;
}

/// `reqwest`-backed transport with request and connect timeouts
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client from the configured timeouts
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        Self::with_timeouts(config.request_timeout, config.connect_timeout)
    }

    /// Build a client with explicit timeouts
    pub fn with_timeouts(request: Duration, connect: Duration) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_STRING));
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));

        let client = Client::builder()
            .timeout(request)
            .connect_timeout(connect)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Client(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, TransportError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                tracing::warn!(url = %url, "request timed out");
            } else if e.is_connect() {
                tracing::warn!(url = %url, error = %e, "connection failed");
            }
            TransportError::Request(e)
        })?;

        let status = response.status();
        tracing::debug!(url = %url, status = %status, "received response");
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let response = self.send(url).await?;
        let body = response.bytes().await?;
        Ok(body.to_vec())
    }

    async fn stream_to(
        &self,
        url: &str,
        sink: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> Result<u64, TransportError> {
        let response = self.send(url).await?;

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            sink.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        sink.flush().await?;

        Ok(written)
    }
}
