//! HTTP seam for the emote API.
//!
//! All outbound GETs go through the [`EmoteGateway`] trait so the failover
//! and probe logic can be exercised against scripted responses; the real
//! implementation wraps a shared `reqwest` client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT};
use thiserror::Error;
use url::Url;

/// One received HTTP response, whatever its status.
#[derive(Debug, Clone)]
pub struct GatewayReply {
    pub status: u16,
    pub body: String,
    pub elapsed: Duration,
}

/// Tagged outcome of a single endpoint attempt.
///
/// `BadStatus` is produced by the callers when a reply arrives with a
/// non-200 status; the gateway itself only reports transport-level failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    #[error("Timeout")]
    Timeout,

    #[error("Connection Error")]
    Connect,

    #[error("HTTP {0}")]
    BadStatus(u16),

    #[error("{0}")]
    Other(String),
}

/// Outbound GET capability with an explicit per-call timeout.
#[async_trait]
pub trait EmoteGateway: Send + Sync {
    async fn get(&self, url: &Url, timeout: Duration) -> Result<GatewayReply, AttemptError>;
}

/// Production gateway over a shared `reqwest` client.
pub struct HttpGateway {
    client: reqwest::Client,
}

impl HttpGateway {
    /// Build the gateway with the fixed request header set.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest` error if the TLS backend cannot be
    /// initialized.
    pub fn new() -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        // The upstream service expects browser-like traffic.
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
            ),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl EmoteGateway for HttpGateway {
    async fn get(&self, url: &Url, timeout: Duration) -> Result<GatewayReply, AttemptError> {
        let started = Instant::now();

        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_error)?;

        Ok(GatewayReply {
            status,
            body,
            elapsed: started.elapsed(),
        })
    }
}

fn classify_error(error: reqwest::Error) -> AttemptError {
    if error.is_timeout() {
        AttemptError::Timeout
    } else if error.is_connect() {
        AttemptError::Connect
    } else {
        AttemptError::Other(error.without_url().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempt_error_display_matches_user_facing_reasons() {
        assert_eq!(AttemptError::Timeout.to_string(), "Timeout");
        assert_eq!(AttemptError::Connect.to_string(), "Connection Error");
        assert_eq!(AttemptError::BadStatus(503).to_string(), "HTTP 503");
        assert_eq!(
            AttemptError::Other("tls handshake failed".into()).to_string(),
            "tls handshake failed"
        );
    }
}
