//! Sequential failover fetch over the endpoint registry.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::domain::EmoteRequest;
use crate::relay::endpoint::EndpointRegistry;
use crate::relay::gateway::{AttemptError, EmoteGateway};

/// Maximum length of the response-body snippet kept on success.
const BODY_SNIPPET_CHARS: usize = 200;

/// Maximum length of the aggregated failure summary.
const SUMMARY_CHARS: usize = 300;

/// Synthetic status reported when every endpoint failed.
const EXHAUSTED_STATUS: u16 = 500;

/// Successful fetch attributed to one endpoint.
#[derive(Debug, Clone)]
pub struct FetchSuccess {
    pub endpoint: &'static str,
    pub status: u16,
    pub elapsed: Duration,
    pub body_snippet: String,
}

/// One endpoint's failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointFailure {
    pub endpoint: &'static str,
    pub error: AttemptError,
}

/// Failure after exhausting every endpoint.
#[derive(Debug, Clone)]
pub struct FetchFailure {
    pub attempts: Vec<EndpointFailure>,
    pub status: u16,
}

/// Outcome of one emote send: binary success/failure per user-visible
/// contract, even though up to two endpoints were tried internally.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Success(FetchSuccess),
    Failure(FetchFailure),
}

impl FetchFailure {
    /// Per-endpoint reasons joined with `" | "`, bounded for display.
    #[must_use]
    pub fn summary(&self) -> String {
        let joined = self
            .attempts
            .iter()
            .map(|a| format!("{}: {}", a.endpoint, a.error))
            .collect::<Vec<_>>()
            .join(" | ");

        truncate_chars(&joined, SUMMARY_CHARS)
    }
}

impl FetchOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Tries each endpoint once, in registry order, returning on the first
/// HTTP 200. No retries, no backoff, no caching: every call is fresh I/O.
pub struct FailoverFetcher {
    gateway: Arc<dyn EmoteGateway>,
    registry: EndpointRegistry,
    timeout: Duration,
}

impl FailoverFetcher {
    #[must_use]
    pub fn new(gateway: Arc<dyn EmoteGateway>, registry: EndpointRegistry, timeout: Duration) -> Self {
        Self {
            gateway,
            registry,
            timeout,
        }
    }

    /// Relay one emote request through the endpoint list.
    ///
    /// Any non-200 status is treated exactly like a transport failure: the
    /// next endpoint is tried without inspecting the response body.
    pub async fn send_emote(&self, request: &EmoteRequest) -> FetchOutcome {
        let mut attempts = Vec::with_capacity(self.registry.len());

        for endpoint in self.registry.iter() {
            info!(
                endpoint = endpoint.name(),
                uid = request.uid(),
                "Trying emote endpoint"
            );

            let url = endpoint.send_url(request);
            let attempt = match self.gateway.get(&url, self.timeout).await {
                Ok(reply) if reply.status == 200 => {
                    info!(
                        endpoint = endpoint.name(),
                        elapsed_ms = reply.elapsed.as_millis() as u64,
                        "Emote sent"
                    );
                    return FetchOutcome::Success(FetchSuccess {
                        endpoint: endpoint.name(),
                        status: reply.status,
                        elapsed: reply.elapsed,
                        body_snippet: body_snippet(&reply.body),
                    });
                }
                Ok(reply) => {
                    warn!(
                        endpoint = endpoint.name(),
                        status = reply.status,
                        "Endpoint returned non-200 status"
                    );
                    AttemptError::BadStatus(reply.status)
                }
                Err(err) => {
                    error!(endpoint = endpoint.name(), error = %err, "Endpoint attempt failed");
                    err
                }
            };

            attempts.push(EndpointFailure {
                endpoint: endpoint.name(),
                error: attempt,
            });
        }

        let failure = FetchFailure {
            attempts,
            status: EXHAUSTED_STATUS,
        };
        error!(summary = %failure.summary(), "All emote endpoints failed");
        FetchOutcome::Failure(failure)
    }
}

fn body_snippet(body: &str) -> String {
    if body.is_empty() {
        return "No content".to_string();
    }
    truncate_chars(body, BODY_SNIPPET_CHARS)
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
