//! Endpoint reachability probe backing the /status command.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::relay::endpoint::EndpointRegistry;
use crate::relay::gateway::{AttemptError, EmoteGateway};

/// Probe result for one endpoint.
///
/// Unlike the send path, any received HTTP status counts as online here:
/// the probe measures reachability of the service root, not emote-send
/// correctness.
#[derive(Debug, Clone)]
pub struct EndpointHealth {
    pub endpoint: &'static str,
    pub result: Result<ProbeReply, AttemptError>,
}

#[derive(Debug, Clone)]
pub struct ProbeReply {
    pub status: u16,
    pub latency: Duration,
}

impl EndpointHealth {
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.result.is_ok()
    }
}

/// Probes every endpoint's base path independently; one endpoint being down
/// never short-circuits the check of the others.
pub struct StatusProber {
    gateway: Arc<dyn EmoteGateway>,
    registry: EndpointRegistry,
    timeout: Duration,
}

impl StatusProber {
    #[must_use]
    pub fn new(gateway: Arc<dyn EmoteGateway>, registry: EndpointRegistry, timeout: Duration) -> Self {
        Self {
            gateway,
            registry,
            timeout,
        }
    }

    pub async fn probe_all(&self) -> Vec<EndpointHealth> {
        let mut results = Vec::with_capacity(self.registry.len());

        for endpoint in self.registry.iter() {
            let url = endpoint.probe_url();
            let result = match self.gateway.get(&url, self.timeout).await {
                Ok(reply) => {
                    debug!(
                        endpoint = endpoint.name(),
                        status = reply.status,
                        latency_ms = reply.elapsed.as_millis() as u64,
                        "Endpoint reachable"
                    );
                    Ok(ProbeReply {
                        status: reply.status,
                        latency: reply.elapsed,
                    })
                }
                Err(err) => {
                    warn!(endpoint = endpoint.name(), error = %err, "Endpoint unreachable");
                    Err(err)
                }
            };

            results.push(EndpointHealth {
                endpoint: endpoint.name(),
                result,
            });
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::testkit::gateway::ScriptedGateway;

    fn prober(gateway: ScriptedGateway) -> StatusProber {
        let registry = EndpointRegistry::from_config(&ApiConfig::default()).unwrap();
        StatusProber::new(Arc::new(gateway), registry, Duration::from_secs(15))
    }

    #[tokio::test]
    async fn probes_every_endpoint_without_short_circuit() {
        let gateway = ScriptedGateway::new()
            .with_results(vec![Err(AttemptError::Connect), ScriptedGateway::ok(200, "ok")]);
        let calls = gateway.call_count_handle();

        let health = prober(gateway).probe_all().await;

        assert_eq!(health.len(), 2);
        assert!(!health[0].is_online());
        assert!(health[1].is_online());
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn any_received_status_counts_as_online() {
        let gateway = ScriptedGateway::new().with_results(vec![
            ScriptedGateway::ok(404, "not found"),
            ScriptedGateway::ok(500, "boom"),
        ]);

        let health = prober(gateway).probe_all().await;

        assert!(health.iter().all(EndpointHealth::is_online));
        assert_eq!(health[0].result.as_ref().unwrap().status, 404);
        assert_eq!(health[1].result.as_ref().unwrap().status, 500);
    }

    #[tokio::test]
    async fn probe_hits_the_base_path_not_the_send_path() {
        let gateway = ScriptedGateway::new()
            .with_results(vec![ScriptedGateway::ok(200, "ok"), ScriptedGateway::ok(200, "ok")]);
        let urls = gateway.requested_urls_handle();

        let _ = prober(gateway).probe_all().await;

        for url in urls.lock().iter() {
            assert!(!url.contains("/join"));
        }
    }
}
