//! End-to-end failover behavior over the public crate API.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use emoterelay::config::ApiConfig;
use emoterelay::domain::{EmoteRequest, RelayStats};
use emoterelay::relay::{
    AttemptError, EndpointRegistry, FailoverFetcher, FetchOutcome, StatusProber,
};
use emoterelay::testkit::ScriptedGateway;

fn registry() -> EndpointRegistry {
    EndpointRegistry::from_config(&ApiConfig::default()).unwrap()
}

fn request() -> EmoteRequest {
    EmoteRequest::new("8552785", "11987556088", "909000065").unwrap()
}

fn fetcher(gateway: ScriptedGateway) -> FailoverFetcher {
    FailoverFetcher::new(Arc::new(gateway), registry(), Duration::from_secs(60))
}

#[tokio::test]
async fn primary_win_never_touches_the_secondary() {
    let gateway = ScriptedGateway::new().with_results(vec![ScriptedGateway::ok(200, "sent")]);
    let calls = gateway.call_count_handle();
    let urls = gateway.requested_urls_handle();

    let outcome = fetcher(gateway).send_emote(&request()).await;

    let FetchOutcome::Success(success) = outcome else {
        panic!("expected success");
    };
    assert_eq!(success.endpoint, "Primary API");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(urls.lock()[0].contains("fast-api-2"));
}

#[tokio::test]
async fn timeout_on_primary_fails_over_to_secondary() {
    let gateway = ScriptedGateway::new().with_results(vec![
        Err(AttemptError::Timeout),
        ScriptedGateway::ok(200, "sent"),
    ]);

    let outcome = fetcher(gateway).send_emote(&request()).await;

    let FetchOutcome::Success(success) = outcome else {
        panic!("expected success");
    };
    assert_eq!(success.endpoint, "Secondary API");
}

#[tokio::test]
async fn total_failure_reports_every_endpoint() {
    let gateway = ScriptedGateway::new().with_results(vec![
        Err(AttemptError::Timeout),
        Err(AttemptError::Connect),
    ]);

    let outcome = fetcher(gateway).send_emote(&request()).await;

    let FetchOutcome::Failure(failure) = outcome else {
        panic!("expected failure");
    };
    assert_eq!(failure.status, 500);
    let summary = failure.summary();
    assert!(summary.contains("Primary API: Timeout"));
    assert!(summary.contains("Secondary API: Connection Error"));
}

#[tokio::test]
async fn counters_balance_over_a_mixed_sequence() {
    let stats = RelayStats::new();

    let outcomes = [
        vec![ScriptedGateway::ok(200, "sent")],
        vec![Err(AttemptError::Timeout), Err(AttemptError::Connect)],
        vec![Err(AttemptError::Connect), ScriptedGateway::ok(200, "sent")],
    ];

    for script in outcomes {
        let gateway = ScriptedGateway::new().with_results(script);
        stats.record_request();
        match fetcher(gateway).send_emote(&request()).await {
            FetchOutcome::Success(_) => stats.record_success(),
            FetchOutcome::Failure(_) => stats.record_failure(),
        }
    }

    let snapshot = stats.snapshot();
    assert_eq!(snapshot.total_requests, 3);
    assert_eq!(snapshot.successful, 2);
    assert_eq!(snapshot.failed, 1);
    assert_eq!(
        snapshot.total_requests,
        snapshot.successful + snapshot.failed
    );
}

#[tokio::test]
async fn probe_reports_each_endpoint_independently() {
    let registry = registry();
    let gateway = ScriptedGateway::new().with_results(vec![
        Err(AttemptError::Connect),
        ScriptedGateway::ok(503, "warming up"),
    ]);
    let calls = gateway.call_count_handle();

    let prober = StatusProber::new(Arc::new(gateway), registry, Duration::from_secs(15));
    let health = prober.probe_all().await;

    assert_eq!(health.len(), 2);
    assert!(!health[0].is_online());
    // Any received status counts as online, even a 503.
    assert!(health[1].is_online());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
