//! Outbound emote API plumbing: endpoint registry, HTTP gateway seam,
//! failover fetch, and the status probe.

pub mod endpoint;
pub mod fetcher;
pub mod gateway;
pub mod probe;

pub use endpoint::{Endpoint, EndpointRegistry};
pub use fetcher::{FailoverFetcher, FetchFailure, FetchOutcome, FetchSuccess};
pub use gateway::{AttemptError, EmoteGateway, GatewayReply, HttpGateway};
pub use probe::{EndpointHealth, StatusProber};
