//! Exchange-agnostic core types: validated emote requests, the popular-emote
//! catalog, and process-lifetime relay statistics.

pub mod catalog;
pub mod request;
pub mod stats;

pub use request::{EmoteRequest, RequestError};
pub use stats::{RelayStats, StatsSnapshot};
