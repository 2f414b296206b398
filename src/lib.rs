//! Emoterelay - Telegram front end for an in-game emote HTTP API.
//!
//! The bot relays `/e <team_code> <uid> <emote_id>` commands to an external
//! emote service over two fixed endpoints with sequential failover: the
//! primary endpoint is tried first, the secondary only after the primary has
//! conclusively failed or timed out. Everything else is presentation glue
//! over the Telegram transport.
//!
//! # Modules
//!
//! - [`config`] - Configuration from TOML files with env overrides
//! - [`domain`] - Validated requests, the emote catalog, relay statistics
//! - [`error`] - Error types for the crate
//! - [`relay`] - Endpoint registry, HTTP gateway seam, failover fetch, probe
//! - [`bot`] - Command parsing, authorization, rendering, polling loop
//!
//! # Features
//!
//! - `testkit` - Expose scripted test doubles for the HTTP seam

pub mod bot;
pub mod config;
pub mod domain;
pub mod error;
pub mod relay;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
