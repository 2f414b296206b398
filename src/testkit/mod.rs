//! Test doubles for the outbound HTTP seam.
//!
//! Exposed behind the `testkit` cargo feature so the integration suite can
//! use the same mocks as the unit tests.

pub mod gateway;

pub use gateway::ScriptedGateway;
