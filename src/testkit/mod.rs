//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`rpc`]: `ScriptedTransport`, an
//!   [`RpcTransport`](crate::port::outbound::transport::RpcTransport)
//!   replaying queued responses.
//! - [`chain`]: `FakeChain`, an in-memory
//!   [`ChainReader`](crate::port::outbound::chain::ChainReader) with failure
//!   and hang injection.
//! - [`store`]: stores that fail on demand.
//! - [`config`]: Canonical test configurations.

pub mod chain;
pub mod config;
pub mod rpc;
pub mod store;
