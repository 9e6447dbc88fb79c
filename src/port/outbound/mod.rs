//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the remote chain, durable storage for the
//! result cache and checkpoint, the report sink, and progress reporting.

pub mod chain;
pub mod progress;
pub mod report;
pub mod store;
pub mod transport;
