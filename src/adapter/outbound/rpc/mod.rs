//! Solana JSON-RPC adapter.

pub mod client;
pub mod dto;
pub mod http;
pub mod pacer;
pub mod reader;

pub use client::RemoteCallClient;
pub use http::HttpTransport;
pub use reader::SolanaReader;
