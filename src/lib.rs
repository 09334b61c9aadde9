//! Synthesizes a weighted affinity graph between crypto projects and a fixed set of
//! exchanges, wallets and communities.
//!
//! The core (`graph`, `market_data::normaliser`) is synchronous and takes its
//! randomness from the caller; `market_data::adapters` and `export` are the I/O edges.

pub mod config;
pub mod export;
pub mod graph;
pub mod market_data;
pub mod telemetry;
