//! Pool search engine.
//!
//! This crate turns token selections into normalized, yield-annotated pools:
//! - Token pair expansion with native/wrapped substitution
//! - Concurrent per-network dispatch to the pool indexers
//! - Record normalization and token metadata resolution
//! - Cross-chain aggregation and yield ranking
//! - Pool, token and protocol services

/// Prelude module for convenient imports.
pub mod prelude;

/// Cross-chain orchestration.
pub mod aggregator;
/// Search tunables.
pub mod config;
/// Per-network query dispatch.
pub mod dispatcher;
/// Error types.
pub mod error;
/// Token pair expansion.
pub mod filter_builder;
/// Raw record normalization.
pub mod normalizer;
/// Yield ranking.
pub mod ranking;
/// Request-level services.
pub mod services;

pub use error::{NormalizeError, SearchError};
