//! Core domain types for cross-network liquidity pool yield search.
//!
//! This crate is pure: it holds no I/O and no mutable global state.
//! - Network registry and per-network maps
//! - Canonical address handling
//! - Token and token-group catalog
//! - Normalized pool entities (V3 / V4)
//! - Yield computation over fee/TVL history

/// Prelude module for convenient imports.
pub mod prelude;

/// Canonical addresses.
pub mod address;
/// Static token catalog.
pub mod catalog;
/// Pools, tokens and protocols.
pub mod entities;
/// Pool types and yield timeframes.
pub mod enums;
/// Error types.
pub mod error;
/// Yield metrics.
pub mod metrics;
/// Network registry.
pub mod network;
/// Search filters, token pairs and time series samples.
pub mod value_objects;

pub use error::DomainError;
