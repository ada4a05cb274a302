//! External collaborators of the search engine.
//!
//! This crate provides:
//! - The [`PoolIndexer`](indexer::PoolIndexer) contract and a GraphQL subgraph
//!   implementation
//! - The [`TokenMetadataProvider`](metadata::TokenMetadataProvider) contract and an
//!   Alchemy implementation for metadata and USD prices
//! - Raw indexer record types and the indexer query filter
//! - Environment configuration for endpoints and credentials

/// Prelude module for convenient imports.
pub mod prelude;

/// Endpoint and credential configuration.
pub mod config;
/// Error types.
pub mod error;
/// GraphQL transport.
pub mod graphql;
/// Pool indexers.
pub mod indexer;
/// Token metadata providers.
pub mod metadata;
/// Indexer query filter.
pub mod query;
/// Raw indexer records.
pub mod records;

pub use error::{ConfigError, IndexerError, TokenMetadataError};
