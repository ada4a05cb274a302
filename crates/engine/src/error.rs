//! Search error types.

use lp_yield_data::error::IndexerError;
use lp_yield_domain::prelude::{DomainError, Network};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to callers of the search services.
#[derive(Debug, Error)]
pub enum SearchError {
    /// An unsupported chain id was supplied.
    #[error("unknown network: chain id {0} is not supported")]
    UnknownNetwork(u64),

    /// The request itself is malformed.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Address lookups need a chain to look on.
    #[error("a chain id is required when searching by address")]
    ChainIdRequired,

    /// The only queried network failed.
    #[error("indexer for {network} failed: {source}")]
    Indexer {
        network: Network,
        #[source]
        source: IndexerError,
    },

    /// Every queried network failed.
    #[error("all {} queried networks failed", failures.len())]
    AllNetworksFailed { failures: Vec<(Network, String)> },

    /// Neither the catalog nor the metadata provider knows the token.
    #[error("token {address} could not be resolved on {network}")]
    TokenMetadataUnresolvable { network: Network, address: String },

    /// The indexer has no pool with this id.
    #[error("pool {pool} not found on {network}")]
    PoolNotFound { network: Network, pool: String },

    /// A looked-up pool record could not be normalized.
    #[error(transparent)]
    MalformedPool(#[from] NormalizeError),

    /// No price provider is configured or the lookup failed.
    #[error("price of {address} on {network} is unavailable: {reason}")]
    TokenPriceUnavailable {
        network: Network,
        address: String,
        reason: String,
    },
}

impl From<DomainError> for SearchError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::UnknownNetwork(chain_id) => Self::UnknownNetwork(chain_id),
            other => Self::InvalidQuery(other.to_string()),
        }
    }
}

/// Why a single raw record could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NormalizeError {
    /// The record declares a pool type outside `{V3, V4}`.
    #[error("pool {pool}: unsupported pool type {pool_type}")]
    UnsupportedPoolType { pool: String, pool_type: String },

    /// The record is missing data or carries unparseable values.
    #[error("pool {pool}: {reason}")]
    MalformedRecord { pool: String, reason: String },
}
