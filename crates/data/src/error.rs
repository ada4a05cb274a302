//! Error types for external collaborators.

use thiserror::Error;

/// Errors returned by a pool indexer.
#[derive(Debug, Error)]
pub enum IndexerError {
    /// Transport-level failure.
    #[error("indexer request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("indexer returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The GraphQL response carried errors.
    #[error("indexer query error: {0}")]
    GraphQl(String),

    /// The response body did not match the expected shape.
    #[error("failed to decode indexer response: {0}")]
    Decode(String),

    /// The response had neither data nor errors.
    #[error("indexer response contained no data")]
    MissingData,

    /// No endpoint is configured for the network.
    #[error("no indexer configured for {0}")]
    NotConfigured(String),
}

/// Errors returned by a token metadata provider.
#[derive(Debug, Error)]
pub enum TokenMetadataError {
    #[error("metadata request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("metadata provider error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The provider has no metadata for this address.
    #[error("no metadata found for {0}")]
    NotFound(String),

    #[error("unparseable price {value} for {address}")]
    InvalidPrice { address: String, value: String },
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("endpoint template for {network} still has unresolved placeholders: {url}")]
    UnresolvedTemplate { network: String, url: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}
