//! Prelude module for convenient imports.

pub use crate::config::{IndexerConfig, MetadataConfig, http_client};
pub use crate::error::{ConfigError, IndexerError, TokenMetadataError};
pub use crate::graphql::GraphQlClient;
pub use crate::indexer::{PoolIndexer, SubgraphIndexer};
pub use crate::metadata::{AlchemyMetadataProvider, TokenMetadataProvider};
pub use crate::query::PoolQueryFilter;
pub use crate::records::{
    RawDailySample, RawHourlySample, RawPoolRecord, RawProtocol, RawToken, RawV3PoolData,
    RawV4PoolData,
};
