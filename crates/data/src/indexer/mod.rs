//! Pool indexer collaborator.

mod subgraph;

pub use subgraph::SubgraphIndexer;

use crate::error::IndexerError;
use crate::query::PoolQueryFilter;
use crate::records::RawPoolRecord;
use async_trait::async_trait;
use lp_yield_domain::prelude::{Address, Protocol};

/// A queryable source of pool records for one network.
#[async_trait]
pub trait PoolIndexer: Send + Sync {
    /// Pools matching `filter`, in the order the source returns them.
    async fn query_pools(
        &self,
        filter: &PoolQueryFilter,
    ) -> Result<Vec<RawPoolRecord>, IndexerError>;

    /// One pool by id, with history bounded by `filter`'s windows and
    /// ceilings. Pair, TVL and activity constraints are not applied.
    async fn query_pool(
        &self,
        pool_id: &Address,
        filter: &PoolQueryFilter,
    ) -> Result<Option<RawPoolRecord>, IndexerError>;

    /// Protocols indexed on this network.
    async fn protocols(&self) -> Result<Vec<Protocol>, IndexerError>;
}
