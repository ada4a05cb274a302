use crate::aggregator::{CrossChainAggregator, NetworkSearch};
use crate::error::{NormalizeError, SearchError};
use chrono::{DateTime, Utc};
use lp_yield_domain::prelude::{Address, Network, Pool, PoolSearchFilters, is_pool_id};
use serde::Serialize;
use tracing::info;

/// Response of both pool searches.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedPools {
    pub pools: Vec<Pool>,
    pub filters: PoolSearchFilters,
    /// Records that could not be normalized.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected_records: Vec<NormalizeError>,
}

/// Pool search entry points.
#[derive(Clone)]
pub struct PoolsService {
    aggregator: CrossChainAggregator,
}

impl PoolsService {
    pub fn new(aggregator: CrossChainAggregator) -> Self {
        Self { aggregator }
    }

    /// Searches one network for pools pairing any `token0` address with any
    /// `token1` address.
    ///
    /// # Errors
    /// Fails before any query on an unknown chain or a malformed address, and
    /// with [`SearchError::Indexer`] when the network's query fails.
    pub async fn search_in_chain(
        &self,
        chain_id: u64,
        token0: &[String],
        token1: &[String],
        filters: PoolSearchFilters,
    ) -> Result<MatchedPools, SearchError> {
        self.search_in_chain_at(chain_id, token0, token1, filters, Utc::now())
            .await
    }

    pub async fn search_in_chain_at(
        &self,
        chain_id: u64,
        token0: &[String],
        token1: &[String],
        filters: PoolSearchFilters,
        now: DateTime<Utc>,
    ) -> Result<MatchedPools, SearchError> {
        let network = Network::from_chain_id(chain_id)?;
        let search = NetworkSearch::new(
            network,
            parse_addresses(token0)?,
            parse_addresses(token1)?,
        );

        let normalized = self
            .aggregator
            .search_network(&search, &filters, now)
            .await
            .map_err(|source| SearchError::Indexer { network, source })?;

        info!(network = %network, pools = normalized.pools.len(), "in-chain search finished");
        Ok(MatchedPools {
            pools: normalized.pools,
            filters,
            rejected_records: normalized.rejected,
        })
    }

    /// Searches every eligible network using catalog token or group ids.
    ///
    /// Networks where either side resolves to nothing are skipped, so disjoint
    /// selections return an empty list.
    ///
    /// # Errors
    /// Returns [`SearchError::AllNetworksFailed`] when every searched network failed.
    pub async fn search_cross_chain(
        &self,
        token0_ids: &[String],
        token1_ids: &[String],
        filters: PoolSearchFilters,
    ) -> Result<MatchedPools, SearchError> {
        self.search_cross_chain_at(token0_ids, token1_ids, filters, Utc::now())
            .await
    }

    pub async fn search_cross_chain_at(
        &self,
        token0_ids: &[String],
        token1_ids: &[String],
        filters: PoolSearchFilters,
        now: DateTime<Utc>,
    ) -> Result<MatchedPools, SearchError> {
        let plan = self
            .aggregator
            .plan(token0_ids, token1_ids, filters.testnet_mode);
        let aggregated = self.aggregator.search(&plan, &filters, now).await?;
        Ok(MatchedPools {
            pools: aggregated.pools,
            filters,
            rejected_records: aggregated.rejected,
        })
    }

    /// Looks up one pool by address or V4 pool id and computes its yields.
    ///
    /// Unlike the searches, an idle pool is still returned.
    ///
    /// # Errors
    /// Fails before any query on an unknown chain or a malformed pool id.
    /// Returns [`SearchError::PoolNotFound`] when the indexer has no such pool.
    pub async fn pool_by_id(&self, chain_id: u64, pool_id: &str) -> Result<Pool, SearchError> {
        self.pool_by_id_at(chain_id, pool_id, Utc::now()).await
    }

    pub async fn pool_by_id_at(
        &self,
        chain_id: u64,
        pool_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Pool, SearchError> {
        let network = Network::from_chain_id(chain_id)?;
        let pool_id = pool_id.trim();
        if !is_pool_id(pool_id) {
            return Err(SearchError::InvalidQuery(format!("invalid pool id {pool_id}")));
        }
        let pool_id = Address::new(pool_id);

        let dispatcher = self.aggregator.dispatcher();
        let query = dispatcher.build_query(Vec::new(), &PoolSearchFilters::default(), now);
        let record = dispatcher
            .dispatch_pool(network, &pool_id, &query)
            .await
            .map_err(|source| SearchError::Indexer { network, source })?
            .ok_or_else(|| SearchError::PoolNotFound {
                network,
                pool: pool_id.to_string(),
            })?;

        let pool = self
            .aggregator
            .normalizer()
            .normalize_pool(network, record)
            .await?;
        info!(network = %network, pool = %pool_id, "pool lookup finished");
        Ok(pool)
    }
}

fn parse_addresses(values: &[String]) -> Result<Vec<Address>, SearchError> {
    values
        .iter()
        .map(|value| Address::parse(value).map_err(SearchError::from))
        .collect()
}
