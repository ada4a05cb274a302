use super::PoolIndexer;
use crate::error::IndexerError;
use crate::graphql::GraphQlClient;
use crate::query::PoolQueryFilter;
use crate::records::{RawPoolRecord, RawProtocol};
use async_trait::async_trait;
use lp_yield_domain::prelude::{Address, Network, Protocol};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

/// Upper bound on pools returned by a single query.
const MAX_POOLS: usize = 1000;

const POOLS_QUERY: &str = r"
query GetPools(
  $where: Pool_filter!
  $dailyWhere: PoolDailyData_filter!
  $hourlyWhere: PoolHourlyData_filter!
  $dailyLimit: Int!
  $hourlyLimit: Int!
  $first: Int!
) {
  pools(where: $where, first: $first, orderBy: totalValueLockedUSD, orderDirection: desc) {
    id
    poolType
    feeTier
    totalValueLockedUSD
    protocol { id name url logo positionManager }
    token0 { id symbol name decimals }
    token1 { id symbol name decimals }
    v3PoolData { tickSpacing tick sqrtPriceX96 deployer }
    v4PoolData { tickSpacing tick sqrtPriceX96 hooks poolManager stateView permit2 }
    dailyData(
      where: $dailyWhere
      first: $dailyLimit
      orderBy: dayStartTimestamp
      orderDirection: desc
    ) {
      dayStartTimestamp
      feesUSD
      totalValueLockedUSD
    }
    hourlyData(
      where: $hourlyWhere
      first: $hourlyLimit
      orderBy: hourStartTimestamp
      orderDirection: desc
    ) {
      hourStartTimestamp
      feesUSD
      totalValueLockedUSD
    }
  }
}
";

const PROTOCOLS_QUERY: &str = r"
query GetProtocols {
  protocols(first: 1000) { id name url logo positionManager }
}
";

#[derive(Debug, Deserialize)]
struct PoolsData {
    pools: Vec<RawPoolRecord>,
}

#[derive(Debug, Deserialize)]
struct ProtocolsData {
    protocols: Vec<RawProtocol>,
}

/// [`PoolIndexer`] backed by a network's GraphQL subgraph.
#[derive(Debug, Clone)]
pub struct SubgraphIndexer {
    network: Network,
    client: GraphQlClient,
}

impl SubgraphIndexer {
    pub fn new(network: Network, client: GraphQlClient) -> Self {
        Self { network, client }
    }

    #[must_use]
    pub fn network(&self) -> Network {
        self.network
    }
}

#[async_trait]
impl PoolIndexer for SubgraphIndexer {
    async fn query_pools(
        &self,
        filter: &PoolQueryFilter,
    ) -> Result<Vec<RawPoolRecord>, IndexerError> {
        let data: PoolsData = self
            .client
            .query(POOLS_QUERY, pool_variables(filter))
            .await?;
        debug!(network = %self.network, pools = data.pools.len(), "subgraph pools fetched");
        Ok(data.pools)
    }

    async fn query_pool(
        &self,
        pool_id: &Address,
        filter: &PoolQueryFilter,
    ) -> Result<Option<RawPoolRecord>, IndexerError> {
        let variables = single_pool_variables(pool_id, filter);
        let data: PoolsData = self.client.query(POOLS_QUERY, variables).await?;
        debug!(
            network = %self.network,
            pool = %pool_id,
            found = !data.pools.is_empty(),
            "subgraph pool fetched"
        );
        Ok(data.pools.into_iter().next())
    }

    async fn protocols(&self) -> Result<Vec<Protocol>, IndexerError> {
        let data: ProtocolsData = self.client.query(PROTOCOLS_QUERY, json!({})).await?;
        Ok(data
            .protocols
            .into_iter()
            .map(|p| Protocol::new(p.id, p.name, p.url, p.logo))
            .collect())
    }
}

/// Translates a [`PoolQueryFilter`] into subgraph query variables.
fn pool_variables(filter: &PoolQueryFilter) -> Value {
    let pair_clauses: Vec<Value> = filter
        .pairs
        .iter()
        .map(|pair| json!({ "token0": pair.token0.as_str(), "token1": pair.token1.as_str() }))
        .collect();
    let pool_types: Vec<&str> = filter.pool_types.iter().map(|t| t.as_str()).collect();

    let mut constraints = json!({
        "totalValueLockedUSD_gte": filter.min_tvl_usd.to_string(),
        "totalValueLockedUSD_lt": filter.max_tvl_usd.to_string(),
        "poolType_in": pool_types,
        "dailyData_": { "dayStartTimestamp_gt": filter.active_since },
    });
    if !filter.blocked_protocol_ids.is_empty() {
        constraints["protocol_not_in"] = json!(filter.blocked_protocol_ids);
    }

    json!({
        "where": { "and": [ { "or": pair_clauses }, constraints ] },
        "dailyWhere": {
            "dayStartTimestamp_gt": filter.daily_since,
            "feesUSD_lt": filter.max_daily_fees_usd.to_string(),
        },
        "hourlyWhere": {
            "hourStartTimestamp_gt": filter.hourly_since,
            "feesUSD_lt": filter.max_hourly_fees_usd.to_string(),
        },
        "dailyLimit": filter.daily_limit,
        "hourlyLimit": filter.hourly_limit,
        "first": MAX_POOLS,
    })
}

/// Variables selecting one pool by id, keeping the history bounds of `filter`.
fn single_pool_variables(pool_id: &Address, filter: &PoolQueryFilter) -> Value {
    let mut variables = pool_variables(filter);
    variables["where"] = json!({ "id": pool_id.as_str() });
    variables["first"] = json!(1);
    variables
}
