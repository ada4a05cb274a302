//! Raw record to [`Pool`] conversion.
//!
//! Records are screened (pool type, filters, V4 wrapped-native rule) before any
//! token metadata is fetched. Distinct token addresses are then resolved once,
//! catalog first and provider second, and the surviving records are turned into
//! tagged pools with computed yields.

use crate::error::{NormalizeError, SearchError};
use futures::future::join_all;
use lp_yield_data::metadata::TokenMetadataProvider;
use lp_yield_data::records::{RawPoolRecord, RawV3PoolData, RawV4PoolData};
use lp_yield_domain::prelude::{
    Address, Network, Pool, PoolCommon, PoolSearchFilters, PoolType, Protocol, TokenCatalog,
    TokenDescriptor, V3Pool, V4Pool, YieldCalculator, YieldPolicy,
};
use primitive_types::U256;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Addresses the caller searched with, across both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestedTokens {
    addresses: HashSet<Address>,
}

impl RequestedTokens {
    pub fn new<'a>(sides: impl IntoIterator<Item = &'a [Address]>) -> Self {
        Self {
            addresses: sides.into_iter().flatten().cloned().collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.addresses.contains(address)
    }

    /// The caller asked for the native asset but not for its wrapped form.
    #[must_use]
    pub fn wants_native_display(&self, network: Network) -> bool {
        self.contains(&Address::zero()) && !self.contains(&network.wrapped_native_address())
    }
}

/// Pools built from one network's records, plus the records that were rejected.
#[derive(Debug, Default)]
pub struct NormalizedPools {
    pub pools: Vec<Pool>,
    pub rejected: Vec<NormalizeError>,
}

#[derive(Clone)]
pub struct PoolNormalizer {
    catalog: Arc<TokenCatalog>,
    metadata: Option<Arc<dyn TokenMetadataProvider>>,
    calculator: YieldCalculator,
}

impl PoolNormalizer {
    pub fn new(
        catalog: Arc<TokenCatalog>,
        metadata: Option<Arc<dyn TokenMetadataProvider>>,
        policy: YieldPolicy,
    ) -> Self {
        Self {
            catalog,
            metadata,
            calculator: YieldCalculator::new(policy),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &TokenCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn metadata(&self) -> Option<&Arc<dyn TokenMetadataProvider>> {
        self.metadata.as_ref()
    }

    /// Metadata for one token, from the catalog or else the provider.
    ///
    /// # Errors
    /// Returns [`SearchError::TokenMetadataUnresolvable`] when neither source knows it.
    pub async fn resolve_token(
        &self,
        network: Network,
        address: &Address,
    ) -> Result<TokenDescriptor, SearchError> {
        if let Some(descriptor) = self
            .catalog
            .find_by_address(network, address)
            .and_then(|token| token.descriptor(network))
        {
            return Ok(descriptor);
        }

        let unresolvable = || SearchError::TokenMetadataUnresolvable {
            network,
            address: address.to_string(),
        };
        let provider = self.metadata.as_ref().ok_or_else(unresolvable)?;
        let result = provider.token_metadata(network, address).await;
        result.map_err(|e| {
            warn!(
                network = %network,
                address = %address,
                error = %e,
                "token metadata lookup failed"
            );
            unresolvable()
        })
    }

    /// Resolves every address concurrently. Unresolvable addresses are absent
    /// from the returned map.
    pub async fn resolve_tokens(
        &self,
        network: Network,
        addresses: impl IntoIterator<Item = Address>,
    ) -> HashMap<Address, TokenDescriptor> {
        let distinct: HashSet<Address> = addresses.into_iter().collect();
        let lookups = distinct.into_iter().map(|address| async move {
            let descriptor = self.resolve_token(network, &address).await.ok();
            (address, descriptor)
        });
        join_all(lookups)
            .await
            .into_iter()
            .filter_map(|(address, descriptor)| descriptor.map(|d| (address, d)))
            .collect()
    }

    /// Normalizes one network's records, keeping the source order.
    pub async fn normalize(
        &self,
        network: Network,
        records: Vec<RawPoolRecord>,
        requested: &RequestedTokens,
        filters: &PoolSearchFilters,
    ) -> NormalizedPools {
        let mut rejected = Vec::new();
        let mut screened = Vec::with_capacity(records.len());
        for record in records {
            match screen(&record, network, requested, filters) {
                Ok(Some(pool_type)) => screened.push((pool_type, record)),
                Ok(None) => {}
                Err(e) => {
                    error!(network = %network, error = %e, "rejecting pool record");
                    rejected.push(e);
                }
            }
        }

        let addresses = screened.iter().flat_map(|(_, record)| {
            [Address::new(&record.token0.id), Address::new(&record.token1.id)]
        });
        let tokens = self.resolve_tokens(network, addresses).await;

        let mut pools = Vec::with_capacity(screened.len());
        for (pool_type, record) in screened {
            match self.build_pool(network, pool_type, record, requested, filters, &tokens) {
                Ok(Some(pool)) if pool.yields().is_all_zero() => {
                    debug!(
                        network = %network,
                        pool = %pool.address(),
                        "no yield in any window, dropping pool"
                    );
                }
                Ok(Some(pool)) => pools.push(pool),
                Ok(None) => {}
                Err(e) => {
                    error!(network = %network, error = %e, "rejecting pool record");
                    rejected.push(e);
                }
            }
        }
        debug!(
            network = %network,
            pools = pools.len(),
            rejected = rejected.len(),
            "records normalized"
        );
        NormalizedPools { pools, rejected }
    }

    /// Builds a pool looked up by id, whatever its yields.
    ///
    /// Both of the record's tokens count as requested, so a wrapped-native
    /// token keeps its own identity and V4 pools holding one are kept.
    ///
    /// # Errors
    /// Returns [`SearchError::TokenMetadataUnresolvable`] for an unknown token
    /// and [`SearchError::MalformedPool`] for a record that cannot be built.
    pub async fn normalize_pool(
        &self,
        network: Network,
        record: RawPoolRecord,
    ) -> Result<Pool, SearchError> {
        let pool_type = parse_pool_type(&record)?;
        let token0 = Address::new(&record.token0.id);
        let token1 = Address::new(&record.token1.id);
        let requested = RequestedTokens::new([
            std::slice::from_ref(&token0),
            std::slice::from_ref(&token1),
        ]);

        let mut tokens = HashMap::new();
        for address in [token0, token1] {
            let descriptor = self.resolve_token(network, &address).await?;
            tokens.insert(address, descriptor);
        }

        let pool_id = record.id.clone();
        let filters = PoolSearchFilters::default();
        self.build_pool(network, pool_type, record, &requested, &filters, &tokens)?
            .ok_or_else(|| {
                SearchError::MalformedPool(NormalizeError::MalformedRecord {
                    pool: pool_id,
                    reason: "token metadata missing".to_string(),
                })
            })
    }

    fn build_pool(
        &self,
        network: Network,
        pool_type: PoolType,
        record: RawPoolRecord,
        requested: &RequestedTokens,
        filters: &PoolSearchFilters,
        tokens: &HashMap<Address, TokenDescriptor>,
    ) -> Result<Option<Pool>, NormalizeError> {
        let malformed = |reason: String| NormalizeError::MalformedRecord {
            pool: record.id.clone(),
            reason,
        };

        let (Some(token0), Some(token1)) = (
            self.display_token(network, &record.token0.id, requested, tokens),
            self.display_token(network, &record.token1.id, requested, tokens),
        ) else {
            debug!(
                network = %network,
                pool = %record.id,
                "token metadata unresolvable, dropping pool"
            );
            return Ok(None);
        };

        let tvl = record.tvl_usd().map_err(|e| malformed(e.to_string()))?;
        let fee_tier = u32::try_from(record.fee_tier)
            .map_err(|_| malformed(format!("fee tier {} out of range", record.fee_tier)))?;
        let daily = record
            .daily_data
            .iter()
            .map(|sample| sample.to_sample())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| malformed(e.to_string()))?;
        let hourly = record
            .hourly_data
            .iter()
            .map(|sample| sample.to_sample())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| malformed(e.to_string()))?;

        let yields = self
            .calculator
            .compute(tvl, &hourly, &daily, filters.min_tvl_usd);

        let position_manager = record
            .protocol
            .position_manager
            .as_deref()
            .map(Address::new)
            .ok_or_else(|| malformed("missing position manager".to_string()))?;
        let common = PoolCommon {
            chain_id: network,
            pool_address: Address::new(&record.id),
            protocol: Protocol::new(
                record.protocol.id.clone(),
                record.protocol.name.clone(),
                record.protocol.url.clone(),
                record.protocol.logo.clone(),
            ),
            token0,
            token1,
            total_value_locked_usd: tvl,
            fee_tier,
            position_manager_address: position_manager,
            permit2_address: None,
            yields,
        };

        let pool = match pool_type {
            PoolType::V3 => {
                let data = record
                    .v3_pool_data
                    .as_ref()
                    .ok_or_else(|| malformed("V3 pool without V3 data".to_string()))?;
                Pool::V3(build_v3(common, data).map_err(malformed)?)
            }
            PoolType::V4 => {
                let data = record
                    .v4_pool_data
                    .as_ref()
                    .ok_or_else(|| malformed("V4 pool without V4 data".to_string()))?;
                Pool::V4(build_v4(common, data).map_err(malformed)?)
            }
        };
        Ok(Some(pool))
    }

    /// Descriptor shown for a pool token.
    ///
    /// A wrapped-native token is shown as the native asset when the caller
    /// searched with the native address and not with the wrapped one.
    fn display_token(
        &self,
        network: Network,
        raw_address: &str,
        requested: &RequestedTokens,
        tokens: &HashMap<Address, TokenDescriptor>,
    ) -> Option<TokenDescriptor> {
        let address = Address::new(raw_address);
        if network.is_wrapped_native(&address) && requested.wants_native_display(network) {
            if let Some(native) = self
                .catalog
                .native_token(network)
                .and_then(|token| token.descriptor(network))
            {
                return Some(native);
            }
        }
        tokens.get(&address).cloned()
    }
}

/// Checks a record before any metadata is fetched.
///
/// Returns the parsed pool type for records worth building, `None` for
/// records excluded by request filters.
fn screen(
    record: &RawPoolRecord,
    network: Network,
    requested: &RequestedTokens,
    filters: &PoolSearchFilters,
) -> Result<Option<PoolType>, NormalizeError> {
    let pool_type = parse_pool_type(record)?;

    if !filters.allows_pool_type(pool_type) {
        debug!(pool = %record.id, %pool_type, "pool type not allowed");
        return Ok(None);
    }
    if filters.is_protocol_blocked(&record.protocol.id) {
        debug!(pool = %record.id, protocol = %record.protocol.id, "protocol blocked");
        return Ok(None);
    }

    let wrapped = network.wrapped_native_address();
    let holds_wrapped = Address::new(&record.token0.id) == wrapped
        || Address::new(&record.token1.id) == wrapped;
    if pool_type == PoolType::V4 && holds_wrapped && !requested.contains(&wrapped) {
        debug!(pool = %record.id, "V4 pool matched through wrapped-native expansion");
        return Ok(None);
    }
    Ok(Some(pool_type))
}

fn parse_pool_type(record: &RawPoolRecord) -> Result<PoolType, NormalizeError> {
    record
        .pool_type
        .parse()
        .map_err(|_| NormalizeError::UnsupportedPoolType {
            pool: record.id.clone(),
            pool_type: record.pool_type.clone(),
        })
}

fn parse_sqrt_price(value: Option<&str>) -> Result<Option<U256>, String> {
    value
        .map(|raw| {
            U256::from_dec_str(raw.trim()).map_err(|_| format!("invalid sqrtPriceX96 {raw}"))
        })
        .transpose()
}

fn build_v3(common: PoolCommon, data: &RawV3PoolData) -> Result<V3Pool, String> {
    Ok(V3Pool {
        common,
        tick_spacing: data.tick_spacing,
        latest_tick: data.tick,
        latest_sqrt_price_x96: parse_sqrt_price(data.sqrt_price_x96.as_deref())?,
        deployer_address: data.deployer.as_deref().map(Address::new),
    })
}

fn build_v4(mut common: PoolCommon, data: &RawV4PoolData) -> Result<V4Pool, String> {
    common.permit2_address = data.permit2.as_deref().map(Address::new);
    Ok(V4Pool {
        common,
        tick_spacing: data.tick_spacing,
        latest_tick: data.tick,
        latest_sqrt_price_x96: parse_sqrt_price(data.sqrt_price_x96.as_deref())?,
        hooks_address: Address::new(&data.hooks),
        pool_manager_address: Address::new(&data.pool_manager),
        state_view_address: Address::new(&data.state_view),
    })
}
